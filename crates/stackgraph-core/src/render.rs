//! Terraform JSON rendering
//!
//! Turns a [`SynthesizedGraph`] into the configuration document the
//! provisioning engine consumes:
//!
//! ```json
//! {
//!   "terraform": { "backend": { "s3": { ... } } },
//!   "provider":  { "aws": [ { "region": "us-west-2" } ] },
//!   "resource":  { "aws_vpc": { "vpc": { "cidr_block": "10.0.0.0/16" } } },
//!   "output":    { "vpc_id": { "value": "${aws_vpc.vpc.id}" } }
//! }
//! ```

use crate::graph::SynthesizedGraph;
use crate::settings::BackendBlock;
use crate::value::Value;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use sha2::{Digest, Sha256};

impl SynthesizedGraph {
    /// Render the whole graph as a Terraform JSON document
    #[must_use]
    pub fn render(&self) -> JsonValue {
        let mut doc = Map::new();

        if let BackendBlock::Remote { kind, properties } = self.backend() {
            let mut backend = Map::new();
            backend.insert(kind.clone(), properties_to_json(properties));
            let mut terraform = Map::new();
            terraform.insert("backend".into(), JsonValue::Object(backend));
            doc.insert("terraform".into(), JsonValue::Object(terraform));
        }

        if let Some(provider) = self.provider() {
            let mut providers = Map::new();
            providers.insert(
                provider.name().to_owned(),
                JsonValue::Array(vec![properties_to_json(provider.properties())]),
            );
            doc.insert("provider".into(), JsonValue::Object(providers));
        }

        let mut resources = Map::new();
        for decl in self.declarations() {
            let mut body = Map::new();
            for (key, value) in decl.properties() {
                body.insert(key.to_owned(), value.to_json());
            }
            if !decl.dependencies().is_empty() {
                body.insert(
                    "depends_on".into(),
                    decl.dependencies()
                        .iter()
                        .map(ToString::to_string)
                        .collect(),
                );
            }

            let by_kind = resources
                .entry(decl.kind().to_owned())
                .or_insert_with(|| JsonValue::Object(Map::new()));
            if let JsonValue::Object(by_name) = by_kind {
                by_name.insert(decl.name().to_owned(), JsonValue::Object(body));
            }
        }
        if !resources.is_empty() {
            doc.insert("resource".into(), JsonValue::Object(resources));
        }

        let mut outputs = Map::new();
        for output in self.outputs() {
            let mut body = Map::new();
            body.insert("value".into(), output.value().to_json());
            if let Some(description) = output.description() {
                body.insert("description".into(), description.into());
            }
            outputs.insert(output.name().to_owned(), JsonValue::Object(body));
        }
        if !outputs.is_empty() {
            doc.insert("output".into(), JsonValue::Object(outputs));
        }

        JsonValue::Object(doc)
    }

    /// Pretty-printed Terraform JSON
    #[must_use]
    pub fn to_json_pretty(&self) -> String {
        // Display with the alternate flag is serde_json's pretty printer
        format!("{:#}", self.render())
    }

    /// Compact Terraform JSON
    #[must_use]
    pub fn to_json_compact(&self) -> String {
        self.render().to_string()
    }
}

fn properties_to_json(properties: &IndexMap<String, Value>) -> JsonValue {
    JsonValue::Object(
        properties
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

/// Hex SHA-256 of a rendered document's compact form
#[must_use]
pub fn fingerprint(document: &JsonValue) -> String {
    let mut hasher = Sha256::new();
    hasher.update(document.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use crate::declaration::Declaration;
    use crate::output::OutputBinding;
    use crate::settings::{BackendBlock, ProviderBlock};
    use crate::ResourceGraph;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn small_graph() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        graph.set_provider(ProviderBlock::new("aws").with("region", "us-west-2"));
        let vpc = graph
            .declare(Declaration::new("aws_vpc", "vpc").with("cidr_block", "10.0.0.0/16"))
            .unwrap();
        graph
            .declare(
                Declaration::new("aws_subnet", "subnet_a")
                    .with("vpc_id", vpc.id())
                    .depends_on(&vpc),
            )
            .unwrap();
        graph
            .add_output(OutputBinding::new("vpc_id", vpc.id()).describe("network id"))
            .unwrap();
        graph
    }

    #[test]
    fn test_render_document_shape() {
        let rendered = small_graph().finish().unwrap().render();
        assert_eq!(
            rendered,
            json!({
                "provider": { "aws": [ { "region": "us-west-2" } ] },
                "resource": {
                    "aws_vpc": { "vpc": { "cidr_block": "10.0.0.0/16" } },
                    "aws_subnet": {
                        "subnet_a": {
                            "vpc_id": "${aws_vpc.vpc.id}",
                            "depends_on": ["aws_vpc.vpc"]
                        }
                    }
                },
                "output": {
                    "vpc_id": { "value": "${aws_vpc.vpc.id}", "description": "network id" }
                }
            })
        );
    }

    #[test]
    fn test_local_backend_omits_terraform_block() {
        let rendered = small_graph().finish().unwrap().render();
        assert!(rendered.get("terraform").is_none());
    }

    #[test]
    fn test_remote_backend_rendered() {
        let mut graph = small_graph();
        graph.set_backend(
            BackendBlock::remote("s3")
                .with("bucket", "state")
                .with("encrypt", true),
        );
        let rendered = graph.finish().unwrap().render();
        assert_eq!(
            rendered["terraform"],
            json!({ "backend": { "s3": { "bucket": "state", "encrypt": true } } })
        );
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = small_graph().finish().unwrap();
        let b = small_graph().finish().unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        assert_eq!(a.to_json_compact(), b.to_json_compact());
    }
}
