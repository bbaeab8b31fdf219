//! Provider and state backend settings

use crate::resources::PROVIDER;
use stackgraph_config::{BackendMode, Configuration};
use stackgraph_core::{BackendBlock, ProviderBlock, ResourceGraph, Value};

/// Configure the provider block: region, optional profile, default tags
pub fn configure_provider(graph: &mut ResourceGraph, config: &Configuration) {
    let provider = ProviderBlock::new(PROVIDER)
        .with("region", config.region())
        .with_opt("profile", config.profile())
        .with(
            "default_tags",
            Value::map([(
                "tags",
                Value::map([
                    ("Project", config.project()),
                    ("Environment", config.environment()),
                    ("ManagedBy", "stackgraph"),
                ]),
            )]),
        );
    graph.set_provider(provider);
}

/// Configure the state backend; local mode leaves the engine default
pub fn configure_backend(graph: &mut ResourceGraph, config: &Configuration) {
    if let BackendMode::Remote {
        state_bucket,
        lock_table,
    } = config.backend()
    {
        let backend = BackendBlock::remote("s3")
            .with("bucket", state_bucket)
            .with(
                "key",
                format!("{}/{}/terraform.tfstate", config.project(), config.environment()),
            )
            .with("region", config.region())
            .with("dynamodb_table", lock_table)
            .with("encrypt", true)
            .with_opt("profile", config.profile());
        tracing::info!(bucket = %state_bucket, lock_table = %lock_table, "remote state backend");
        graph.set_backend(backend);
    }
}
