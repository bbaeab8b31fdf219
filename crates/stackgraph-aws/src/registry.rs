//! Container registry, gated by `CREATE_ECR`

use crate::resources::{ECR_REPOSITORY, SECTION_REGISTRY};
use stackgraph_config::Configuration;
use stackgraph_core::{Declaration, GraphError, ResourceGraph, ResourceHandle};

/// Declare the image repository in the `registry` section when enabled
///
/// # Errors
/// Any [`GraphError`] raised while declaring.
pub fn build_registry(
    graph: &mut ResourceGraph,
    config: &Configuration,
) -> Result<Option<ResourceHandle>, GraphError> {
    if !config.create_registry() {
        tracing::debug!("registry disabled");
        return Ok(None);
    }
    let repository = graph.section(SECTION_REGISTRY, |graph| {
        graph.declare(
            Declaration::new(ECR_REPOSITORY, "ecr")
                .with("name", config.prefix())
                .with("image_tag_mutability", "MUTABLE")
                .with("force_delete", true),
        )
    })?;
    tracing::info!(declarations = graph.len(), "registry declared");
    Ok(Some(repository))
}
