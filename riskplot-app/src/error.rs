use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskplotAppError {
    #[error("Failed to build scene graph: {0}")]
    SceneGraphBuild(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RiskplotAppError {
    pub fn scene_graph_build(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::SceneGraphBuild(Box::new(err))
    }
}
