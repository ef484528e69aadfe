use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskplotSceneGraphError {
    #[error("No mark at path {0:?}")]
    InvalidMarkPath(Vec<usize>),

    #[error("Mark at path {0:?} is not a group")]
    NotAGroup(Vec<usize>),
}
