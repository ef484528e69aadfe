use riskplot_scales::error::RiskplotScaleError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskplotGuidesError {
    #[error("Tooltip requires at least one line of text")]
    EmptyTooltip,

    #[error("Invalid tooltip anchor: {0:?}")]
    InvalidAnchor([f32; 2]),

    #[error("Invalid scale")]
    InvalidScale(#[from] RiskplotScaleError),
}
