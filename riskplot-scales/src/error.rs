#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskplotScaleError {
    #[error("Scale domain must be finite, got ({0}, {1})")]
    NonFiniteDomain(f32, f32),

    #[error("Scale range must be finite, got ({0}, {1})")]
    NonFiniteRange(f32, f32),

    #[error("Tick count must be positive, got {0}")]
    InvalidTickCount(f32),
}
