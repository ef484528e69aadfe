use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskplotSvgError {
    #[error("failed to format svg")]
    FormatError(#[from] std::fmt::Error),

    #[error("io error")]
    IoError(#[from] std::io::Error),

    #[error("Image allocation error: {0}")]
    ImageAllocationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[cfg(feature = "png")]
    #[error("usvg error")]
    UsvgError(#[from] usvg::Error),

    #[cfg(feature = "png")]
    #[error("roxml error")]
    RoxmlError(#[from] usvg::roxmltree::Error),
}
