use riskplot_guides::error::RiskplotGuidesError;
use riskplot_scales::error::RiskplotScaleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to read data")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV")]
    Csv(#[from] csv::Error),

    #[error("Missing column `{0}`")]
    MissingColumn(String),

    #[error("Dataset has no records")]
    EmptyDataset,

    #[error("Invalid value `{value}` in column `{column}` of record {row}")]
    InvalidDataset {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Unknown field `{0}`")]
    UnknownField(String),

    #[error("Invalid color `{0}`")]
    InvalidColor(String),

    #[error("Invalid config")]
    Config(#[from] serde_json::Error),

    #[error("Invalid scale")]
    Scale(#[from] RiskplotScaleError),

    #[error("Failed to build guide")]
    Guides(#[from] RiskplotGuidesError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_wrapped_error_is_source_not_message() {
        let err = ChartError::from(io::Error::new(io::ErrorKind::NotFound, "data.csv is gone"));
        assert_eq!(err.to_string(), "Failed to read data");
        assert_eq!(err.source().unwrap().to_string(), "data.csv is gone");
    }
}
