//! Region records and CSV loading.

use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::error::ChartError;

/// Every numeric column of a record
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    VariantNames,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Measure {
    Poverty,
    Age,
    Income,
    Healthcare,
    HealthcareLow,
    HealthcareHigh,
    Obesity,
    ObesityLow,
    ObesityHigh,
    Smokes,
    SmokesLow,
    SmokesHigh,
}

impl Measure {
    pub const ALL: [Measure; 12] = [
        Measure::Poverty,
        Measure::Age,
        Measure::Income,
        Measure::Healthcare,
        Measure::HealthcareLow,
        Measure::HealthcareHigh,
        Measure::Obesity,
        Measure::ObesityLow,
        Measure::ObesityHigh,
        Measure::Smokes,
        Measure::SmokesLow,
        Measure::SmokesHigh,
    ];

    /// CSV header of the column
    pub fn column(&self) -> &'static str {
        self.into()
    }
}

/// One region's demographic and health measures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub state: String,
    pub abbr: String,
    pub poverty: f32,
    pub age: f32,
    pub income: f32,
    pub healthcare: f32,
    pub healthcare_low: f32,
    pub healthcare_high: f32,
    pub obesity: f32,
    pub obesity_low: f32,
    pub obesity_high: f32,
    pub smokes: f32,
    pub smokes_low: f32,
    pub smokes_high: f32,
}

impl Record {
    pub fn value(&self, measure: Measure) -> f32 {
        match measure {
            Measure::Poverty => self.poverty,
            Measure::Age => self.age,
            Measure::Income => self.income,
            Measure::Healthcare => self.healthcare,
            Measure::HealthcareLow => self.healthcare_low,
            Measure::HealthcareHigh => self.healthcare_high,
            Measure::Obesity => self.obesity,
            Measure::ObesityLow => self.obesity_low,
            Measure::ObesityHigh => self.obesity_high,
            Measure::Smokes => self.smokes,
            Measure::SmokesLow => self.smokes_low,
            Measure::SmokesHigh => self.smokes_high,
        }
    }

    fn value_mut(&mut self, measure: Measure) -> &mut f32 {
        match measure {
            Measure::Poverty => &mut self.poverty,
            Measure::Age => &mut self.age,
            Measure::Income => &mut self.income,
            Measure::Healthcare => &mut self.healthcare,
            Measure::HealthcareLow => &mut self.healthcare_low,
            Measure::HealthcareHigh => &mut self.healthcare_high,
            Measure::Obesity => &mut self.obesity,
            Measure::ObesityLow => &mut self.obesity_low,
            Measure::ObesityHigh => &mut self.obesity_high,
            Measure::Smokes => &mut self.smokes,
            Measure::SmokesLow => &mut self.smokes_low,
            Measure::SmokesHigh => &mut self.smokes_high,
        }
    }

    /// Record with every measure set to zero
    pub fn new(state: &str, abbr: &str) -> Self {
        Self {
            state: state.to_string(),
            abbr: abbr.to_string(),
            poverty: 0.0,
            age: 0.0,
            income: 0.0,
            healthcare: 0.0,
            healthcare_low: 0.0,
            healthcare_high: 0.0,
            obesity: 0.0,
            obesity_low: 0.0,
            obesity_high: 0.0,
            smokes: 0.0,
            smokes_low: 0.0,
            smokes_high: 0.0,
        }
    }

    pub fn with_value(mut self, measure: Measure, value: f32) -> Self {
        *self.value_mut(measure) = value;
        self
    }
}

/// Numeric cast of a CSV cell. Blank or non-numeric text becomes NaN.
pub fn cast_number(text: &str) -> f32 {
    let text = text.trim();
    if text.is_empty() {
        return f32::NAN;
    }
    text.parse::<f32>().unwrap_or(f32::NAN)
}

/// Validated, non-empty set of records whose measures are all finite
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Result<Self, ChartError> {
        if records.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        for (row, record) in records.iter().enumerate() {
            if record.state.trim().is_empty() {
                return Err(ChartError::InvalidDataset {
                    row,
                    column: "state".to_string(),
                    value: record.state.clone(),
                });
            }
            for measure in Measure::ALL {
                let value = record.value(measure);
                if !value.is_finite() {
                    return Err(ChartError::InvalidDataset {
                        row,
                        column: measure.column().to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
        Ok(Self { records })
    }

    /// Read records from CSV text with a header row. Extra columns are ignored.
    pub fn from_reader(reader: impl Read) -> Result<Self, ChartError> {
        let mut csv_reader = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let column_index = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ChartError::MissingColumn(name.to_string()))
        };
        let state_idx = column_index("state")?;
        let abbr_idx = column_index("abbr")?;
        let measure_idx = Measure::ALL
            .iter()
            .map(|m| Ok((*m, column_index(m.column())?)))
            .collect::<Result<Vec<_>, ChartError>>()?;

        let cell = |row: &StringRecord, idx: usize| row.get(idx).unwrap_or("").to_string();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result?;
            let mut record = Record::new(&cell(&row, state_idx), &cell(&row, abbr_idx));
            for (measure, idx) in &measure_idx {
                *record.value_mut(*measure) = cast_number(&cell(&row, *idx));
            }
            records.push(record);
        }

        let dataset = Self::new(records)?;
        log::info!("loaded {} records", dataset.len());
        Ok(dataset)
    }

    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        log::debug!("loading records from {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false, a dataset cannot be built without records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn values(&self, measure: Measure) -> Vec<f32> {
        self.records.iter().map(|r| r.value(measure)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const HEADER: &str = "id,state,abbr,poverty,povertyMoe,age,ageMoe,income,incomeMoe,healthcare,healthcareLow,healthcareHigh,obesity,obesityLow,obesityHigh,smokes,smokesLow,smokesHigh";

    #[rstest]
    #[case("38.1", 38.1)]
    #[case(" 42830 ", 42830.0)]
    #[case("1e2", 100.0)]
    fn test_cast_number(#[case] text: &str, #[case] expected: f32) {
        assert_eq!(cast_number(text), expected);
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    #[case("n/a")]
    fn test_cast_number_nan(#[case] text: &str) {
        assert!(cast_number(text).is_nan());
    }

    #[test]
    fn test_reads_named_columns() {
        let csv = format!(
            "{HEADER}\n1,Alabama,AL,19.3,0.5,38.6,0.2,42830,598,13.9,12.7,15.1,33.5,32.1,35,21.1,19.4,22.8\n"
        );
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.state, "Alabama");
        assert_eq!(record.abbr, "AL");
        assert_eq!(record.value(Measure::Age), 38.6);
        assert_eq!(record.value(Measure::Income), 42830.0);
        assert_eq!(record.value(Measure::SmokesHigh), 22.8);
    }

    #[test]
    fn test_missing_column() {
        let csv = "state,abbr,age\nAlabama,AL,38.6\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::MissingColumn(name) if name == "poverty"));
    }

    #[test]
    fn test_blank_cell_is_rejected() {
        let csv = format!(
            "{HEADER}\n1,Alabama,AL,19.3,0.5,,0.2,42830,598,13.9,12.7,15.1,33.5,32.1,35,21.1,19.4,22.8\n"
        );
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ChartError::InvalidDataset { row: 0, ref column, .. } if column == "age"
        ));
    }

    #[test]
    fn test_header_only_is_empty() {
        let err = Dataset::from_reader(HEADER.as_bytes()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyDataset));
    }

    #[test]
    fn test_blank_state_is_rejected() {
        let err = Dataset::new(vec![Record::new(" ", "AL")]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidDataset { ref column, .. } if column == "state"));
    }

    #[test]
    fn test_measure_columns() {
        assert_eq!(Measure::HealthcareLow.column(), "healthcareLow");
        assert_eq!("obesityHigh".parse::<Measure>().unwrap(), Measure::ObesityHigh);
        assert_eq!(Measure::VARIANTS.len(), Measure::ALL.len());
    }
}
