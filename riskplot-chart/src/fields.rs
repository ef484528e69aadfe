use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::data::Measure;
use crate::error::ChartError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Field shown on the X axis
#[derive(
    Debug,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum XField {
    #[default]
    Age,
    Income,
    Poverty,
}

impl XField {
    /// In label order
    pub const ALL: [XField; 3] = [XField::Age, XField::Income, XField::Poverty];

    pub fn measure(&self) -> Measure {
        match self {
            XField::Age => Measure::Age,
            XField::Income => Measure::Income,
            XField::Poverty => Measure::Poverty,
        }
    }

    pub fn tooltip_label(&self) -> &'static str {
        match self {
            XField::Age => "Median Age",
            XField::Income => "Median Household Income",
            XField::Poverty => "Poverty Rate",
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            XField::Age => "Age (Median)",
            XField::Income => "Household Income (Median)",
            XField::Poverty => "In Poverty (%)",
        }
    }

    /// Position of the field's label in its label group
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Field shown on the Y axis
#[derive(
    Debug,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum YField {
    #[default]
    Obesity,
    Smokes,
    Healthcare,
}

impl YField {
    /// In label order
    pub const ALL: [YField; 3] = [YField::Obesity, YField::Smokes, YField::Healthcare];

    pub fn measure(&self) -> Measure {
        match self {
            YField::Obesity => Measure::Obesity,
            YField::Smokes => Measure::Smokes,
            YField::Healthcare => Measure::Healthcare,
        }
    }

    pub fn tooltip_label(&self) -> &'static str {
        match self {
            YField::Obesity => "% Obese",
            YField::Smokes => "% Smokes",
            YField::Healthcare => "% Lacking Healthcare",
        }
    }

    pub fn axis_title(&self) -> &'static str {
        match self {
            YField::Obesity => "Obese (%)",
            YField::Smokes => "Smoke (%)",
            YField::Healthcare => "Lack Healthcare (%)",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl From<XField> for Measure {
    fn from(field: XField) -> Self {
        field.measure()
    }
}

impl From<YField> for Measure {
    fn from(field: YField) -> Self {
        field.measure()
    }
}

/// A label click, naming the axis and the field to show on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldSelection {
    X(XField),
    Y(YField),
}

impl FieldSelection {
    pub fn axis(&self) -> Axis {
        match self {
            FieldSelection::X(_) => Axis::X,
            FieldSelection::Y(_) => Axis::Y,
        }
    }

    pub fn measure(&self) -> Measure {
        match self {
            FieldSelection::X(field) => field.measure(),
            FieldSelection::Y(field) => field.measure(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldSelection::X(field) => field.into(),
            FieldSelection::Y(field) => field.into(),
        }
    }

    /// Position of the field's label among the labels of its axis
    pub fn index(&self) -> usize {
        match self {
            FieldSelection::X(field) => field.index(),
            FieldSelection::Y(field) => field.index(),
        }
    }
}

impl FromStr for FieldSelection {
    type Err = ChartError;

    /// Parses a field name such as `income` or `smokes`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if let Ok(field) = name.parse::<XField>() {
            return Ok(FieldSelection::X(field));
        }
        if let Ok(field) = name.parse::<YField>() {
            return Ok(FieldSelection::Y(field));
        }
        Err(ChartError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for FieldSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("age", FieldSelection::X(XField::Age))]
    #[case("Income", FieldSelection::X(XField::Income))]
    #[case("poverty", FieldSelection::X(XField::Poverty))]
    #[case("obesity", FieldSelection::Y(YField::Obesity))]
    #[case(" smokes ", FieldSelection::Y(YField::Smokes))]
    #[case("healthcare", FieldSelection::Y(YField::Healthcare))]
    fn test_parse_selection(#[case] text: &str, #[case] expected: FieldSelection) {
        assert_eq!(text.parse::<FieldSelection>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field() {
        let err = "obesityLow".parse::<FieldSelection>().unwrap_err();
        assert!(matches!(err, ChartError::UnknownField(name) if name == "obesityLow"));
    }

    #[test]
    fn test_label_text() {
        let labels: Vec<_> = XField::ALL.iter().map(|f| f.tooltip_label()).collect();
        assert_eq!(labels, ["Median Age", "Median Household Income", "Poverty Rate"]);
        let labels: Vec<_> = YField::ALL.iter().map(|f| f.tooltip_label()).collect();
        assert_eq!(labels, ["% Obese", "% Smokes", "% Lacking Healthcare"]);
        assert_eq!(YField::Healthcare.axis_title(), "Lack Healthcare (%)");
    }

    #[test]
    fn test_index_round_trip() {
        for field in XField::ALL {
            assert_eq!(XField::from_index(field.index()), Some(field));
        }
        assert_eq!(YField::from_index(2), Some(YField::Healthcare));
        assert_eq!(YField::from_index(3), None);
        assert_eq!(FieldSelection::Y(YField::Smokes).to_string(), "smokes");
        assert_eq!(XField::VARIANTS, &["age", "income", "poverty"]);
    }
}
