use std::sync::Arc;

use riskplot_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use riskplot_scales::numeric::ContinuousNumericScale;

use crate::data::{Dataset, Measure, Record};
use crate::error::ChartError;
use crate::fields::{Axis, FieldSelection};
use crate::selection::SelectionState;

/// Padding factors applied to the data extent
const LOWER_PAD: f32 = 0.8;
const UPPER_PAD: f32 = 1.2;

/// Scale for one axis of the plot.
///
/// X maps `[min * 0.8, max * 1.2]` onto `[0, width]`. Y maps
/// `[max * 1.2, min * 0.8]` onto `[0, height]` so that larger values draw
/// higher on screen.
pub fn compute_domain_scale(
    records: &[Record],
    field: impl Into<Measure>,
    axis: Axis,
    dimensions: [f32; 2],
) -> Result<LinearNumericScale, ChartError> {
    let field = field.into();
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for (row, record) in records.iter().enumerate() {
        let value = record.value(field);
        if !value.is_finite() {
            return Err(ChartError::InvalidDataset {
                row,
                column: field.column().to_string(),
                value: value.to_string(),
            });
        }
        min = min.min(value);
        max = max.max(value);
    }

    let (domain, range) = match axis {
        Axis::X => ((min * LOWER_PAD, max * UPPER_PAD), (0.0, dimensions[0])),
        Axis::Y => ((max * UPPER_PAD, min * LOWER_PAD), (0.0, dimensions[1])),
    };
    Ok(LinearNumericScale::try_new(&LinearNumericScaleConfig {
        domain,
        range,
        ..Default::default()
    })?)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartScales {
    pub x: LinearNumericScale,
    pub y: LinearNumericScale,
}

impl ChartScales {
    pub fn compute(
        records: &[Record],
        selection: SelectionState,
        dimensions: [f32; 2],
    ) -> Result<Self, ChartError> {
        Ok(Self {
            x: compute_domain_scale(records, selection.x, Axis::X, dimensions)?,
            y: compute_domain_scale(records, selection.y, Axis::Y, dimensions)?,
        })
    }

    pub fn get(&self, axis: Axis) -> &LinearNumericScale {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }
}

/// Outcome of a label click that changed the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub axis: Axis,
    pub previous: SelectionState,
    pub current: SelectionState,
}

/// Owns the axis field selection and the scales derived from it
#[derive(Debug, Clone)]
pub struct AxisSelectionController {
    dataset: Arc<Dataset>,
    dimensions: [f32; 2],
    selection: SelectionState,
    scales: ChartScales,
}

impl AxisSelectionController {
    pub fn try_new(dataset: Arc<Dataset>, dimensions: [f32; 2]) -> Result<Self, ChartError> {
        Self::with_selection(dataset, dimensions, SelectionState::default())
    }

    pub fn with_selection(
        dataset: Arc<Dataset>,
        dimensions: [f32; 2],
        selection: SelectionState,
    ) -> Result<Self, ChartError> {
        let scales = ChartScales::compute(dataset.records(), selection, dimensions)?;
        Ok(Self {
            dataset,
            dimensions,
            selection,
            scales,
        })
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn dimensions(&self) -> [f32; 2] {
        self.dimensions
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn scales(&self) -> &ChartScales {
        &self.scales
    }

    /// Show `selection` on its axis.
    ///
    /// Clicking the field an axis already shows changes nothing and returns
    /// `None`. Otherwise both scales are recomputed.
    pub fn select_field(
        &mut self,
        selection: FieldSelection,
    ) -> Result<Option<SelectionChange>, ChartError> {
        let previous = self.selection;
        let Some(current) = previous.select(selection) else {
            log::debug!("{selection} already shown, ignoring");
            return Ok(None);
        };

        let scales = ChartScales::compute(self.dataset.records(), current, self.dimensions)?;
        self.selection = current;
        self.scales = scales;
        log::info!("{:?} axis now shows {selection}", selection.axis());

        Ok(Some(SelectionChange {
            axis: selection.axis(),
            previous,
            current,
        }))
    }

    pub fn label_states(&self, axis: Axis) -> [bool; 3] {
        self.selection.label_states(axis)
    }

    /// Pixel position of every record under the current scales
    pub fn point_positions(&self) -> Vec<[f32; 2]> {
        let x_field = self.selection.x.measure();
        let y_field = self.selection.y.measure();
        self.dataset
            .records()
            .iter()
            .map(|r| {
                [
                    self.scales.x.scale_scalar(r.value(x_field)),
                    self.scales.y.scale_scalar(r.value(y_field)),
                ]
            })
            .collect()
    }

    /// Tooltip text of a record: name, then the X and Y values with their labels
    pub fn tooltip_lines(&self, index: usize) -> Option<Vec<String>> {
        let record = self.dataset.records().get(index)?;
        let SelectionState { x, y } = self.selection;
        Some(vec![
            record.state.clone(),
            format!("{}: {}", x.tooltip_label(), record.value(x.measure())),
            format!("{}: {}", y.tooltip_label(), record.value(y.measure())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{XField, YField};
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    fn records() -> Vec<Record> {
        vec![
            Record::new("Alabama", "AL")
                .with_value(Measure::Age, 38.1)
                .with_value(Measure::Income, 42830.0)
                .with_value(Measure::Obesity, 32.6),
            Record::new("Alaska", "AK")
                .with_value(Measure::Age, 33.3)
                .with_value(Measure::Income, 71583.0)
                .with_value(Measure::Obesity, 29.7),
        ]
    }

    fn controller() -> AxisSelectionController {
        let dataset = Arc::new(Dataset::new(records()).unwrap());
        AxisSelectionController::try_new(dataset, [760.0, 360.0]).unwrap()
    }

    #[test]
    fn test_x_scale_pads_extent() {
        let scale = compute_domain_scale(&records(), XField::Age, Axis::X, [760.0, 360.0]).unwrap();
        let (d0, d1) = scale.domain();
        assert_approx_eq!(f32, d0, 33.3 * 0.8);
        assert_approx_eq!(f32, d1, 38.1 * 1.2);
        assert_eq!(scale.range(), (0.0, 760.0));
    }

    #[test]
    fn test_y_scale_is_inverted() {
        let scale = compute_domain_scale(&records(), YField::Obesity, Axis::Y, [760.0, 360.0]).unwrap();
        let (d0, d1) = scale.domain();
        assert_approx_eq!(f32, d0, 32.6 * 1.2);
        assert_approx_eq!(f32, d1, 29.7 * 0.8);
        assert_eq!(scale.range(), (0.0, 360.0));
        // larger values are higher on screen
        assert!(scale.scale_scalar(32.6) < scale.scale_scalar(29.7));
    }

    #[rstest]
    #[case(Measure::Age)]
    #[case(Measure::Income)]
    #[case(Measure::Obesity)]
    fn test_domain_contains_every_value(#[case] measure: Measure) {
        for axis in [Axis::X, Axis::Y] {
            let scale = compute_domain_scale(&records(), measure, axis, [100.0, 100.0]).unwrap();
            let (d0, d1) = scale.domain();
            let (lo, hi) = (d0.min(d1), d0.max(d1));
            for record in records() {
                let value = record.value(measure);
                assert!(lo <= value && value <= hi);
            }
        }
    }

    #[test]
    fn test_constant_field_centers_points() {
        // every record has poverty 0.0
        let scale = compute_domain_scale(&records(), Measure::Poverty, Axis::X, [760.0, 360.0]).unwrap();
        assert_eq!(scale.domain(), (0.0, 0.0));
        assert_approx_eq!(f32, scale.scale_scalar(0.0), 380.0);

        let mut controller = controller();
        controller.select_field(FieldSelection::X(XField::Poverty)).unwrap();
        for position in controller.point_positions() {
            assert_approx_eq!(f32, position[0], 380.0);
        }
    }

    #[test]
    fn test_empty_and_nan_rejected() {
        let err = compute_domain_scale(&[], Measure::Age, Axis::X, [1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ChartError::EmptyDataset));

        let bad = vec![Record::new("Alabama", "AL").with_value(Measure::Age, f32::NAN)];
        let err = compute_domain_scale(&bad, Measure::Age, Axis::X, [1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ChartError::InvalidDataset { row: 0, .. }));
    }

    #[test]
    fn test_select_current_field_is_noop() {
        let mut controller = controller();
        let scales = controller.scales().clone();
        assert_eq!(controller.select_field(FieldSelection::X(XField::Age)).unwrap(), None);
        assert_eq!(controller.select_field(FieldSelection::Y(YField::Obesity)).unwrap(), None);
        assert_eq!(controller.selection(), SelectionState::default());
        assert_eq!(controller.scales(), &scales);
    }

    #[test]
    fn test_select_income_keeps_y() {
        let mut controller = controller();
        let y_before = controller.scales().y.clone();

        let change = controller
            .select_field(FieldSelection::X(XField::Income))
            .unwrap()
            .unwrap();
        assert_eq!(change.axis, Axis::X);
        assert_eq!(change.previous, SelectionState::default());
        assert_eq!(change.current.x, XField::Income);

        let (d0, d1) = controller.scales().x.domain();
        assert_approx_eq!(f32, d0, 42830.0 * 0.8);
        assert_approx_eq!(f32, d1, 71583.0 * 1.2);
        assert_eq!(controller.scales().y, y_before);
        assert_eq!(controller.label_states(Axis::X), [false, true, false]);
    }

    #[test]
    fn test_tooltip_lines() {
        let controller = controller();
        assert_eq!(
            controller.tooltip_lines(0).unwrap(),
            vec!["Alabama", "Median Age: 38.1", "% Obese: 32.6"]
        );
        assert!(controller.tooltip_lines(2).is_none());
    }

    #[test]
    fn test_point_positions() {
        let controller = controller();
        let positions = controller.point_positions();
        let scales = controller.scales();
        assert_eq!(positions.len(), 2);
        assert_approx_eq!(f32, positions[0][0], scales.x.scale_scalar(38.1));
        assert_approx_eq!(f32, positions[0][1], scales.y.scale_scalar(32.6));
    }
}
