use serde::{Deserialize, Serialize};

use crate::data::Measure;
use crate::fields::{Axis, FieldSelection, XField, YField};

/// Fields currently shown on the X and Y axes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionState {
    pub x: XField,
    pub y: YField,
}

impl SelectionState {
    pub fn new(x: XField, y: YField) -> Self {
        Self { x, y }
    }

    /// State after a label click, or `None` when the clicked field is
    /// already shown on its axis
    pub fn select(self, selection: FieldSelection) -> Option<SelectionState> {
        match selection {
            FieldSelection::X(x) if x != self.x => Some(Self { x, ..self }),
            FieldSelection::Y(y) if y != self.y => Some(Self { y, ..self }),
            _ => None,
        }
    }

    pub fn field(&self, axis: Axis) -> Measure {
        match axis {
            Axis::X => self.x.measure(),
            Axis::Y => self.y.measure(),
        }
    }

    pub fn is_active(&self, selection: FieldSelection) -> bool {
        match selection {
            FieldSelection::X(x) => x == self.x,
            FieldSelection::Y(y) => y == self.y,
        }
    }

    /// Active flag of each label of an axis, in label order
    pub fn label_states(&self, axis: Axis) -> [bool; 3] {
        match axis {
            Axis::X => XField::ALL.map(|x| x == self.x),
            Axis::Y => YField::ALL.map(|y| y == self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_initial_state() {
        let state = SelectionState::default();
        assert_eq!(state, SelectionState::new(XField::Age, YField::Obesity));
        assert_eq!(state.label_states(Axis::X), [true, false, false]);
        assert_eq!(state.label_states(Axis::Y), [true, false, false]);
    }

    #[rstest]
    #[case(FieldSelection::X(XField::Age))]
    #[case(FieldSelection::Y(YField::Obesity))]
    fn test_self_transition_is_none(#[case] selection: FieldSelection) {
        assert_eq!(SelectionState::default().select(selection), None);
    }

    #[test]
    fn test_select_changes_one_axis() {
        let state = SelectionState::default()
            .select(FieldSelection::Y(YField::Healthcare))
            .unwrap();
        assert_eq!(state, SelectionState::new(XField::Age, YField::Healthcare));
        assert_eq!(state.label_states(Axis::Y), [false, false, true]);
        assert_eq!(state.field(Axis::Y), Measure::Healthcare);
    }

    #[test]
    fn test_select_back_equals_single_select() {
        let initial = SelectionState::default();
        let there_and_back = initial
            .select(FieldSelection::X(XField::Income))
            .and_then(|s| s.select(FieldSelection::X(XField::Age)));
        assert_eq!(there_and_back, Some(initial));
        assert_eq!(initial.select(FieldSelection::X(XField::Age)), None);
    }

    #[test]
    fn test_exactly_one_active_label_per_axis() {
        let mut state = SelectionState::default();
        let clicks = [
            FieldSelection::X(XField::Poverty),
            FieldSelection::Y(YField::Smokes),
            FieldSelection::X(XField::Poverty),
            FieldSelection::X(XField::Income),
            FieldSelection::Y(YField::Obesity),
        ];
        for click in clicks {
            state = state.select(click).unwrap_or(state);
            for axis in [Axis::X, Axis::Y] {
                assert_eq!(state.label_states(axis).iter().filter(|a| **a).count(), 1);
            }
            assert!(state.is_active(click));
        }
    }
}
