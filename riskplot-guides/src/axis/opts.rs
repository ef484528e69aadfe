use riskplot_common::types::{Rgba, BLACK};

/// Side of the axis line that ticks and labels are drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrientation {
    Top,
    Bottom,
    Left,
    Right,
}

impl AxisOrientation {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, AxisOrientation::Top | AxisOrientation::Bottom)
    }

    /// +1 when ticks point toward increasing pixel coordinates, -1 otherwise
    pub fn direction(&self) -> f32 {
        match self {
            AxisOrientation::Top | AxisOrientation::Left => -1.0,
            AxisOrientation::Bottom | AxisOrientation::Right => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AxisOrientation::Top => "top",
            AxisOrientation::Bottom => "bottom",
            AxisOrientation::Left => "left",
            AxisOrientation::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    pub orientation: AxisOrientation,
    /// Requested number of ticks, the scale may return a few more or less
    pub tick_count: f32,
    /// Length of the inner tick lines
    pub tick_size: f32,
    /// Length of the ticks at both ends of the domain line
    pub outer_tick_size: f32,
    /// Gap between a tick line and its label
    pub tick_padding: f32,
    pub font_size: f32,
    pub title_font_size: f32,
    /// Gap between the tick labels and the title
    pub title_padding: f32,
    pub stroke: Rgba,
    pub text_color: Rgba,
}

impl AxisConfig {
    pub fn new(orientation: AxisOrientation) -> Self {
        Self {
            orientation,
            ..Default::default()
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            orientation: AxisOrientation::Bottom,
            tick_count: 10.0,
            tick_size: 6.0,
            outer_tick_size: 6.0,
            tick_padding: 3.0,
            font_size: 10.0,
            title_font_size: 12.0,
            title_padding: 4.0,
            stroke: BLACK,
            text_color: BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AxisOrientation::Top, true, -1.0)]
    #[case(AxisOrientation::Bottom, true, 1.0)]
    #[case(AxisOrientation::Left, false, -1.0)]
    #[case(AxisOrientation::Right, false, 1.0)]
    fn test_orientation(
        #[case] orientation: AxisOrientation,
        #[case] horizontal: bool,
        #[case] direction: f32,
    ) {
        assert_eq!(orientation.is_horizontal(), horizontal);
        assert_eq!(orientation.direction(), direction);
        assert_eq!(AxisConfig::new(orientation).orientation, orientation);
    }
}
