use riskplot_common::types::{Rgba, WHITE};
use riskplot_scenegraph::marks::{group::SceneGroup, rect::SceneRectMark, text::SceneTextMark};
use riskplot_text::measurement::{default_text_measurer, TextMeasurementConfig, TextMeasurer};
use riskplot_text::types::{FontStyle, FontWeight, TextAlign, TextBaseline};

use crate::error::RiskplotGuidesError;

/// Tooltip box drawn above a target point
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipConfig {
    /// Shift applied after placement, as `[top, left]`
    pub offset: [f32; 2],
    pub font: String,
    pub font_size: f32,
    pub line_height: f32,
    pub padding: f32,
    pub corner_radius: f32,
    pub fill: Rgba,
    pub text_color: Rgba,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            font: "sans-serif".to_string(),
            font_size: 12.0,
            line_height: 16.0,
            padding: 8.0,
            corner_radius: 2.0,
            fill: [0.0, 0.0, 0.0, 0.8],
            text_color: WHITE,
        }
    }
}

/// Build a tooltip box holding one text line per entry of `lines`.
///
/// The box is centered horizontally on `anchor` with its bottom edge on it,
/// which is where a tooltip pointing down at the top of a target sits, and
/// is then shifted down by `offset[0]` and right by `offset[1]`.
pub fn make_tooltip_marks(
    lines: &[String],
    anchor: [f32; 2],
    config: &TooltipConfig,
) -> Result<SceneGroup, RiskplotGuidesError> {
    if lines.is_empty() {
        return Err(RiskplotGuidesError::EmptyTooltip);
    }
    if !anchor[0].is_finite() || !anchor[1].is_finite() {
        return Err(RiskplotGuidesError::InvalidAnchor(anchor));
    }

    let measurer = default_text_measurer();
    let font_weight = FontWeight::default();
    let font_style = FontStyle::Normal;
    let text_width = lines
        .iter()
        .map(|line| {
            measurer
                .measure_text_bounds(&TextMeasurementConfig {
                    text: line,
                    font: &config.font,
                    font_size: config.font_size,
                    font_weight: &font_weight,
                    font_style: &font_style,
                })
                .width
        })
        .fold(0.0f32, f32::max);

    let width = text_width + 2.0 * config.padding;
    let height = lines.len() as f32 * config.line_height + 2.0 * config.padding;
    let left = anchor[0] - width / 2.0 + config.offset[1];
    let top = anchor[1] - height + config.offset[0];

    let line_y: Vec<f32> = (0..lines.len())
        .map(|i| config.padding + i as f32 * config.line_height)
        .collect();

    Ok(SceneGroup {
        name: "tooltip".to_string(),
        origin: [left, top],
        interactive: false,
        ..Default::default()
    }
    .with_mark(SceneRectMark {
        name: "tooltip_box".to_string(),
        clip: false,
        width: width.into(),
        height: height.into(),
        fill: config.fill.into(),
        corner_radius: config.corner_radius.into(),
        ..Default::default()
    })
    .with_mark(SceneTextMark {
        name: "tooltip_text".to_string(),
        clip: false,
        len: lines.len() as u32,
        text: lines.to_vec().into(),
        x: config.padding.into(),
        y: line_y.into(),
        align: TextAlign::Left.into(),
        baseline: TextBaseline::Top.into(),
        color: config.text_color.into(),
        font: config.font.clone().into(),
        font_size: config.font_size.into(),
        ..Default::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use riskplot_scenegraph::marks::mark::SceneMark;

    fn lines() -> Vec<String> {
        vec![
            "Alabama".to_string(),
            "Median Age: 38.1".to_string(),
            "% Obese: 32.6".to_string(),
        ]
    }

    #[test]
    fn test_box_sits_above_anchor() {
        let config = TooltipConfig::default();
        let group = make_tooltip_marks(&lines(), [200.0, 100.0], &config).unwrap();
        assert_eq!(group.marks.len(), 2);
        assert!(!group.interactive);

        let SceneMark::Rect(rect) = &group.marks[0] else {
            panic!("expected tooltip box");
        };
        let width = *rect.width.get(0).unwrap();
        let height = *rect.height.get(0).unwrap();
        assert_approx_eq!(f32, height, 3.0 * 16.0 + 16.0);
        assert_approx_eq!(f32, group.origin[0] + width / 2.0, 200.0);
        assert_approx_eq!(f32, group.origin[1] + height, 100.0);

        // Widest line sets the width
        assert!(width > "Median Age: 38.1".len() as f32 * 12.0 * 0.5);
    }

    #[test]
    fn test_offset_is_top_then_left() {
        let base = make_tooltip_marks(&lines(), [0.0, 0.0], &Default::default()).unwrap();
        let config = TooltipConfig {
            offset: [80.0, -60.0],
            ..Default::default()
        };
        let shifted = make_tooltip_marks(&lines(), [0.0, 0.0], &config).unwrap();
        assert_approx_eq!(f32, shifted.origin[0] - base.origin[0], -60.0);
        assert_approx_eq!(f32, shifted.origin[1] - base.origin[1], 80.0);
    }

    #[test]
    fn test_text_lines_stack() {
        let group = make_tooltip_marks(&lines(), [0.0, 0.0], &Default::default()).unwrap();
        let SceneMark::Text(text) = &group.marks[1] else {
            panic!("expected tooltip text");
        };
        let ys: Vec<f32> = text.y_iter().cloned().collect();
        assert_eq!(ys, vec![8.0, 24.0, 40.0]);
        assert_eq!(text.text_iter().next().unwrap(), "Alabama");
    }

    #[test]
    fn test_rejects_empty_and_nan() {
        assert_eq!(
            make_tooltip_marks(&[], [0.0, 0.0], &Default::default()),
            Err(RiskplotGuidesError::EmptyTooltip)
        );
        assert!(matches!(
            make_tooltip_marks(&lines(), [f32::NAN, 0.0], &Default::default()),
            Err(RiskplotGuidesError::InvalidAnchor(_))
        ));
    }
}
