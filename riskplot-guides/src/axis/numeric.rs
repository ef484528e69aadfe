use riskplot_geometry::marks::MarkGeometryUtils;
use riskplot_scales::error::RiskplotScaleError;
use riskplot_scales::numeric::ContinuousNumericScale;
use riskplot_scenegraph::marks::{group::SceneGroup, rule::SceneRuleMark, text::SceneTextMark};
use riskplot_text::types::{FontWeight, FontWeightNameSpec, TextAlign, TextBaseline};

use super::opts::{AxisConfig, AxisOrientation};
use crate::error::RiskplotGuidesError;

/// Shift that puts one pixel wide lines on the pixel grid
const PIXEL_OFFSET: f32 = 0.5;

/// Build the marks of an axis for a continuous numeric scale.
///
/// The axis line sits at `y = 0` (horizontal axes) or `x = 0` (vertical
/// axes) of the returned group, which is placed at `origin`. Ticks and
/// labels are drawn on the side named by the orientation. An empty `title`
/// draws no title.
pub fn make_numeric_axis_marks(
    scale: &impl ContinuousNumericScale,
    title: &str,
    origin: [f32; 2],
    config: &AxisConfig,
) -> Result<SceneGroup, RiskplotGuidesError> {
    let (d0, d1) = scale.domain();
    if !d0.is_finite() || !d1.is_finite() {
        return Err(RiskplotScaleError::NonFiniteDomain(d0, d1).into());
    }
    if config.tick_count.is_nan() || config.tick_count <= 0.0 {
        return Err(RiskplotScaleError::InvalidTickCount(config.tick_count).into());
    }

    let orientation = config.orientation;
    let horizontal = orientation.is_horizontal();
    let k = orientation.direction();

    let mut group = SceneGroup {
        name: format!("{}_axis", orientation.as_str()),
        ..Default::default()
    };

    let ticks = scale.ticks(Some(config.tick_count));
    let positions: Vec<f32> = ticks
        .iter()
        .map(|t| scale.scale_scalar(*t) + PIXEL_OFFSET)
        .collect();
    let formatter = scale.tick_format(Some(config.tick_count));
    let len = ticks.len() as u32;

    // Tick lines
    let tick_end = k * config.tick_size;
    let mut tick_mark = SceneRuleMark {
        name: "axis_ticks".to_string(),
        len,
        clip: false,
        stroke: config.stroke.into(),
        stroke_width: 1.0f32.into(),
        ..Default::default()
    };
    if horizontal {
        tick_mark.x = positions.clone().into();
        tick_mark.x2 = positions.clone().into();
        tick_mark.y2 = tick_end.into();
    } else {
        tick_mark.y = positions.clone().into();
        tick_mark.y2 = positions.clone().into();
        tick_mark.x2 = tick_end.into();
    }
    group.marks.push(tick_mark.into());

    // Domain line with an outer tick at each end, as [along0, across0, along1, across1]
    let (r0, r1) = scale.range();
    let (r0, r1) = (r0 + PIXEL_OFFSET, r1 + PIXEL_OFFSET);
    let outer = k * config.outer_tick_size;
    let segments = [
        [r0, outer, r0, PIXEL_OFFSET],
        [r0, PIXEL_OFFSET, r1, PIXEL_OFFSET],
        [r1, PIXEL_OFFSET, r1, outer],
    ];
    let (along0, across0, along1, across1): (Vec<f32>, Vec<f32>, Vec<f32>, Vec<f32>) = (
        segments.iter().map(|s| s[0]).collect(),
        segments.iter().map(|s| s[1]).collect(),
        segments.iter().map(|s| s[2]).collect(),
        segments.iter().map(|s| s[3]).collect(),
    );
    let (x, y, x2, y2) = if horizontal {
        (along0, across0, along1, across1)
    } else {
        (across0, along0, across1, along1)
    };
    group.marks.push(
        SceneRuleMark {
            name: "axis_domain".to_string(),
            len: segments.len() as u32,
            clip: false,
            x: x.into(),
            y: y.into(),
            x2: x2.into(),
            y2: y2.into(),
            stroke: config.stroke.into(),
            stroke_width: 1.0f32.into(),
            ..Default::default()
        }
        .into(),
    );

    // Tick labels
    let label_offset = k * (config.tick_size.max(0.0) + config.tick_padding);
    let (x, y, align, baseline) = match orientation {
        AxisOrientation::Bottom => (
            positions.into(),
            label_offset.into(),
            TextAlign::Center,
            TextBaseline::Top,
        ),
        AxisOrientation::Top => (
            positions.into(),
            label_offset.into(),
            TextAlign::Center,
            TextBaseline::Bottom,
        ),
        AxisOrientation::Left => (
            label_offset.into(),
            positions.into(),
            TextAlign::Right,
            TextBaseline::Middle,
        ),
        AxisOrientation::Right => (
            label_offset.into(),
            positions.into(),
            TextAlign::Left,
            TextBaseline::Middle,
        ),
    };
    group.marks.push(
        SceneTextMark {
            name: "axis_labels".to_string(),
            len,
            clip: false,
            text: formatter.format_all(&ticks).into(),
            x,
            y,
            align: align.into(),
            baseline: baseline.into(),
            color: config.text_color.into(),
            font_size: config.font_size.into(),
            ..Default::default()
        }
        .into(),
    );

    if !title.is_empty() {
        // Place the title just outside everything drawn so far
        let bbox = group.bounding_box();
        let mid = (r0 + r1) / 2.0;
        let pad = config.title_padding;
        let (x, y, angle, baseline) = match orientation {
            AxisOrientation::Bottom => (mid, bbox.upper()[1] + pad, 0.0f32, TextBaseline::Top),
            AxisOrientation::Top => (mid, bbox.lower()[1] - pad, 0.0, TextBaseline::Bottom),
            AxisOrientation::Left => (bbox.lower()[0] - pad, mid, -90.0, TextBaseline::LineBottom),
            AxisOrientation::Right => (bbox.upper()[0] + pad, mid, 90.0, TextBaseline::LineBottom),
        };
        group.marks.push(
            SceneTextMark {
                name: "axis_title".to_string(),
                clip: false,
                text: title.into(),
                x: x.into(),
                y: y.into(),
                align: TextAlign::Center.into(),
                baseline: baseline.into(),
                angle: angle.into(),
                color: config.text_color.into(),
                font_size: config.title_font_size.into(),
                font_weight: FontWeight::Name(FontWeightNameSpec::Bold).into(),
                ..Default::default()
            }
            .into(),
        );
    }

    group.origin = origin;
    Ok(group)
}
