//! Chart state and the scene graph built from it.
//!
//! The root group sits at the top left corner of the plot area and holds,
//! in order: the X axis, the Y axis, the points, the X labels, the Y labels
//! and the tooltip. Event streams address marks by these positions.

use std::sync::Arc;
use std::time::Instant;

use riskplot_app::app::AppState;
use riskplot_app::transition::Tween;
use riskplot_common::types::ColorUtils;
use riskplot_guides::axis::numeric::make_numeric_axis_marks;
use riskplot_guides::axis::opts::{AxisConfig, AxisOrientation};
use riskplot_guides::tooltip::{make_tooltip_marks, TooltipConfig};
use riskplot_scales::numeric::ContinuousNumericScale;
use riskplot_scenegraph::marks::group::SceneGroup;
use riskplot_scenegraph::marks::symbol::{size_for_radius, SceneSymbolMark};
use riskplot_scenegraph::marks::text::SceneTextMark;
use riskplot_scenegraph::scene_graph::SceneGraph;
use riskplot_text::types::{FontWeight, FontWeightNameSpec, TextAlign, TextBaseline};

use crate::config::{ChartColors, ChartConfig};
use crate::controller::{AxisSelectionController, ChartScales, SelectionChange};
use crate::data::Dataset;
use crate::error::ChartError;
use crate::fields::{Axis, FieldSelection, XField, YField};
use crate::selection::SelectionState;

pub const X_AXIS_PATH: [usize; 2] = [0, 0];
pub const Y_AXIS_PATH: [usize; 2] = [0, 1];
pub const POINTS_PATH: [usize; 2] = [0, 2];
pub const CIRCLES_PATH: [usize; 3] = [0, 2, 0];
pub const ABBR_PATH: [usize; 3] = [0, 2, 1];
pub const X_LABELS_PATH: [usize; 3] = [0, 3, 0];
pub const Y_LABELS_PATH: [usize; 3] = [0, 4, 0];
pub const TOOLTIP_PATH: [usize; 2] = [0, 5];

/// Offsets of the axis labels below the plot, in label order
const X_LABEL_Y: [f32; 3] = [25.0, 50.0, 75.0];
/// Offsets of the rotated axis labels from the left edge, in label order
const Y_LABEL_X: [f32; 3] = [5.0, 30.0, 55.0];
/// Gap between the bottom of the plot and the X labels
const X_LABEL_GAP: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct ChartState {
    config: Arc<ChartConfig>,
    colors: ChartColors,
    controller: AxisSelectionController,
    x_domain: Tween<(f32, f32)>,
    y_domain: Tween<(f32, f32)>,
    positions: Tween<Vec<[f32; 2]>>,
    hovered: Option<usize>,
}

impl ChartState {
    pub fn try_new(dataset: Arc<Dataset>, config: ChartConfig) -> Result<Self, ChartError> {
        let colors = config.colors()?;
        let controller = AxisSelectionController::try_new(dataset, config.plot_dimensions())?;
        let duration = config.transition_duration();
        let scales = controller.scales();
        Ok(Self {
            x_domain: Tween::new(scales.x.domain(), duration),
            y_domain: Tween::new(scales.y.domain(), duration),
            positions: Tween::new(controller.point_positions(), duration),
            config: Arc::new(config),
            colors,
            controller,
            hovered: None,
        })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn controller(&self) -> &AxisSelectionController {
        &self.controller
    }

    pub fn selection(&self) -> SelectionState {
        self.controller.selection()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Returns whether the hovered point changed
    pub fn set_hovered(&mut self, hovered: Option<usize>) -> bool {
        let hovered = hovered.filter(|i| *i < self.controller.dataset().len());
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Apply a label click and start the transitions it causes.
    ///
    /// The clicked axis animates toward its new domain and every point
    /// animates toward its new position, starting from what is displayed
    /// at `instant`.
    pub fn select_field(
        &mut self,
        selection: FieldSelection,
        instant: Instant,
    ) -> Result<Option<SelectionChange>, ChartError> {
        let Some(change) = self.controller.select_field(selection)? else {
            return Ok(None);
        };

        let scales = self.controller.scales();
        match change.axis {
            Axis::X => self.x_domain.retarget(scales.x.domain(), instant),
            Axis::Y => self.y_domain.retarget(scales.y.domain(), instant),
        }
        self.positions
            .retarget(self.controller.point_positions(), instant);
        log::debug!(
            "transition to {:?} started, {} ms",
            change.current,
            self.config.transition_ms
        );
        Ok(Some(change))
    }

    /// Scales as displayed at `instant`, with domains part way through any
    /// running transition
    pub fn displayed_scales(&self, instant: Instant) -> ChartScales {
        let scales = self.controller.scales();
        ChartScales {
            x: scales.x.clone().with_domain(self.x_domain.sample(instant)),
            y: scales.y.clone().with_domain(self.y_domain.sample(instant)),
        }
    }

    /// Point positions as displayed at `instant`
    pub fn displayed_positions(&self, instant: Instant) -> Vec<[f32; 2]> {
        self.positions.sample(instant)
    }
}

impl AppState for ChartState {
    fn is_animating(&self, instant: Instant) -> bool {
        self.x_domain.is_active(instant)
            || self.y_domain.is_active(instant)
            || self.positions.is_active(instant)
    }
}

pub fn make_scene_graph(state: &ChartState, instant: Instant) -> Result<SceneGraph, ChartError> {
    let config = state.config();
    let [width, height] = config.plot_dimensions();
    let scales = state.displayed_scales(instant);
    let positions = state.displayed_positions(instant);

    // Axes
    let axis_config = |orientation| AxisConfig {
        orientation,
        tick_count: config.tick_count,
        font_size: config.axis_font_size,
        ..Default::default()
    };
    let x_axis = make_numeric_axis_marks(
        &scales.x,
        "",
        [0.0, height],
        &axis_config(AxisOrientation::Bottom),
    )?;
    let y_axis = make_numeric_axis_marks(&scales.y, "", [0.0, 0.0], &axis_config(AxisOrientation::Left))?;

    let root = SceneGroup {
        name: "chart".to_string(),
        origin: [config.margin.left, config.margin.top],
        ..Default::default()
    }
    .with_mark(x_axis)
    .with_mark(y_axis)
    .with_mark(make_points(state, &positions))
    .with_mark(make_x_labels(state, width, height))
    .with_mark(make_y_labels(state, height))
    .with_mark(make_tooltip(state, &positions)?);

    Ok(SceneGraph {
        marks: vec![root.into()],
        width: config.width,
        height: config.height,
        origin: [0.0, 0.0],
    })
}

fn make_points(state: &ChartState, positions: &[[f32; 2]]) -> SceneGroup {
    let config = state.config();
    let colors = &state.colors;
    let records = state.controller.dataset().records();
    let len = positions.len() as u32;
    let x: Vec<f32> = positions.iter().map(|p| p[0]).collect();
    let y: Vec<f32> = positions.iter().map(|p| p[1]).collect();

    let circles = SceneSymbolMark {
        name: "stateCircle".to_string(),
        len,
        x: x.clone().into(),
        y: y.clone().into(),
        size: size_for_radius(config.point_radius).into(),
        fill: colors.point_fill.with_opacity(config.point_opacity).into(),
        stroke: colors.point_stroke.with_opacity(config.point_opacity).into(),
        stroke_width: Some(1.0),
        ..Default::default()
    };

    let abbrs = SceneTextMark {
        name: "stateText".to_string(),
        len,
        text: records
            .iter()
            .map(|r| r.abbr.clone())
            .collect::<Vec<_>>()
            .into(),
        x: x.into(),
        y: y.into(),
        align: TextAlign::Center.into(),
        baseline: TextBaseline::Middle.into(),
        color: colors.point_text.into(),
        font_size: config.point_font_size.into(),
        ..Default::default()
    };

    SceneGroup {
        name: "points".to_string(),
        ..Default::default()
    }
    .with_mark(circles)
    .with_mark(abbrs)
}

fn label_weight(active: bool) -> FontWeight {
    if active {
        FontWeight::Name(FontWeightNameSpec::Bold)
    } else {
        FontWeight::Name(FontWeightNameSpec::Normal)
    }
}

/// Label text mark with the active label bold and dark
fn make_label_mark(state: &ChartState, name: &str, axis: Axis, titles: Vec<String>) -> SceneTextMark {
    let colors = &state.colors;
    let active = state.selection().label_states(axis);
    SceneTextMark {
        name: name.to_string(),
        len: titles.len() as u32,
        text: titles.into(),
        align: TextAlign::Center.into(),
        baseline: TextBaseline::Alphabetic.into(),
        color: active
            .iter()
            .map(|a| if *a { colors.active_label } else { colors.inactive_label })
            .collect::<Vec<_>>()
            .into(),
        font_weight: active.iter().map(|a| label_weight(*a)).collect::<Vec<_>>().into(),
        font_size: state.config().label_font_size.into(),
        ..Default::default()
    }
}

fn make_x_labels(state: &ChartState, width: f32, height: f32) -> SceneGroup {
    let titles = XField::ALL.iter().map(|f| f.axis_title().to_string()).collect();
    let labels = SceneTextMark {
        x: 0.0f32.into(),
        y: X_LABEL_Y.to_vec().into(),
        ..make_label_mark(state, "xLabel", Axis::X, titles)
    };
    SceneGroup {
        name: "x_labels".to_string(),
        origin: [width / 2.0, height + X_LABEL_GAP],
        ..Default::default()
    }
    .with_mark(labels)
}

fn make_y_labels(state: &ChartState, height: f32) -> SceneGroup {
    let font_size = state.config().label_font_size;
    let titles = YField::ALL.iter().map(|f| f.axis_title().to_string()).collect();
    // Rotated a quarter turn counterclockwise, so the offset from the left
    // edge runs along x and each label's first line sits one em further in
    let labels = SceneTextMark {
        x: Y_LABEL_X.iter().map(|x| x + font_size).collect::<Vec<_>>().into(),
        y: 0.0f32.into(),
        angle: (-90.0f32).into(),
        ..make_label_mark(state, "yLabel", Axis::Y, titles)
    };
    SceneGroup {
        name: "y_labels".to_string(),
        origin: [-state.config().margin.left, height / 2.0],
        ..Default::default()
    }
    .with_mark(labels)
}

fn make_tooltip(state: &ChartState, positions: &[[f32; 2]]) -> Result<SceneGroup, ChartError> {
    let empty = SceneGroup {
        name: "tooltip".to_string(),
        interactive: false,
        ..Default::default()
    };
    let Some(index) = state.hovered() else {
        return Ok(empty);
    };
    let (Some(lines), Some(position)) = (state.controller.tooltip_lines(index), positions.get(index))
    else {
        return Ok(empty);
    };

    let config = state.config();
    // Top center of the hovered circle
    let anchor = [position[0], position[1] - config.point_radius];
    Ok(make_tooltip_marks(
        &lines,
        anchor,
        &TooltipConfig {
            offset: config.tooltip_offset,
            font_size: config.tooltip_font_size,
            ..Default::default()
        },
    )?)
}
