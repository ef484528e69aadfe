use super::mark::SceneMark;
use itertools::izip;
use riskplot_common::types::{Rgba, TRANSPARENT};
use riskplot_common::value::ScalarOrArray;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Circle symbols centered on `(x, y)`.
///
/// `size` is the symbol area in square pixels, so a circle of radius `r` has
/// size `PI * r^2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SceneSymbolMark {
    pub name: String,
    pub clip: bool,
    pub len: u32,
    pub stroke_width: Option<f32>,
    pub x: ScalarOrArray<f32>,
    pub y: ScalarOrArray<f32>,
    pub fill: ScalarOrArray<Rgba>,
    pub size: ScalarOrArray<f32>,
    pub stroke: ScalarOrArray<Rgba>,
    pub indices: Option<Arc<Vec<usize>>>,
    pub zindex: Option<i32>,
}

/// Symbol size for a circle of the given radius
pub fn size_for_radius(radius: f32) -> f32 {
    std::f32::consts::PI * radius * radius
}

impl SceneSymbolMark {
    pub fn x_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.x.as_iter(self.len as usize, self.indices.as_deref())
    }

    pub fn x_vec(&self) -> Vec<f32> {
        self.x.as_vec(self.len as usize, self.indices.as_deref())
    }

    pub fn y_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.y.as_iter(self.len as usize, self.indices.as_deref())
    }

    pub fn y_vec(&self) -> Vec<f32> {
        self.y.as_vec(self.len as usize, self.indices.as_deref())
    }

    pub fn fill_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.fill.as_iter(self.len as usize, self.indices.as_deref())
    }

    pub fn size_iter(&self) -> Box<dyn Iterator<Item = &f32> + '_> {
        self.size.as_iter(self.len as usize, self.indices.as_deref())
    }

    pub fn stroke_iter(&self) -> Box<dyn Iterator<Item = &Rgba> + '_> {
        self.stroke
            .as_iter(self.len as usize, self.indices.as_deref())
    }

    pub fn indices_iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        if let Some(indices) = self.indices.as_ref() {
            Box::new(indices.iter().cloned())
        } else {
            Box::new(0..self.len as usize)
        }
    }

    /// `(center, radius)` of each circle, shifted by `origin`
    pub fn circle_iter(&self, origin: [f32; 2]) -> Box<dyn Iterator<Item = ([f32; 2], f32)> + '_> {
        Box::new(
            izip!(self.x_iter(), self.y_iter(), self.size_iter()).map(move |(x, y, size)| {
                (
                    [*x + origin[0], *y + origin[1]],
                    (size.max(0.0) / std::f32::consts::PI).sqrt(),
                )
            }),
        )
    }

    pub fn single_symbol_mark(&self, index: usize) -> SceneSymbolMark {
        let mut mark = self.clone();
        mark.len = 1;
        mark.indices = Some(Arc::new(vec![index]));
        mark
    }
}

impl Default for SceneSymbolMark {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            clip: true,
            stroke_width: None,
            len: 1,
            x: ScalarOrArray::new_scalar(0.0),
            y: ScalarOrArray::new_scalar(0.0),
            fill: ScalarOrArray::new_scalar(TRANSPARENT),
            size: ScalarOrArray::new_scalar(20.0),
            stroke: ScalarOrArray::new_scalar(TRANSPARENT),
            indices: None,
            zindex: None,
        }
    }
}

impl From<SceneSymbolMark> for SceneMark {
    fn from(mark: SceneSymbolMark) -> Self {
        SceneMark::Symbol(mark)
    }
}
