use crate::marks::mark::SceneMark;
use crate::marks::rect::SceneRectMark;
use riskplot_common::types::{Rgba, TRANSPARENT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Clip {
    #[default]
    None,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl Clip {
    pub fn translate(&self, translate_x: f32, translate_y: f32) -> Self {
        match self {
            Clip::None => Clip::None,
            Clip::Rect {
                x,
                y,
                width,
                height,
            } => Clip::Rect {
                x: *x + translate_x,
                y: *y + translate_y,
                width: *width,
                height: *height,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGroup {
    pub name: String,
    /// Offset of the group relative to its parent
    pub origin: [f32; 2],
    pub clip: Clip,
    pub marks: Vec<SceneMark>,
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub stroke_width: Option<f32>,
    pub zindex: Option<i32>,
    /// Whether marks in the group can be picked by the pointer
    pub interactive: bool,
}

impl SceneGroup {
    /// Background rect for groups that have a rectangular clip and a fill or stroke
    pub fn make_rect_mark(&self) -> Option<SceneRectMark> {
        if self.fill.is_none() && self.stroke.is_none() {
            return None;
        }
        let Clip::Rect {
            x,
            y,
            width,
            height,
        } = &self.clip
        else {
            return None;
        };
        let stroke_width = self
            .stroke_width
            .unwrap_or(if self.stroke.is_some() { 1.0 } else { 0.0 });

        Some(SceneRectMark {
            name: format!("rect_{}", self.name),
            x: (*x).into(),
            y: (*y).into(),
            width: (*width).into(),
            height: (*height).into(),
            fill: self.fill.unwrap_or(TRANSPARENT).into(),
            stroke: self.stroke.unwrap_or(TRANSPARENT).into(),
            stroke_width: stroke_width.into(),
            zindex: self.zindex,
            ..Default::default()
        })
    }

    pub fn group_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = vec![];
        for (index, mark) in self.marks.iter().enumerate() {
            let SceneMark::Group(group) = mark else {
                continue;
            };
            paths.push(vec![index]);
            for sub_path in group.group_paths() {
                let mut path = vec![index];
                path.extend(sub_path);
                paths.push(path);
            }
        }
        paths
    }

    pub fn with_mark(mut self, mark: impl Into<SceneMark>) -> Self {
        self.marks.push(mark.into());
        self
    }
}

impl Default for SceneGroup {
    fn default() -> Self {
        Self {
            name: "".to_string(),
            origin: [0.0, 0.0],
            clip: Default::default(),
            marks: vec![],
            fill: None,
            stroke: None,
            stroke_width: None,
            zindex: None,
            interactive: true,
        }
    }
}

impl From<SceneGroup> for SceneMark {
    fn from(mark: SceneGroup) -> Self {
        SceneMark::Group(mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskplot_common::types::WHITE;

    #[test]
    fn test_group_paths_nested() {
        let inner = SceneGroup {
            name: "inner".to_string(),
            ..Default::default()
        };
        let outer = SceneGroup {
            name: "outer".to_string(),
            marks: vec![SceneRectMark::default().into(), inner.into()],
            ..Default::default()
        };
        let root = SceneGroup::default().with_mark(outer);
        assert_eq!(root.group_paths(), vec![vec![0], vec![0, 1]]);
    }

    #[test]
    fn test_background_rect() {
        let mut group = SceneGroup {
            name: "tooltip".to_string(),
            fill: Some(WHITE),
            ..Default::default()
        };
        assert!(group.make_rect_mark().is_none());

        group.clip = Clip::Rect {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 20.0,
        };
        let rect = group.make_rect_mark().unwrap();
        assert_eq!(rect.name, "rect_tooltip");
        assert!(rect.width.equals_scalar(40.0));
    }
}
