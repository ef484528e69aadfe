use std::fmt::Write;

use riskplot_common::canvas::CanvasDimensions;
use riskplot_common::types::{ColorUtils, Rgba};
use riskplot_scenegraph::marks::group::{Clip, SceneGroup};
use riskplot_scenegraph::marks::mark::SceneMark;
use riskplot_scenegraph::marks::rect::SceneRectMark;
use riskplot_scenegraph::marks::rule::SceneRuleMark;
use riskplot_scenegraph::marks::symbol::SceneSymbolMark;
use riskplot_scenegraph::marks::text::SceneTextMark;
use riskplot_scenegraph::scene_graph::SceneGraph;

use crate::error::RiskplotSvgError;
use crate::marks::{escape, num, write_rect_mark, write_rule_mark, write_symbol_mark, write_text_mark};

/// A render target that receives marks with their absolute origin and the
/// clip of the enclosing group.
pub trait Canvas {
    fn clear_marks(&mut self);

    fn dimensions(&self) -> CanvasDimensions;

    fn add_symbol_mark(
        &mut self,
        mark: &SceneSymbolMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError>;

    fn add_rect_mark(
        &mut self,
        mark: &SceneRectMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError>;

    fn add_rule_mark(
        &mut self,
        mark: &SceneRuleMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError>;

    fn add_text_mark(
        &mut self,
        mark: &SceneTextMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError>;

    /// Called before the marks of `group` are added
    fn begin_group(&mut self, _group: &SceneGroup) -> Result<(), RiskplotSvgError> {
        Ok(())
    }

    /// Called after the marks of `group` are added
    fn end_group(&mut self, _group: &SceneGroup) -> Result<(), RiskplotSvgError> {
        Ok(())
    }

    fn add_group_mark(
        &mut self,
        group: &SceneGroup,
        parent_origin: [f32; 2],
        parent_clip: &Clip,
    ) -> Result<(), RiskplotSvgError> {
        self.begin_group(group)?;

        // Maybe add rect around group boundary
        if let Some(rect) = group.make_rect_mark() {
            self.add_rect_mark(&rect, parent_origin, parent_clip)?;
        }

        // Add marks in order of zindex
        let zindex = group.marks.iter().map(|m| m.zindex()).collect::<Vec<_>>();
        let mut indices: Vec<usize> = (0..zindex.len()).collect();
        indices.sort_by_key(|i| zindex[*i].unwrap_or(0));

        let origin = [
            parent_origin[0] + group.origin[0],
            parent_origin[1] + group.origin[1],
        ];

        let clip = if let Clip::None = group.clip {
            // No clip defined for this group, propagate parent clip down
            parent_clip.clone()
        } else {
            group.clip.translate(origin[0], origin[1])
        };

        for mark_ind in indices {
            match &group.marks[mark_ind] {
                SceneMark::Symbol(mark) => self.add_symbol_mark(mark, origin, &clip)?,
                SceneMark::Rect(mark) => self.add_rect_mark(mark, origin, &clip)?,
                SceneMark::Rule(mark) => self.add_rule_mark(mark, origin, &clip)?,
                SceneMark::Text(mark) => self.add_text_mark(mark, origin, &clip)?,
                SceneMark::Group(group) => self.add_group_mark(group, origin, &clip)?,
            }
        }
        self.end_group(group)
    }

    fn set_scene(&mut self, scene_graph: &SceneGraph) -> Result<(), RiskplotSvgError> {
        self.clear_marks();

        // Sort groups by zindex
        let groups = scene_graph.groups();
        let zindex = groups.iter().map(|g| g.zindex).collect::<Vec<_>>();
        let mut indices: Vec<usize> = (0..zindex.len()).collect();
        indices.sort_by_key(|i| zindex[*i].unwrap_or(0));

        for group_ind in &indices {
            self.add_group_mark(groups[*group_ind], scene_graph.origin, &Clip::None)?;
        }
        Ok(())
    }
}

/// Writes a scene graph as a standalone SVG document.
///
/// Each group becomes a `<g>` element and each mark instance becomes one
/// element carrying the mark name as its `class`. Coordinates are absolute.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    dimensions: CanvasDimensions,
    background: Option<Rgba>,
    body: String,
    clip_paths: Vec<Clip>,
}

impl SvgCanvas {
    pub fn new(dimensions: CanvasDimensions) -> Self {
        Self {
            dimensions,
            background: None,
            body: String::new(),
            clip_paths: vec![],
        }
    }

    pub fn with_background(mut self, color: Rgba) -> Self {
        self.background = Some(color);
        self
    }

    /// `clip-path` attribute for marks that clip to `clip`
    fn clip_attr(&mut self, clip: &Clip, mark_clip: bool) -> String {
        if !mark_clip || matches!(clip, Clip::None) {
            return String::new();
        }
        let id = match self.clip_paths.iter().position(|c| c == clip) {
            Some(id) => id,
            None => {
                self.clip_paths.push(clip.clone());
                self.clip_paths.len() - 1
            }
        };
        format!(r#" clip-path="url(#clip{id})""#)
    }

    pub fn to_svg(&self) -> Result<String, RiskplotSvgError> {
        let [width, height] = self.dimensions.size;
        let mut svg = String::new();
        // viewBox is the logical size, the scale only enlarges the document
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            num(width * self.dimensions.scale),
            num(height * self.dimensions.scale),
            num(width),
            num(height),
        )?;

        if !self.clip_paths.is_empty() {
            svg.push_str("<defs>\n");
            for (id, clip) in self.clip_paths.iter().enumerate() {
                if let Clip::Rect {
                    x,
                    y,
                    width,
                    height,
                } = clip
                {
                    writeln!(
                        svg,
                        r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                        num(*x),
                        num(*y),
                        num(*width),
                        num(*height)
                    )?;
                }
            }
            svg.push_str("</defs>\n");
        }

        if let Some(background) = self.background.filter(|c| !c.is_transparent()) {
            writeln!(
                svg,
                r#"<rect width="100%" height="100%" fill="{}"/>"#,
                background.to_hex()
            )?;
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

impl Canvas for SvgCanvas {
    fn clear_marks(&mut self) {
        self.body.clear();
        self.clip_paths.clear();
    }

    fn dimensions(&self) -> CanvasDimensions {
        self.dimensions
    }

    fn add_symbol_mark(
        &mut self,
        mark: &SceneSymbolMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError> {
        let clip_attr = self.clip_attr(group_clip, mark.clip);
        Ok(write_symbol_mark(&mut self.body, mark, origin, &clip_attr)?)
    }

    fn add_rect_mark(
        &mut self,
        mark: &SceneRectMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError> {
        let clip_attr = self.clip_attr(group_clip, mark.clip);
        Ok(write_rect_mark(&mut self.body, mark, origin, &clip_attr)?)
    }

    fn add_rule_mark(
        &mut self,
        mark: &SceneRuleMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError> {
        let clip_attr = self.clip_attr(group_clip, mark.clip);
        Ok(write_rule_mark(&mut self.body, mark, origin, &clip_attr)?)
    }

    fn add_text_mark(
        &mut self,
        mark: &SceneTextMark,
        origin: [f32; 2],
        group_clip: &Clip,
    ) -> Result<(), RiskplotSvgError> {
        let clip_attr = self.clip_attr(group_clip, mark.clip);
        Ok(write_text_mark(&mut self.body, mark, origin, &clip_attr)?)
    }

    fn begin_group(&mut self, group: &SceneGroup) -> Result<(), RiskplotSvgError> {
        if group.name.is_empty() {
            self.body.push_str("<g>\n");
        } else {
            writeln!(self.body, r#"<g class="{}">"#, escape(&group.name))?;
        }
        Ok(())
    }

    fn end_group(&mut self, _group: &SceneGroup) -> Result<(), RiskplotSvgError> {
        self.body.push_str("</g>\n");
        Ok(())
    }
}

/// Render a scene graph at its own size
pub fn scene_graph_to_svg(scene_graph: &SceneGraph) -> Result<String, RiskplotSvgError> {
    let mut canvas = SvgCanvas::new(CanvasDimensions::new(scene_graph.width, scene_graph.height))
        .with_background([1.0, 1.0, 1.0, 1.0]);
    canvas.set_scene(scene_graph)?;
    canvas.to_svg()
}
