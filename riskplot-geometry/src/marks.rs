use crate::GeometryInstance;
use geo::Rotate;
use geo_types::{coord, Coord, Geometry, Line, LineString, Polygon, Rect};
use itertools::izip;
use riskplot_scenegraph::marks::group::SceneGroup;
use riskplot_scenegraph::marks::mark::{MarkInstance, SceneMark};
use riskplot_scenegraph::marks::rect::SceneRectMark;
use riskplot_scenegraph::marks::rule::SceneRuleMark;
use riskplot_scenegraph::marks::symbol::SceneSymbolMark;
use riskplot_scenegraph::marks::text::SceneTextMark;
use riskplot_text::measurement::{default_text_measurer, TextMeasurementConfig, TextMeasurer};
use rstar::{Envelope, RTreeObject, AABB};

/// Number of vertices used to approximate a circle outline
const CIRCLE_SEGMENTS: usize = 32;

pub trait MarkGeometryUtils {
    /// Hit geometry of every drawn instance, in draw order, in absolute coordinates
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_>;

    fn bounding_box(&self) -> AABB<[f32; 2]> {
        self.geometry_iter(Vec::new(), [0.0, 0.0])
            .map(|g| g.envelope())
            .reduce(|a, b| a.merged(&b))
            .unwrap_or(AABB::from_corners([0.0, 0.0], [0.0, 0.0]))
    }
}

fn mark_instance(name: &str, mark_path: &[usize], id: usize) -> MarkInstance {
    MarkInstance {
        name: name.to_string(),
        mark_path: mark_path.to_vec(),
        instance_index: Some(id),
    }
}

pub fn circle_polygon(center: [f32; 2], radius: f32) -> Polygon<f32> {
    let exterior: Vec<Coord<f32>> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
            coord!(x: center[0] + radius * theta.cos(), y: center[1] + radius * theta.sin())
        })
        .collect();
    Polygon::new(LineString::new(exterior), vec![])
}

impl MarkGeometryUtils for SceneSymbolMark {
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let half_stroke_width = self.stroke_width.unwrap_or(0.0) / 2.0;
        Box::new(
            izip!(self.indices_iter(), self.circle_iter(origin))
                .enumerate()
                .map(move |(z_index, (id, (center, radius)))| GeometryInstance {
                    mark_instance: mark_instance(&self.name, &mark_path, id),
                    z_index,
                    geometry: Geometry::Polygon(circle_polygon(center, radius)),
                    half_stroke_width,
                }),
        )
    }
}

impl MarkGeometryUtils for SceneRectMark {
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        Box::new(
            izip!(
                self.indices_iter(),
                self.x_iter(),
                self.y_iter(),
                self.width_iter(),
                self.height_iter(),
                self.stroke_width_iter()
            )
            .enumerate()
            .map(move |(z_index, (id, x, y, width, height, stroke_width))| {
                let x0 = *x + origin[0];
                let y0 = *y + origin[1];
                let rect = Rect::new(coord!(x: x0, y: y0), coord!(x: x0 + width, y: y0 + height));
                GeometryInstance {
                    mark_instance: mark_instance(&self.name, &mark_path, id),
                    z_index,
                    geometry: Geometry::Polygon(rect.to_polygon()),
                    half_stroke_width: stroke_width / 2.0,
                }
            }),
        )
    }
}

impl MarkGeometryUtils for SceneRuleMark {
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        Box::new(
            izip!(
                self.indices_iter(),
                self.segment_iter(origin),
                self.stroke_width_iter()
            )
            .enumerate()
            .map(move |(z_index, (id, [x0, y0, x1, y1], stroke_width))| GeometryInstance {
                mark_instance: mark_instance(&self.name, &mark_path, id),
                z_index,
                geometry: Geometry::Line(Line::new(coord!(x: x0, y: y0), coord!(x: x1, y: y1))),
                half_stroke_width: stroke_width / 2.0,
            }),
        )
    }
}

impl MarkGeometryUtils for SceneTextMark {
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        let measurer = default_text_measurer();
        Box::new(
            izip!(
                self.indices_iter(),
                self.text_iter(),
                self.x_iter(),
                self.y_iter(),
                self.angle_iter(),
                self.font_iter(),
                self.font_size_iter(),
                self.font_weight_iter(),
                self.font_style_iter(),
                self.align_iter(),
                self.baseline_iter()
            )
            .enumerate()
            .map(
                move |(
                    z_index,
                    (
                        id,
                        text,
                        x,
                        y,
                        angle,
                        font,
                        font_size,
                        font_weight,
                        font_style,
                        align,
                        baseline,
                    ),
                )| {
                    let config = TextMeasurementConfig {
                        text,
                        font,
                        font_size: *font_size,
                        font_weight,
                        font_style,
                    };
                    let text_bounds = measurer.measure_text_bounds(&config);
                    let anchor = [*x + origin[0], *y + origin[1]];
                    let [x0, y0, x1, y1] =
                        text_bounds.to_rect(text_bounds.calculate_origin(anchor, align, baseline));

                    let bounds = Rect::new(coord!(x: x0, y: y0), coord!(x: x1, y: y1));
                    let geometry = Geometry::Polygon(bounds.to_polygon())
                        .rotate_around_point(*angle, geo::Point::new(anchor[0], anchor[1]));

                    GeometryInstance {
                        mark_instance: mark_instance(&self.name, &mark_path, id),
                        z_index,
                        geometry,
                        half_stroke_width: 0.0,
                    }
                },
            ),
        )
    }
}

impl MarkGeometryUtils for SceneGroup {
    /// Child geometry in the order children are drawn: by z-index, then position.
    /// Non-interactive groups have none.
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        if !self.interactive {
            return Box::new(std::iter::empty());
        }
        let origin = [origin[0] + self.origin[0], origin[1] + self.origin[1]];
        let mut order: Vec<usize> = (0..self.marks.len()).collect();
        order.sort_by_key(|i| self.marks[*i].zindex().unwrap_or(0));

        Box::new(order.into_iter().flat_map(move |mark_index| {
            let mut mark_path = mark_path.clone();
            mark_path.push(mark_index);
            self.marks[mark_index].geometry_iter(mark_path, origin)
        }))
    }
}

impl MarkGeometryUtils for SceneMark {
    fn geometry_iter(
        &self,
        mark_path: Vec<usize>,
        origin: [f32; 2],
    ) -> Box<dyn Iterator<Item = GeometryInstance> + '_> {
        match self {
            SceneMark::Symbol(mark) => mark.geometry_iter(mark_path, origin),
            SceneMark::Rect(mark) => mark.geometry_iter(mark_path, origin),
            SceneMark::Rule(mark) => mark.geometry_iter(mark_path, origin),
            SceneMark::Text(mark) => mark.geometry_iter(mark_path, origin),
            SceneMark::Group(mark) => mark.geometry_iter(mark_path, origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use riskplot_scenegraph::marks::symbol::size_for_radius;
    use riskplot_text::types::{TextAlign, TextBaseline};
    use rstar::PointDistance;

    #[test]
    fn test_symbol_geometry() {
        let mark = SceneSymbolMark {
            name: "stateCircle".to_string(),
            len: 2,
            x: vec![0.0, 100.0].into(),
            y: vec![0.0, 0.0].into(),
            size: size_for_radius(15.0).into(),
            ..Default::default()
        };
        let geoms: Vec<_> = mark.geometry_iter(vec![0, 2, 0], [10.0, 10.0]).collect();
        assert_eq!(geoms.len(), 2);
        assert_eq!(geoms[1].mark_instance.instance_index, Some(1));
        assert_eq!(geoms[1].mark_instance.mark_path, vec![0, 2, 0]);
        assert!(geoms[0].contains_point(&[15.0, 15.0]));
        assert!(!geoms[0].contains_point(&[30.0, 30.0]));

        let bbox = mark.bounding_box();
        assert_approx_eq!(f32, bbox.lower()[0], -15.0, epsilon = 1e-3);
        assert_approx_eq!(f32, bbox.upper()[0], 115.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rotated_text_geometry() {
        let mark = SceneTextMark {
            text: "Obese (%)".to_string().into(),
            align: TextAlign::Center.into(),
            baseline: TextBaseline::Middle.into(),
            angle: (-90.0f32).into(),
            font_size: 10.0f32.into(),
            ..Default::default()
        };
        let geom = mark.geometry_iter(vec![0], [0.0, 0.0]).next().unwrap();
        let envelope = geom.envelope();
        // 9 graphemes at 6px each, standing upright after rotation
        assert_approx_eq!(f32, envelope.upper()[1] - envelope.lower()[1], 54.0, epsilon = 1e-3);
        assert_approx_eq!(f32, envelope.upper()[0] - envelope.lower()[0], 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_rule_geometry_uses_stroke() {
        let mark = SceneRuleMark {
            x2: 100.0f32.into(),
            stroke_width: 4.0f32.into(),
            ..Default::default()
        };
        let geom = mark.geometry_iter(vec![0], [0.0, 0.0]).next().unwrap();
        assert!(geom.contains_point(&[50.0, 1.5]));
        assert!(!geom.contains_point(&[50.0, 3.0]));
        assert_approx_eq!(f32, geom.distance_2(&[50.0, 5.0]), 9.0, epsilon = 1e-4);
    }
}
