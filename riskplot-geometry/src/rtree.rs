use geo::{BoundingRect, Closest, ClosestPoint};
use geo_types::Geometry;
use riskplot_scenegraph::marks::mark::{MarkInstance, SceneMark};
use riskplot_scenegraph::scene_graph::SceneGraph;
use rstar::{iterators::RTreeIterator, Envelope, PointDistance, RTree, RTreeObject, AABB};

use crate::marks::MarkGeometryUtils;

/// Hit geometry of one mark instance for storage in the R-tree
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    pub mark_instance: MarkInstance,
    /// Draw order of the instance within its mark, or within the whole scene
    /// once loaded into a `SceneGraphRTree`
    pub z_index: usize,
    pub geometry: Geometry<f32>,
    pub half_stroke_width: f32,
}

impl GeometryInstance {
    /// Distance from the point to the geometry outline, zero inside filled shapes
    fn geometry_distance(&self, point: &[f32; 2]) -> f32 {
        let query = geo_types::Point::new(point[0], point[1]);
        match self.geometry.closest_point(&query) {
            Closest::Intersection(_) => 0.0,
            Closest::SinglePoint(p) => (p.x() - point[0]).hypot(p.y() - point[1]),
            Closest::Indeterminate => f32::INFINITY,
        }
    }
}

impl RTreeObject for GeometryInstance {
    type Envelope = AABB<[f32; 2]>;

    /// Returns the envelope of the geometry, including the stroke width
    fn envelope(&self) -> Self::Envelope {
        match self.geometry.bounding_rect() {
            Some(bbox) => AABB::from_corners(
                [
                    bbox.min().x - self.half_stroke_width,
                    bbox.min().y - self.half_stroke_width,
                ],
                [
                    bbox.max().x + self.half_stroke_width,
                    bbox.max().y + self.half_stroke_width,
                ],
            ),
            // empty geometries sit at the origin with no extent
            None => AABB::from_point([0.0, 0.0]),
        }
    }
}

impl PointDistance for GeometryInstance {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let distance = (self.geometry_distance(point) - self.half_stroke_width).max(0.0);
        distance * distance
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.geometry_distance(point) <= self.half_stroke_width
    }
}

#[derive(Debug, Clone)]
pub struct MarkRTree {
    rtree: RTree<GeometryInstance>,
    envelope: AABB<[f32; 2]>,
}

impl MarkRTree {
    pub fn new(geometries: Vec<GeometryInstance>) -> Self {
        let envelope = geometries
            .iter()
            .map(|g| g.envelope())
            .reduce(|a, b| a.merged(&b))
            .unwrap_or_else(|| AABB::from_point([0.0, 0.0]));

        let rtree = RTree::bulk_load(geometries);
        Self { rtree, envelope }
    }

    /// Returns the envelope of the entire tree
    pub fn envelope(&self) -> &AABB<[f32; 2]> {
        &self.envelope
    }

    /// Returns the number of objects in the r-tree
    pub fn size(&self) -> usize {
        self.rtree.size()
    }

    pub fn iter(&self) -> RTreeIterator<GeometryInstance> {
        self.rtree.iter()
    }

    /// Returns all objects that cover a given point
    pub fn locate_all_at_point<'a>(
        &'a self,
        point: &'a [f32; 2],
    ) -> impl Iterator<Item = &'a GeometryInstance> + 'a {
        self.rtree.locate_all_at_point(point)
    }

    /// Returns the nearest neighbor for a given point
    pub fn nearest_neighbor(&self, query_point: &[f32; 2]) -> Option<&GeometryInstance> {
        self.rtree.nearest_neighbor(query_point)
    }
}

/// R-tree over every mark instance in a scene graph, for pointer hit testing
#[derive(Debug, Clone)]
pub struct SceneGraphRTree {
    rtree: MarkRTree,
}

impl SceneGraphRTree {
    pub fn from_scene_graph(scene_graph: &SceneGraph) -> Self {
        let mut order: Vec<usize> = (0..scene_graph.marks.len()).collect();
        order.sort_by_key(|i| scene_graph.marks[*i].zindex().unwrap_or(0));

        let geometries = order
            .into_iter()
            .flat_map(|index| {
                let mark: &SceneMark = &scene_graph.marks[index];
                mark.geometry_iter(vec![index], scene_graph.origin)
            })
            .enumerate()
            .map(|(draw_order, mut geometry)| {
                geometry.z_index = draw_order;
                geometry
            })
            .collect();

        Self {
            rtree: MarkRTree::new(geometries),
        }
    }

    pub fn rtree(&self) -> &MarkRTree {
        &self.rtree
    }

    /// The instance drawn on top at `point`, if any
    pub fn pick_top_mark_at_point<'a>(&'a self, point: &'a [f32; 2]) -> Option<&'a MarkInstance> {
        self.rtree
            .locate_all_at_point(point)
            .max_by_key(|g| g.z_index)
            .map(|g| &g.mark_instance)
    }
}
