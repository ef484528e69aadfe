use std::collections::HashMap;

use crate::error::RiskplotSceneGraphError;
use crate::marks::{group::SceneGroup, mark::SceneMark};
use serde::{Deserialize, Serialize};

/// One frame of the chart: a tree of groups and marks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub marks: Vec<SceneMark>,
    pub width: f32,
    pub height: f32,
    pub origin: [f32; 2],
}

impl SceneGraph {
    pub fn groups(&self) -> Vec<&SceneGroup> {
        self.marks
            .iter()
            .filter_map(|m| {
                let SceneMark::Group(g) = m else {
                    return None;
                };
                Some(g)
            })
            .collect()
    }

    pub fn children(&self) -> &[SceneMark] {
        &self.marks
    }

    pub fn get_mark(&self, mark_path: &[usize]) -> Option<&SceneMark> {
        // empty path is the root, which is not a mark
        let (first, rest) = mark_path.split_first()?;
        let mut child = self.marks.get(*first)?;
        for index in rest {
            child = child.children().get(*index)?;
        }
        Some(child)
    }

    pub fn get_group(&self, group_path: &[usize]) -> Result<&SceneGroup, RiskplotSceneGraphError> {
        match self.get_mark(group_path) {
            Some(SceneMark::Group(group)) => Ok(group),
            Some(_) => Err(RiskplotSceneGraphError::NotAGroup(group_path.to_vec())),
            None => Err(RiskplotSceneGraphError::InvalidMarkPath(group_path.to_vec())),
        }
    }

    /// Returns the absolute origin of a group, the scene origin for the empty path
    pub fn get_absolute_origin(&self, group_path: &[usize]) -> Option<[f32; 2]> {
        let mut origin = self.origin;
        for depth in 1..=group_path.len() {
            let SceneMark::Group(group) = self.get_mark(&group_path[..depth])? else {
                return None;
            };
            origin = [origin[0] + group.origin[0], origin[1] + group.origin[1]];
        }
        Some(origin)
    }

    /// Absolute origin that marks at `mark_path` are drawn relative to
    pub fn get_mark_origin(&self, mark_path: &[usize]) -> Option<[f32; 2]> {
        let (_, parent) = mark_path.split_last()?;
        self.get_absolute_origin(parent)
    }

    /// Returns all of the group paths in the scene graph
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

    /// Returns the absolute origin of each group
    pub fn group_origins(&self) -> HashMap<Vec<usize>, [f32; 2]> {
        self.group_paths()
            .into_iter()
            .filter_map(|path| {
                let origin = self.get_absolute_origin(&path)?;
                Some((path, origin))
            })
            .collect()
    }

    /// Returns mapping from the names of each named group to their path
    pub fn group_names(&self) -> HashMap<String, Vec<usize>> {
        let mut names = HashMap::new();
        for path in self.group_paths() {
            if let Some(SceneMark::Group(group)) = self.get_mark(&path) {
                if !group.name.is_empty() {
                    names.insert(group.name.clone(), path);
                }
            }
        }
        names
    }
}
