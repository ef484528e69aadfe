use std::sync::Arc;

use crate::marks::group::SceneGroup;
use crate::marks::rect::SceneRectMark;
use crate::marks::rule::SceneRuleMark;
use crate::marks::symbol::SceneSymbolMark;
use crate::marks::text::SceneTextMark;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneMark {
    Symbol(SceneSymbolMark),
    Rect(SceneRectMark),
    Rule(SceneRuleMark),
    Text(Arc<SceneTextMark>),
    Group(SceneGroup),
}

impl SceneMark {
    pub fn zindex(&self) -> Option<i32> {
        match self {
            Self::Symbol(mark) => mark.zindex,
            Self::Rect(mark) => mark.zindex,
            Self::Rule(mark) => mark.zindex,
            Self::Text(mark) => mark.zindex,
            Self::Group(mark) => mark.zindex,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Symbol(mark) => &mark.name,
            Self::Rect(mark) => &mark.name,
            Self::Rule(mark) => &mark.name,
            Self::Text(mark) => &mark.name,
            Self::Group(mark) => &mark.name,
        }
    }

    pub fn children(&self) -> &[SceneMark] {
        match self {
            Self::Group(mark) => &mark.marks,
            _ => &[],
        }
    }
}

/// A single drawn instance of a mark, identified by its path from the scene root.
///
/// `instance_index` is `None` for marks that are not instanced, such as groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkInstance {
    pub name: String,
    pub mark_path: Vec<usize>,
    pub instance_index: Option<usize>,
}

impl MarkInstance {
    /// Whether this instance belongs to the mark at `mark_path`
    pub fn is_in_mark(&self, mark_path: &[usize]) -> bool {
        self.mark_path == mark_path
    }

    /// Whether this instance lives anywhere below the group at `group_path`
    pub fn is_in_group(&self, group_path: &[usize]) -> bool {
        self.mark_path.len() > group_path.len() && self.mark_path.starts_with(group_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_instance_paths() {
        let instance = MarkInstance {
            name: "label".to_string(),
            mark_path: vec![0, 3, 0],
            instance_index: Some(1),
        };
        assert!(instance.is_in_mark(&[0, 3, 0]));
        assert!(!instance.is_in_mark(&[0, 3]));
        assert!(instance.is_in_group(&[0, 3]));
        assert!(instance.is_in_group(&[0]));
        assert!(!instance.is_in_group(&[0, 3, 0]));
        assert!(!instance.is_in_group(&[0, 4]));
    }
}
