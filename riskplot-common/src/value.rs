#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mark encoding that is either shared by every instance or given per instance
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "kebab-case"))]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarOrArray<T: Sync + Clone> {
    Scalar(T),
    Array(Vec<T>),
}

impl<T: Sync + Clone> ScalarOrArray<T> {
    pub fn new_scalar(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }

    /// Iterate values in draw order.
    ///
    /// With `indices`, arrays are read at those positions (out of range
    /// indices are skipped) and a scalar repeats once per index. Without
    /// them, a scalar repeats `scalar_len` times.
    pub fn as_iter<'a>(
        &'a self,
        scalar_len: usize,
        indices: Option<&'a Vec<usize>>,
    ) -> Box<dyn Iterator<Item = &'a T> + 'a> {
        let repeat_len = indices.map(|indices| indices.len()).unwrap_or(scalar_len);
        match self {
            ScalarOrArray::Scalar(value) => Box::new(std::iter::repeat_n(value, repeat_len)),
            ScalarOrArray::Array(values) => match indices {
                None => Box::new(values.iter()),
                Some(indices) => Box::new(indices.iter().filter_map(|i| values.get(*i))),
            },
        }
    }

    pub fn as_vec(&self, scalar_len: usize, indices: Option<&Vec<usize>>) -> Vec<T> {
        self.as_iter(scalar_len, indices)
            .cloned()
            .collect::<Vec<_>>()
    }

    /// Value for a single instance
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            ScalarOrArray::Scalar(value) => Some(value),
            ScalarOrArray::Array(values) => values.get(index),
        }
    }

    pub fn map<U: Sync + Clone>(&self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArray::Scalar(value) => ScalarOrArray::Scalar(f(value)),
            ScalarOrArray::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl ScalarOrArray<f32> {
    pub fn equals_scalar(&self, v: f32) -> bool {
        match self {
            ScalarOrArray::Scalar(value) => v == *value,
            _ => false,
        }
    }
}

impl<T: Sync + Clone> From<Vec<T>> for ScalarOrArray<T> {
    fn from(values: Vec<T>) -> Self {
        ScalarOrArray::Array(values)
    }
}

impl<T: Sync + Clone> From<T> for ScalarOrArray<T> {
    fn from(value: T) -> Self {
        ScalarOrArray::Scalar(value)
    }
}

impl From<&str> for ScalarOrArray<String> {
    fn from(value: &str) -> Self {
        ScalarOrArray::Scalar(value.to_string())
    }
}

/// Borrowed input to scale functions
#[derive(Debug, Clone)]
pub enum ScalarOrArrayRef<'a, T: Sync + Clone> {
    Scalar(T),
    Array(&'a [T]),
}

impl<'a, T: Sync + Clone> ScalarOrArrayRef<'a, T> {
    pub fn from_slice(values: &'a [T]) -> Self {
        ScalarOrArrayRef::Array(values)
    }

    pub fn map<U: Sync + Clone>(self, f: impl Fn(&T) -> U) -> ScalarOrArray<U> {
        match self {
            ScalarOrArrayRef::Scalar(value) => ScalarOrArray::Scalar(f(&value)),
            ScalarOrArrayRef::Array(values) => ScalarOrArray::Array(values.iter().map(f).collect()),
        }
    }
}

impl<'a, T: Sync + Clone> From<&'a [T]> for ScalarOrArrayRef<'a, T> {
    fn from(values: &'a [T]) -> Self {
        ScalarOrArrayRef::Array(values)
    }
}

impl<'a, T: Sync + Clone> From<&'a Vec<T>> for ScalarOrArrayRef<'a, T> {
    fn from(values: &'a Vec<T>) -> Self {
        ScalarOrArrayRef::Array(values.as_slice())
    }
}

impl<'a, T: Sync + Clone> From<&'a T> for ScalarOrArrayRef<'a, T> {
    fn from(value: &'a T) -> Self {
        ScalarOrArrayRef::Scalar(value.clone())
    }
}

impl<T: Sync + Clone> From<T> for ScalarOrArrayRef<'_, T> {
    fn from(value: T) -> Self {
        ScalarOrArrayRef::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_repeats() {
        let v = ScalarOrArray::new_scalar(2.0f32);
        assert_eq!(v.as_vec(3, None), vec![2.0, 2.0, 2.0]);
        assert_eq!(v.as_vec(3, Some(&vec![1])), vec![2.0]);
        assert!(v.equals_scalar(2.0));
    }

    #[test]
    fn test_array_follows_indices() {
        let v: ScalarOrArray<f32> = vec![1.0, 2.0, 3.0].into();
        let indices = vec![2, 0, 7];
        assert_eq!(v.as_vec(3, Some(&indices)), vec![3.0, 1.0]);
        assert_eq!(v.get(1), Some(&2.0));
        assert_eq!(v.get(5), None);
    }

    #[test]
    fn test_ref_map() {
        let values = vec![1.0f32, 2.0];
        let mapped = ScalarOrArrayRef::from_slice(&values).map(|v| v * 10.0);
        assert_eq!(mapped, ScalarOrArray::Array(vec![10.0, 20.0]));
    }
}
