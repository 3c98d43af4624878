//! One sample of the generated score curves.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Key under which the score of the function at `index` is published.
pub fn function_key(index: usize) -> String {
    format!("function{}", index)
}

/// A sample point: the swept value and each function's score at it.
///
/// Serialises to the flat shape the chart consumes:
/// `{"x": 10.0, "function0": 1.2, "function1": 0.5, "combined": 1.7}`.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Swept field value (a millisecond timestamp for date variables)
    pub x: f64,

    /// Score of each function, in definition order
    pub scores: Vec<f64>,

    /// Combined score, present only when two or more functions are simulated
    pub combined: Option<f64>,
}

impl DataPoint {
    /// Score of the function at `index`.
    pub fn score(&self, index: usize) -> Option<f64> {
        self.scores.get(index).copied()
    }

    /// Look up a value by its published key (`x`, `functionN`, `combined`).
    pub fn get(&self, key: &str) -> Option<f64> {
        match key {
            "x" => Some(self.x),
            "combined" => self.combined,
            _ => key
                .strip_prefix("function")
                .and_then(|index| index.parse::<usize>().ok())
                .and_then(|index| self.score(index)),
        }
    }

    /// All published keys of this point, in output order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.scores.len() + 2);
        keys.push("x".to_string());
        keys.extend((0..self.scores.len()).map(function_key));
        if self.combined.is_some() {
            keys.push("combined".to_string());
        }
        keys
    }
}

impl Serialize for DataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 1 + self.scores.len() + usize::from(self.combined.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("x", &self.x)?;
        for (index, score) in self.scores.iter().enumerate() {
            map.serialize_entry(&function_key(index), score)?;
        }
        if let Some(combined) = self.combined {
            map.serialize_entry("combined", &combined)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let point = DataPoint {
            x: 10.0,
            scores: vec![1.5, 0.5],
            combined: Some(2.0),
        };
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"x":10.0,"function0":1.5,"function1":0.5,"combined":2.0}"#);
    }

    #[test]
    fn test_combined_omitted_when_absent() {
        let point = DataPoint {
            x: 0.0,
            scores: vec![3.0],
            combined: None,
        };
        let value = serde_json::to_value(&point).unwrap();
        assert!(value.get("combined").is_none());
        assert_eq!(point.keys(), vec!["x", "function0"]);
    }

    #[test]
    fn test_get_by_key() {
        let point = DataPoint {
            x: 5.0,
            scores: vec![1.0, 2.0, 3.0],
            combined: Some(6.0),
        };
        assert_eq!(point.get("x"), Some(5.0));
        assert_eq!(point.get("function2"), Some(3.0));
        assert_eq!(point.get("function3"), None);
        assert_eq!(point.get("combined"), Some(6.0));
        assert_eq!(point.get("bogus"), None);
    }
}
