use crate::geometry::Triangle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named list of triangles, stored as JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangleSet {
    pub name: String,
    #[serde(default)]
    pub triangles: Vec<Triangle>,
}

impl TriangleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }

    pub fn add(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounding box over every triangle, or None when empty
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        self.triangles
            .iter()
            .map(Triangle::bounds)
            .reduce(|(ax0, ay0, ax1, ay1), (bx0, by0, bx1, by1)| {
                (ax0.min(bx0), ay0.min(by0), ax1.max(bx1), ay1.max(by1))
            })
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        fs::write(path, self.to_json()?).map_err(|e| e.to_string())
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::from_json(&json)
    }
}

impl Default for TriangleSet {
    fn default() -> Self {
        Self::new("untitled")
    }
}
