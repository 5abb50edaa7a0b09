use crate::common::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boundary {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub x_center: f64,
    pub y_center: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

/// Shared, immutable description of the arena every robot plans in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub start: Point,
    pub goal: Point,
    pub bounds: Boundary,
    pub circles: Vec<Circle>,
    pub rectangles: Vec<Rectangle>,
}

impl Workspace {
    pub fn from_json(bytes: &[u8]) -> RegistryResult<Self> {
        let workspace: Workspace = serde_json::from_slice(bytes)
            .map_err(|e| RegistryError::malformed(format!("invalid workspace definition: {}", e)))?;
        workspace.validate()?;
        Ok(workspace)
    }

    /// Every coordinate and dimension must be a finite number.
    pub fn validate(&self) -> RegistryResult<()> {
        let b = &self.bounds;
        let scalars = [
            self.start.x,
            self.start.y,
            self.goal.x,
            self.goal.y,
            b.x_min,
            b.x_max,
            b.y_min,
            b.y_max,
        ]
        .into_iter()
        .chain(self.circles.iter().flat_map(|c| [c.x_center, c.y_center, c.radius]))
        .chain(
            self.rectangles
                .iter()
                .flat_map(|r| [r.x_center, r.y_center, r.width, r.height]),
        );
        for value in scalars {
            if !value.is_finite() {
                return Err(RegistryError::malformed("workspace contains a non-finite number"));
            }
        }
        Ok(())
    }

    pub fn obstacle_count(&self) -> usize {
        self.circles.len() + self.rectangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_json_uses_camel_case() {
        let json = br#"{
            "start": {"x": 0, "y": 0},
            "goal": {"x": 1, "y": 1},
            "bounds": {"xMin": 0, "xMax": 2, "yMin": 0, "yMax": 2},
            "circles": [{"xCenter": 1, "yCenter": 1, "radius": 0.5}],
            "rectangles": []
        }"#;
        let ws = Workspace::from_json(json).unwrap();
        assert_eq!(ws.bounds.x_max, 2.0);
        assert_eq!(ws.circles[0].radius, 0.5);
        assert_eq!(ws.obstacle_count(), 1);

        let value = serde_json::to_value(&ws).unwrap();
        assert!(value["bounds"].get("yMax").is_some());
        assert!(value["circles"][0].get("xCenter").is_some());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut ws = crate::domains::workspace::canonical_workspace();
        ws.circles[0].radius = f64::NAN;
        assert!(matches!(ws.validate(), Err(RegistryError::MalformedInput { .. })));
    }

    #[test]
    fn test_from_json_rejects_missing_bounds() {
        let json =
            br#"{"start": {"x": 0, "y": 0}, "goal": {"x": 1, "y": 1}, "circles": [], "rectangles": []}"#;
        assert!(Workspace::from_json(json).is_err());
    }
}
