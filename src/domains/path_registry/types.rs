use crate::common::{composite_key, RegistryError, RegistryResult};
use crate::domains::workspace::{Point, WORKSPACE_KEY};
use serde::{Deserialize, Serialize};

/// A robot's planned route. The robot id doubles as the record's primary key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Path {
    pub robot_id: String,
    /// Traversal order.
    pub points: Vec<Point>,
}

impl Path {
    pub fn new(robot_id: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            robot_id: robot_id.into(),
            points,
        }
    }

    pub fn to_bytes(&self) -> RegistryResult<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| RegistryError::malformed(format!("path not serializable: {}", e)))
    }

    /// Decode a stored record, checking it belongs to `key`.
    pub fn from_stored(key: &str, bytes: &[u8]) -> RegistryResult<Self> {
        let path: Path = serde_json::from_slice(bytes).map_err(|e| {
            RegistryError::corrupt(format!("stored path for {} is unreadable: {}", key, e))
        })?;
        if path.robot_id != key {
            return Err(RegistryError::corrupt(format!(
                "record under {} belongs to {}",
                key, path.robot_id
            )));
        }
        Ok(path)
    }
}

/// Robot ids become plain keys and composite-key attributes, so they must be
/// usable as both and must not shadow the workspace record.
pub fn validate_robot_id(robot_id: &str) -> RegistryResult<()> {
    if robot_id.is_empty() {
        return Err(RegistryError::malformed("robot id must not be empty"));
    }
    if !composite_key::is_valid_part(robot_id) {
        return Err(RegistryError::malformed(format!(
            "robot id {:?} contains a reserved character",
            robot_id
        )));
    }
    if robot_id == WORKSPACE_KEY {
        return Err(RegistryError::malformed(format!(
            "robot id {:?} is reserved",
            robot_id
        )));
    }
    Ok(())
}

/// Parse a JSON array of `{"x", "y"}` objects.
pub fn parse_points(raw: &str) -> RegistryResult<Vec<Point>> {
    let points: Vec<Point> = serde_json::from_str(raw).map_err(|e| {
        RegistryError::malformed(format!("failed to parse given path {}: {}", raw, e))
    })?;
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(RegistryError::malformed(format!("point {} is not finite", i)));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_points_keeps_order() {
        let points = parse_points(r#"[{"x":1,"y":5},{"x":3,"y":4},{"x":2.5,"y":0}]"#).unwrap();
        assert_eq!(
            points,
            vec![Point::new(1.0, 5.0), Point::new(3.0, 4.0), Point::new(2.5, 0.0)]
        );
    }

    #[test]
    fn test_parse_points_accepts_empty_and_extra_fields() {
        assert!(parse_points("[]").unwrap().is_empty());
        let points = parse_points(r#"[{"x":1,"y":2,"z":9}]"#).unwrap();
        assert_eq!(points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_parse_points_rejects_bad_shapes() {
        for raw in ["", "null", "{}", r#"[{"x":1}]"#, r#"[{"x":"a","y":1}]"#, "[1,2]"] {
            assert!(
                matches!(parse_points(raw), Err(RegistryError::MalformedInput { .. })),
                "accepted {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_validate_robot_id() {
        assert!(validate_robot_id("robot01").is_ok());
        assert!(validate_robot_id("").is_err());
        assert!(validate_robot_id("a\u{0}b").is_err());
        assert!(validate_robot_id("workspace").is_err());
    }

    #[test]
    fn test_path_json_layout() {
        let path = Path::new("r2", vec![Point::new(9.0, 1.0)]);
        let value: serde_json::Value = serde_json::from_slice(&path.to_bytes().unwrap()).unwrap();
        assert_eq!(value["robotId"], "r2");
        assert_eq!(value["points"][0]["x"], 9.0);
    }

    #[test]
    fn test_from_stored_detects_foreign_record() {
        let bytes = Path::new("r1", vec![]).to_bytes().unwrap();
        assert!(Path::from_stored("r1", &bytes).is_ok());
        assert!(matches!(
            Path::from_stored("r2", &bytes),
            Err(RegistryError::CorruptState { .. })
        ));
        assert!(matches!(
            Path::from_stored("r1", b"not json"),
            Err(RegistryError::CorruptState { .. })
        ));
    }
}
