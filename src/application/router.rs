use crate::common::{RegistryError, RegistryResult};
use crate::domains::path_registry::{parse_points, validate_robot_id};
use crate::domains::workspace::Point;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetWorkspace,
    GetAllPaths,
    SetMyPath,
}

impl Operation {
    /// Name used on the wire by robot clients.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Operation::GetWorkspace => "getWorkspace",
            Operation::GetAllPaths => "getAllPaths",
            Operation::SetMyPath => "setMyPath",
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operation::GetWorkspace => 0,
            Operation::GetAllPaths => 1,
            Operation::SetMyPath => 2,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Operation {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "getWorkspace" | "get-workspace" => Ok(Operation::GetWorkspace),
            "getAllPaths" | "get-all-paths" => Ok(Operation::GetAllPaths),
            "setMyPath" | "set-my-path" => Ok(Operation::SetMyPath),
            other => Err(RegistryError::UnknownOperation {
                function: other.to_string(),
            }),
        }
    }
}

/// A fully validated call, ready to run against the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    GetWorkspace,
    GetAllPaths { caller_robot_id: String },
    SetMyPath { robot_id: String, points: Vec<Point> },
}

impl Invocation {
    /// Resolve the function name and check its arguments. Nothing here reads
    /// or writes state.
    pub fn parse(function: &str, args: &[String]) -> RegistryResult<Self> {
        let operation: Operation = function.parse()?;
        if args.len() != operation.arity() {
            return Err(RegistryError::malformed(format!(
                "expecting {} argument(s) for {}, got {}",
                operation.arity(),
                operation,
                args.len()
            )));
        }

        match operation {
            Operation::GetWorkspace => Ok(Invocation::GetWorkspace),
            Operation::GetAllPaths => {
                let caller_robot_id = args[0].clone();
                if caller_robot_id.is_empty() {
                    return Err(RegistryError::malformed("expecting robot id for getAllPaths"));
                }
                Ok(Invocation::GetAllPaths { caller_robot_id })
            }
            Operation::SetMyPath => {
                let robot_id = args[0].clone();
                validate_robot_id(&robot_id)?;
                let points = parse_points(&args[1])?;
                Ok(Invocation::SetMyPath { robot_id, points })
            }
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Invocation::GetWorkspace => Operation::GetWorkspace,
            Invocation::GetAllPaths { .. } => Operation::GetAllPaths,
            Invocation::SetMyPath { .. } => Operation::SetMyPath,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_wire_names_and_aliases() {
        assert_eq!("getWorkspace".parse::<Operation>().unwrap(), Operation::GetWorkspace);
        assert_eq!("get-all-paths".parse::<Operation>().unwrap(), Operation::GetAllPaths);
        assert_eq!("set-my-path".parse::<Operation>().unwrap(), Operation::SetMyPath);
        assert_eq!(Operation::SetMyPath.to_string(), "setMyPath");
    }

    #[test]
    fn test_unknown_function() {
        let err = Invocation::parse("deletePath", &args(&["r1"])).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownOperation { ref function } if function == "deletePath"
        ));
    }

    #[test]
    fn test_arity_checked_per_operation() {
        assert!(Invocation::parse("getWorkspace", &args(&["extra"])).is_err());
        assert!(Invocation::parse("getAllPaths", &args(&[])).is_err());
        assert!(Invocation::parse("setMyPath", &args(&["r1"])).is_err());
        assert!(Invocation::parse("setMyPath", &args(&["r1", "[]", "x"])).is_err());
    }

    #[test]
    fn test_parse_set_my_path() {
        let raw = r#"[{"x":1,"y":5},{"x":3,"y":4}]"#;
        let inv = Invocation::parse("setMyPath", &args(&["r1", raw])).unwrap();
        assert_eq!(
            inv,
            Invocation::SetMyPath {
                robot_id: "r1".to_string(),
                points: vec![Point::new(1.0, 5.0), Point::new(3.0, 4.0)],
            }
        );
        assert_eq!(inv.operation(), Operation::SetMyPath);
    }

    #[test]
    fn test_set_my_path_rejects_bad_points_and_ids() {
        assert!(matches!(
            Invocation::parse("setMyPath", &args(&["r1", "not json"])),
            Err(RegistryError::MalformedInput { .. })
        ));
        assert!(matches!(
            Invocation::parse("setMyPath", &args(&["", "[]"])),
            Err(RegistryError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_get_all_paths_requires_caller() {
        assert!(matches!(
            Invocation::parse("getAllPaths", &args(&[""])),
            Err(RegistryError::MalformedInput { .. })
        ));
        assert_eq!(
            Invocation::parse("getAllPaths", &args(&["r1"])).unwrap(),
            Invocation::GetAllPaths { caller_robot_id: "r1".to_string() }
        );
    }
}
