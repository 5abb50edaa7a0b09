use crate::common::{RegistryError, RegistryResult};
use serde::{Deserialize, Serialize};

pub const STATUS_OK: i32 = 200;
pub const STATUS_ERROR: i32 = 500;

/// Peer-style response returned to the ledger runtime for every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Vec<u8>,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(err: &RegistryError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: err.to_string(),
            payload: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl From<RegistryResult<Vec<u8>>> for Response {
    fn from(result: RegistryResult<Vec<u8>>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(&e),
        }
    }
}
