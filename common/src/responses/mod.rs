use serde::{Deserialize, Serialize};

/// `{"error": {"message": ..., "status": ...}}` returned by the JSON API on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    pub status: u16,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
                status,
            },
        }
    }
}
