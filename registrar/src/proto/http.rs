use roster::Confirmation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Body of a successful signup or unregister.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl From<Confirmation> for MessageBody {
    fn from(confirmation: Confirmation) -> Self {
        MessageBody {
            message: confirmation.to_string(),
        }
    }
}
