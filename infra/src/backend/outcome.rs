//! Tagged backend reply

use serde::Deserialize;

/// Wire shape shared by `/auth/login`, `/auth/signup` and `/auth/logout`
#[derive(Debug, Deserialize)]
pub(crate) struct BackendReply {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Decoded backend reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOutcome {
    Success { message: Option<String> },
    Failure { message: Option<String> },
}

impl BackendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BackendOutcome::Success { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            BackendOutcome::Success { message } | BackendOutcome::Failure { message } => {
                message.as_deref()
            }
        }
    }
}

impl From<BackendReply> for BackendOutcome {
    fn from(reply: BackendReply) -> Self {
        let message = reply.message.filter(|m| !m.trim().is_empty());
        if reply.success {
            BackendOutcome::Success { message }
        } else {
            BackendOutcome::Failure { message }
        }
    }
}
