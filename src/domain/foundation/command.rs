//! Caller context passed to every application command.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Who issued a command, and the correlation id that ties its logs and
/// mirrored ledger messages back to the originating request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub user_id: UserId,
    correlation_id: String,
}

impl CommandMetadata {
    /// Metadata for `user_id` with a freshly generated correlation id.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: Uuid::new_v4().to_string(),
        }
    }

    /// Replaces the generated id, typically with the request's `x-request-id`.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.correlation_id = id;
        }
        self
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor() -> UserId {
        UserId::new("investor-1").unwrap()
    }

    #[test]
    fn generated_id_is_stable_across_reads() {
        let meta = CommandMetadata::new(investor());
        assert!(Uuid::parse_str(meta.correlation_id()).is_ok());
        assert_eq!(meta.correlation_id(), meta.clone().correlation_id());
    }

    #[test]
    fn request_id_replaces_generated_one() {
        let meta = CommandMetadata::new(investor()).with_correlation_id("req-42");
        assert_eq!(meta.correlation_id(), "req-42");

        let blank = CommandMetadata::new(investor()).with_correlation_id("  ");
        assert_ne!(blank.correlation_id(), "  ");
    }
}
