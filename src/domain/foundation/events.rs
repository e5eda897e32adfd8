//! Domain events and the envelope they travel in.
//!
//! Every mirrored fact becomes one JSON message on the ledger topic. The
//! envelope's `event_id` lets consumers drop replays.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// A fact recorded by the domain.
///
/// Implement with [`domain_event!`](crate::domain_event) rather than by hand.
pub trait DomainEvent: Send + Sync {
    /// Dotted name ending in a version suffix, e.g. `project.token_created.v1`.
    fn event_type(&self) -> &'static str;

    fn aggregate_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Implements [`DomainEvent`] for a struct with an `event_id: EventId` field.
///
/// ```ignore
/// domain_event! {
///     ProjectTokenCreated {
///         kind: "project.token_created.v1",
///         aggregate: "Project" => project_id,
///         at: created_at,
///     }
/// }
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event:ident {
            kind: $kind:literal,
            aggregate: $aggregate:literal => $id_field:ident,
            at: $at_field:ident $(,)?
        }
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $kind
            }

            fn aggregate_type(&self) -> &'static str {
                $aggregate
            }

            fn aggregate_id(&self) -> String {
                self.$id_field.to_string()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$at_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.event_id.clone()
            }
        }
    };
}

/// Event instance identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request context copied from the command that produced the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Wire form of a domain event, as submitted to the ledger topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    /// Parsed from the `.vN` suffix of `event_type`.
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    pub fn from_event<E>(event: &E) -> Result<Self, serde_json::Error>
    where
        E: DomainEvent + Serialize,
    {
        let payload = serde_json::to_value(event)?;
        Ok(Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_owned(),
            schema_version: schema_version(event.event_type()),
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_owned(),
            occurred_at: event.occurred_at(),
            payload,
            metadata: EventMetadata::default(),
        })
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(id.into());
        self
    }

    pub fn to_message_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.payload)
    }
}

/// Version suffix of an event type; unversioned names count as version 1.
fn schema_version(event_type: &str) -> u32 {
    match event_type.rsplit_once(".v") {
        Some((_, digits)) => digits.parse().unwrap_or(1),
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct YieldPaid {
        event_id: EventId,
        project_id: String,
        amount: f64,
        paid_at: Timestamp,
    }

    crate::domain_event! {
        YieldPaid {
            kind: "project.yield_paid.v2",
            aggregate: "Project" => project_id,
            at: paid_at,
        }
    }

    fn paid() -> YieldPaid {
        YieldPaid {
            event_id: EventId::from_string("evt-1"),
            project_id: "p-1".to_string(),
            amount: 12.5,
            paid_at: Timestamp::from_unix_secs(0),
        }
    }

    #[test]
    fn envelope_describes_the_event() {
        let envelope = EventEnvelope::from_event(&paid())
            .unwrap()
            .with_correlation_id("req-1")
            .with_user_id("investor-1");

        assert_eq!(envelope.event_id.as_str(), "evt-1");
        assert_eq!(envelope.schema_version, 2);
        assert_eq!((envelope.aggregate_type.as_str(), envelope.aggregate_id.as_str()), ("Project", "p-1"));
        assert_eq!(envelope.metadata.correlation_id.as_deref(), Some("req-1"));
        assert_eq!(envelope.payload_as::<YieldPaid>().unwrap().amount, 12.5);
    }

    #[test]
    fn schema_version_falls_back_to_one() {
        assert_eq!(schema_version("legacy.event"), 1);
        assert_eq!(schema_version("bad.vX"), 1);
        assert_eq!(schema_version("x.y.v10"), 10);
    }

    #[test]
    fn message_body_omits_empty_metadata() {
        let bytes = EventEnvelope::from_event(&paid()).unwrap().to_message_bytes().unwrap();
        let value: JsonValue = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["event_type"], "project.yield_paid.v2");
        assert_eq!(value["metadata"], serde_json::json!({}));
    }
}
