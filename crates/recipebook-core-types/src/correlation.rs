//! Correlation identifiers
//!
//! The outer surface (the CLI today) creates one `RequestContext` per
//! invocation, enters a span carrying its ids, and reports the request id
//! alongside any error.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! correlation_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Fresh time-ordered identifier (UUIDv7)
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Adopt an identifier issued elsewhere
            pub fn from_string(value: String) -> Self {
                Self(value)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

correlation_id!(
    /// Identifies one inbound request
    RequestId
);

correlation_id!(
    /// Identifies a trace spanning several requests
    TraceId
);

/// Ids attached to one request
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a trace started by the caller
    pub fn within_trace(trace_id: TraceId) -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: Some(trace_id),
        }
    }
}
