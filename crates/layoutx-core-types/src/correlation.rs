//! Correlation ids for tool calls
//!
//! A tool call carries a `RequestContext` so that the error it may return can
//! be tied back to the client request that caused it.

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
            /// Mint a time-ordered id
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Adopt an id chosen by the caller
            pub fn from_string(s: String) -> Self {
                Self(s)
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
    /// Identifies one tool call
    RequestId
);

correlation_id!(
    /// Identifies the client-side operation a tool call belongs to
    TraceId
);

/// Ids attached to everything produced while serving one tool call
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_request_id(request_id: RequestId) -> Self {
        Self {
            request_id,
            trace_id: None,
        }
    }

    pub fn with_trace_id(self, trace_id: TraceId) -> Self {
        Self {
            trace_id: Some(trace_id),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_contexts_get_distinct_request_ids() {
        let a = RequestContext::new();
        let b = RequestContext::new();

        assert_ne!(a.request_id, b.request_id);
        assert!(a.trace_id.is_none());
    }

    #[test]
    fn test_caller_supplied_ids_are_kept_verbatim() {
        let ctx = RequestContext::with_request_id(RequestId::from_string("req-7".to_string()))
            .with_trace_id(TraceId::from_string("trace-7".to_string()));

        assert_eq!(ctx.request_id.to_string(), "req-7");
        assert_eq!(ctx.trace_id.as_ref().map(TraceId::as_str), Some("trace-7"));
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RequestId::from_string("req-1".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"req-1\"");
    }
}
