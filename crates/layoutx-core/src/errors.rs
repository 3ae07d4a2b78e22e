use layoutx_core_types::{RequestId, TraceId};
use thiserror::Error;

use crate::model::FieldId;

/// Result type alias using LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tool-call clients can match on.
/// The codes are part of the external contract and must not be renamed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Reconciliation
    LayoutNotFound,
    UnresolvedFieldReference,
    UnknownAttribute,
    InvalidWidth,
    MalformedSpecification,
    /// A persisted layout holds the same uid twice (corrupt store)
    DuplicateUid,

    // Input outside the tool boundary (seed files, CLI arguments)
    InvalidInput,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::LayoutNotFound => "ERR_LAYOUT_NOT_FOUND",
            ExErrorKind::UnresolvedFieldReference => "ERR_UNRESOLVED_FIELD_REFERENCE",
            ExErrorKind::UnknownAttribute => "ERR_UNKNOWN_ATTRIBUTE",
            ExErrorKind::InvalidWidth => "ERR_INVALID_WIDTH",
            ExErrorKind::MalformedSpecification => "ERR_MALFORMED_SPECIFICATION",
            ExErrorKind::DuplicateUid => "ERR_DUPLICATE_UID",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// for debugging. Everything above the core (store, engine, CLI) reports
/// failures as `ExError`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    uid: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            uid: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (layout id, field id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add element uid context
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(uid) = &self.uid {
            write!(f, " (uid: {})", uid)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for layout operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// No layout is stored under the given id
    #[error("Layout not found: {layout_id}")]
    LayoutNotFound { layout_id: String },

    /// A field placement names a field that does not exist
    #[error("Unresolved field reference: {field_id}")]
    UnresolvedFieldReference { field_id: FieldId },

    /// An attribute placement names an attribute the owner kind does not have
    #[error("Unknown attribute '{attribute}' for owner kind {owner_kind}")]
    UnknownAttribute {
        attribute: String,
        owner_kind: String,
    },

    #[error("Invalid width {width}: must be between 1 and 100")]
    InvalidWidth { width: i64, uid: Option<String> },

    /// The submitted groups cannot be interpreted
    #[error("Malformed specification: {reason}")]
    MalformedSpecification { reason: String },

    /// The persisted layout holds two elements with the same uid
    #[error("Duplicate element uid {uid} in layout {layout_id}")]
    DuplicateUid { layout_id: String, uid: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl LayoutError {
    /// Shorthand for building a `MalformedSpecification`
    pub fn malformed(reason: impl Into<String>) -> Self {
        LayoutError::MalformedSpecification {
            reason: reason.into(),
        }
    }
}

impl From<LayoutError> for ExError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::LayoutNotFound { layout_id } => {
                ExError::new(ExErrorKind::LayoutNotFound)
                    .with_entity_id(layout_id)
                    .with_message("Layout not found")
            }

            LayoutError::UnresolvedFieldReference { field_id } => {
                ExError::new(ExErrorKind::UnresolvedFieldReference)
                    .with_entity_id(field_id.to_string())
                    .with_message("Field does not exist")
            }

            LayoutError::UnknownAttribute {
                attribute,
                owner_kind,
            } => ExError::new(ExErrorKind::UnknownAttribute)
                .with_entity_id(attribute)
                .with_message(format!("Unknown attribute for owner kind {}", owner_kind)),

            LayoutError::InvalidWidth { width, uid } => {
                let err = ExError::new(ExErrorKind::InvalidWidth)
                    .with_message(format!("Width {} is outside 1..=100", width));
                match uid {
                    Some(uid) => err.with_uid(uid),
                    None => err,
                }
            }

            LayoutError::MalformedSpecification { reason } => {
                ExError::new(ExErrorKind::MalformedSpecification).with_message(reason)
            }

            LayoutError::DuplicateUid { layout_id, uid } => {
                ExError::new(ExErrorKind::DuplicateUid)
                    .with_entity_id(layout_id)
                    .with_uid(uid)
                    .with_message("Persisted layout contains a duplicate uid")
            }

            LayoutError::Persistence { message } => {
                ExError::new(ExErrorKind::Persistence).with_message(message)
            }

            LayoutError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            LayoutError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
