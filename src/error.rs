use std::error::Error as StdError;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unsupported shape `{type_name}`: {reason}")]
    UnsupportedShape {
        type_name: &'static str,
        reason: &'static str,
    },

    #[error("invalid field ordinals in `{container}`: {source}")]
    Ordinal {
        container: &'static str,
        #[source]
        source: OrdinalError,
    },

    #[error("need {needed} more byte(s)")]
    Shortage { needed: usize },

    #[error("{0}")]
    Hook(Box<dyn StdError + Send + Sync>),

    #[error("invalid traversal state: {0}")]
    Invalid(String),

    #[error("absent references nested deeper than {limit}")]
    DepthExceeded { limit: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Wraps an error raised by a custom codec hook.
    pub fn hook<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Hook(err.into())
    }

    /// Hook error carrying only a message.
    pub fn custom(msg: impl Into<String>) -> Self {
        let msg: String = msg.into();
        Self::Hook(msg.into())
    }

    pub(crate) fn unsupported(type_name: &'static str, reason: &'static str) -> Self {
        Self::UnsupportedShape { type_name, reason }
    }

    pub fn is_shortage(&self) -> bool {
        matches!(self, Self::Shortage { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrdinalError {
    #[error("malformed ordinal `{tag}` on field `{field}`")]
    Malformed { field: &'static str, tag: String },

    #[error("ordinal {ordinal} of field `{field}` out of range, container has {fields} fields")]
    OutOfRange {
        field: &'static str,
        ordinal: usize,
        fields: usize,
    },

    #[error("ordinal {ordinal} of field `{field}` duplicated")]
    Duplicate { field: &'static str, ordinal: usize },

    #[error("ordinals are gapped, nothing claims {missing} but {claimed} fields participate")]
    Gapped { missing: usize, claimed: usize },
}
