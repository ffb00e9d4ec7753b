// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Core error type for extender operations
#[derive(Error, Debug, Diagnostic)]
pub enum ExtenderError {
    /// Request arrived without a body
    #[error("request body empty")]
    #[diagnostic(
        code(labelgate::empty_body),
        help("The scheduler must POST an ExtenderArgs JSON document")
    )]
    EmptyBody,

    /// Body is not valid JSON or does not match the ExtenderArgs shape
    #[error("error decoding request at byte offset {offset}: {message}")]
    #[diagnostic(
        code(labelgate::malformed_json),
        help("Ensure the body is a JSON object with Pod, Nodes and NodeNames keys")
    )]
    MalformedJson {
        #[allow(unused)]
        offset: usize,
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<serde_json::Error>,
    },

    /// The body stream failed while being read or released
    #[error("failed to read request body: {message}")]
    #[diagnostic(
        code(labelgate::body_read),
        help("The client connection was likely reset mid-request")
    )]
    BodyRead {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Result could not be serialized
    #[error("Encode error: {message}")]
    #[diagnostic(
        code(labelgate::encode_error),
        help("This is likely a bug. Please report it with the full error details")
    )]
    Encode {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<serde_json::Error>,
    },
}

/// Result type alias for extender operations
pub type Result<T> = std::result::Result<T, ExtenderError>;

impl ExtenderError {
    /// Create a MalformedJson error from a serde_json failure, locating the
    /// byte offset of the fault within `body`
    pub fn malformed_json(body: &[u8], err: serde_json::Error) -> Self {
        Self::MalformedJson {
            offset: byte_offset(body, err.line(), err.column()),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a MalformedJson error with no underlying serde_json cause
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        Self::MalformedJson {
            offset,
            message: message.into(),
            source: None,
        }
    }

    /// Create a BodyRead error
    pub fn body_read(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::BodyRead {
            message: message.into(),
            source,
        }
    }

    /// Create an Encode error
    pub fn encode(err: serde_json::Error) -> Self {
        Self::Encode {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Byte offset of a decode fault, if this is a decode error
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedJson { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Convert serde_json's 1-based line and byte column into an absolute offset.
///
/// serde_json reports the column as the number of bytes consumed on the
/// faulting line, so the result is the count of bytes read before the fault.
fn byte_offset(body: &[u8], line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        body.iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)
            .unwrap_or(body.len())
    };

    (line_start + column).min(body.len())
}
