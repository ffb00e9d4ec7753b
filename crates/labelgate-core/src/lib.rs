//! Labelgate Core - Wire types and errors for the labelgate scheduler extender
//!
//! This crate provides:
//! - Scheduler extender request/response types (`ExtenderArgs`, `ExtenderFilterResult`)
//! - Error types with miette diagnostics
//! - The klog-style verbosity gate
//! - Serialization helpers

pub mod error;
pub mod types;
pub mod verbosity;

// Re-export commonly used types
pub use error::{ExtenderError, Result};
pub use types::{node_name, ExtenderArgs, ExtenderFilterResult, FailedNodesMap, NodeList};
pub use verbosity::Verbosity;

// Re-export k8s-openapi types for convenience
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{Node, Pod};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};

/// Serialize a value to JSON bytes
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(ExtenderError::encode)
}

/// Deserialize a value from JSON bytes.
///
/// Only the first JSON value is read; anything after it is ignored, matching
/// a streaming decoder reading a single document off the wire.
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(data: &[u8]) -> Result<T> {
    let mut stream = serde_json::Deserializer::from_slice(data).into_iter::<T>();

    match stream.next() {
        Some(Ok(value)) => Ok(value),
        Some(Err(e)) => Err(ExtenderError::malformed_json(data, e)),
        None => Err(ExtenderError::malformed(
            data.len(),
            "EOF while parsing a value",
        )),
    }
}
