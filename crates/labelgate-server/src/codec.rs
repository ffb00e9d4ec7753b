//! Request decoding and response encoding for the filter endpoint.

use axum::body::{Body, Bytes};
use axum::http::request::Parts;
use labelgate_core::{ExtenderArgs, ExtenderError, ExtenderFilterResult, Result, Verbosity};
use std::fmt::Write;
use tracing::info;

/// Collect the request body.
///
/// The body stream is dropped once collected. Reaching `limit` or a broken
/// stream both surface as `BodyRead`.
pub async fn read_body(body: Body, limit: usize) -> Result<Bytes> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        ExtenderError::body_read(
            format!("failed to collect request body: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Decode `ExtenderArgs` from a collected body.
///
/// At `Verbosity::REQUEST_DUMP` the raw request is logged first.
pub fn decode_request(verbosity: Verbosity, parts: &Parts, body: &[u8]) -> Result<ExtenderArgs> {
    if body.is_empty() {
        return Err(ExtenderError::EmptyBody);
    }

    if verbosity.enabled(Verbosity::REQUEST_DUMP) {
        info!("http-request:\n{}", dump_request(parts, body));
    }

    labelgate_core::from_json(body)
}

/// Encode a filter result as a single newline-terminated JSON document
pub fn encode_response(result: &ExtenderFilterResult) -> Result<Vec<u8>> {
    let mut bytes = labelgate_core::to_json(result)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Render a request the way it appeared on the wire: request line, headers,
/// blank line, body
pub fn dump_request(parts: &Parts, body: &[u8]) -> String {
    let mut dump = String::new();

    let _ = write!(dump, "{} {} {:?}\r\n", parts.method, parts.uri, parts.version);
    for (name, value) in &parts.headers {
        let _ = write!(
            dump,
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
    dump.push_str("\r\n");
    dump.push_str(&String::from_utf8_lossy(body));

    dump
}
