//! Error types for folio conversions.

use thiserror::Error;

use crate::events::SinkError;

/// Errors that abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// The event sink refused an event, or returned a malformed answer.
    #[error("event sink failed on {kind} event: {source}")]
    Sink {
        kind: &'static str,
        #[source]
        source: SinkError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
