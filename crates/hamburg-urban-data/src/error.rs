//! Error types for the urban data client.

/// Errors that can occur when talking to the urban data platform.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Timeout, transport-level fault, or HTTP error status. Carries a
    /// human-readable message and never any partial data.
    #[error("{0}")]
    Connection(String),
    /// The request succeeded but the response did not carry the
    /// expected GeoJSON content type.
    #[error("Unexpected content type response from the API: {content_type}")]
    Protocol {
        /// Value of the `Content-Type` response header.
        content_type: String,
        /// Raw response body, read as text for diagnostics.
        body: String,
    },
    /// A feature record could not be mapped onto a typed record, for
    /// example because `properties` or `geometry` is absent.
    #[error("unable to map feature field `{0}`")]
    Mapping(String),
}
