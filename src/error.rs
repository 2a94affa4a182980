use thiserror::Error;

use crate::models::MediaKind;

/// Errors produced while resolving metadata from TMDb.
///
/// Every failure is returned to the caller unchanged; the library never
/// retries, recovers, or logs on its own behalf.
#[derive(Debug, Error)]
pub enum TmdbError {
    /// The request could not be sent or the response body could not be read.
    #[error("request to TMDb failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// TMDb answered with a non-2xx status.
    #[error("Status Code {0} received from TMDb")]
    RemoteStatus(u16),

    /// A response body (or a serialized merged record) was not valid JSON
    /// for the expected shape.
    #[error("failed to decode TMDb data: {0}")]
    Decode(#[from] serde_json::Error),

    /// The search returned zero matches.
    #[error("no results found at TMDb")]
    NoResults,

    /// The top search match is a kind this library does not enrich.
    #[error("metadata for {0} results is not supported")]
    UnsupportedMedia(MediaKind),

    /// The top search match belongs to the other media kind; the caller
    /// used the wrong resolution path.
    #[error("top match is {0}; call the matching resolution method instead")]
    WrongEndpoint(MediaKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_status_embeds_numeric_code() {
        let err = TmdbError::RemoteStatus(404);
        assert_eq!(err.to_string(), "Status Code 404 received from TMDb");
    }

    #[test]
    fn wrong_endpoint_names_the_kind() {
        let err = TmdbError::WrongEndpoint(MediaKind::Tv);
        assert!(err.to_string().contains("tv"));
    }
}
