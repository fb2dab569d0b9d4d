use thiserror::Error;

/// Message returned to callers when the place name is empty.
pub const MSG_LOCATION_REQUIRED: &str = "Location is required";
/// Message returned to callers when geocoding yields nothing, whatever the cause.
pub const MSG_LOCATION_NOT_FOUND: &str = "Could not find coordinates for the location";
/// Message returned to callers when either environmental request fails.
pub const MSG_FETCH_FAILED: &str = "Could not fetch weather data";

/// Failures of the place → coordinates → record pipeline.
///
/// `Display` carries the diagnostic detail; [`AnalysisError::user_message`]
/// is the uniform text safe to hand to remote callers.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Location cannot be empty.")]
    MissingLocation,

    #[error("Could not find coordinates for '{place}'. Please be more specific or check spelling.")]
    LocationNotFound { place: String },

    #[error("Could not connect to {endpoint} or the request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Could not decode the JSON response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AnalysisError::MissingLocation => MSG_LOCATION_REQUIRED,
            AnalysisError::LocationNotFound { .. } => MSG_LOCATION_NOT_FOUND,
            AnalysisError::Transport { .. }
            | AnalysisError::Status { .. }
            | AnalysisError::MalformedResponse { .. } => MSG_FETCH_FAILED,
        }
    }

    /// True for failures of the environmental requests (as opposed to input
    /// or geocoding problems).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AnalysisError::Transport { .. }
                | AnalysisError::Status { .. }
                | AnalysisError::MalformedResponse { .. }
        )
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_are_uniform() {
        assert_eq!(AnalysisError::MissingLocation.user_message(), "Location is required");

        let not_found = AnalysisError::LocationNotFound { place: "Atlantis".into() };
        assert_eq!(not_found.user_message(), "Could not find coordinates for the location");
        assert!(not_found.to_string().contains("Atlantis"));

        let malformed = AnalysisError::MalformedResponse {
            endpoint: "Open-Meteo forecast",
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(malformed.user_message(), "Could not fetch weather data");
        assert!(malformed.is_fetch_failure());
        assert!(!not_found.is_fetch_failure());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(150);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert!(out.len() <= 203);

        assert_eq!(truncate_body("short"), "short");
    }
}
