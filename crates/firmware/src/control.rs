//! Refresh control endpoints
//!
//! The layout server nudges the device over plain HTTP when a page changes.
//! Each endpoint stores a [`RefreshType`] in the shared [`RefreshRequest`];
//! the render loop picks it up on its next tick.
//!
//! | Path                                   | Request            |
//! |----------------------------------------|--------------------|
//! | `/refresh`                             | `RefetchElements`  |
//! | `/full_refresh`, `/complete_refresh`   | `DisplayComplete`  |
//! | `/soft_refresh`, `/partial_refresh`    | `DisplayPartial`   |
//! | `/fast_refresh`                        | `DisplayFast`      |

use tracing::info;

use ui::{RefreshRequest, RefreshType};

/// Reasons a control request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
    /// Path is not a control endpoint
    NotFound,
    /// Only GET and POST are accepted
    MethodNotAllowed,
}

impl ControlError {
    /// HTTP status for this refusal.
    #[must_use]
    pub const fn status(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControlError {}

impl core::fmt::Display for ControlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "not found"),
            Self::MethodNotAllowed => write!(f, "method not allowed"),
        }
    }
}

/// Response to a control request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlResponse {
    /// HTTP status
    pub status: u16,
    /// Plain-text body
    pub body: &'static str,
}

/// Map a request line to the refresh it asks for. Query strings are ignored.
pub fn route(method: &str, path: &str) -> Result<RefreshType, ControlError> {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    let kind = match path {
        "/refresh" => RefreshType::RefetchElements,
        "/full_refresh" | "/complete_refresh" => RefreshType::DisplayComplete,
        "/soft_refresh" | "/partial_refresh" => RefreshType::DisplayPartial,
        "/fast_refresh" => RefreshType::DisplayFast,
        _ => return Err(ControlError::NotFound),
    };
    if method.eq_ignore_ascii_case("GET") || method.eq_ignore_ascii_case("POST") {
        Ok(kind)
    } else {
        Err(ControlError::MethodNotAllowed)
    }
}

/// Route a request and store the resulting refresh in `refresh`.
pub fn handle(method: &str, path: &str, refresh: &RefreshRequest) -> ControlResponse {
    match route(method, path) {
        Ok(kind) => {
            refresh.request(kind);
            info!(path, kind = kind.as_str(), "refresh requested");
            ControlResponse { status: 200, body: "OK" }
        }
        Err(e) => ControlResponse {
            status: e.status(),
            body: match e {
                ControlError::NotFound => "Not Found",
                ControlError::MethodNotAllowed => "Method Not Allowed",
            },
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_endpoint_maps_to_its_tier() {
        let cases = [
            ("/refresh", RefreshType::RefetchElements),
            ("/full_refresh", RefreshType::DisplayComplete),
            ("/complete_refresh", RefreshType::DisplayComplete),
            ("/soft_refresh", RefreshType::DisplayPartial),
            ("/partial_refresh", RefreshType::DisplayPartial),
            ("/fast_refresh", RefreshType::DisplayFast),
        ];
        for (path, kind) in cases {
            assert_eq!(route("GET", path), Ok(kind), "{path}");
            assert_eq!(route("POST", path), Ok(kind), "{path}");
        }
    }

    #[test]
    fn query_string_is_ignored() {
        assert_eq!(route("GET", "/fast_refresh?src=server"), Ok(RefreshType::DisplayFast));
    }

    #[test]
    fn refusals() {
        assert_eq!(route("GET", "/reboot"), Err(ControlError::NotFound));
        assert_eq!(route("DELETE", "/refresh"), Err(ControlError::MethodNotAllowed));
    }

    #[test]
    fn handle_stores_highest_request() {
        let refresh = RefreshRequest::default();
        assert_eq!(handle("POST", "/refresh", &refresh).status, 200);
        assert_eq!(handle("GET", "/complete_refresh", &refresh).status, 200);
        assert_eq!(handle("GET", "/fast_refresh", &refresh).status, 200);
        assert_eq!(refresh.take(), RefreshType::DisplayComplete);
        assert_eq!(refresh.take(), RefreshType::NoRefresh);
    }

    #[test]
    fn refused_requests_leave_refresh_alone() {
        let refresh = RefreshRequest::default();
        assert_eq!(handle("PUT", "/refresh", &refresh), ControlResponse { status: 405, body: "Method Not Allowed" });
        assert_eq!(handle("GET", "/nope", &refresh).status, 404);
        assert_eq!(refresh.peek(), RefreshType::NoRefresh);
    }
}
