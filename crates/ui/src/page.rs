//! Page documents served by the layout server

use alloc::string::String;
use alloc::vec::Vec;

use serde_json::Value;

use platform::config::MAX_JSON_SIZE;

/// Screens the server can lay out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    /// Start screen
    #[default]
    Home,
    /// Now-playing screen
    Music,
}

impl Page {
    /// Path segment after `/pages`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Music => "/music",
        }
    }

    /// Parse a page name (`"home"`, `"/music"`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim_start_matches('/') {
            "home" => Some(Self::Home),
            "music" => Some(Self::Music),
            _ => None,
        }
    }

    /// Full URL of this page on the server at `base_url`.
    #[must_use]
    pub fn url(self, base_url: &str) -> String {
        alloc::format!("{base_url}/pages{}", self.path())
    }
}

/// Decoded page response.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    /// Repaint the whole screen before drawing
    pub clear: bool,
    /// Element descriptions, one JSON object each
    pub elements: Vec<Value>,
}

/// Decode a page response body.
///
/// The body must be a JSON object with an `elements` array; `clear` is
/// optional and defaults to `false`. Bodies larger than [`MAX_JSON_SIZE`]
/// are refused before parsing.
pub fn parse_page(body: &[u8]) -> Result<PageDocument, PageError> {
    if body.len() > MAX_JSON_SIZE {
        return Err(PageError::TooLarge);
    }
    let root: Value = serde_json::from_slice(body).map_err(|_| PageError::Malformed)?;
    let Value::Object(mut root) = root else {
        return Err(PageError::Malformed);
    };
    let clear = root.get("clear").and_then(Value::as_bool).unwrap_or(false);
    match root.remove("elements") {
        Some(Value::Array(elements)) => Ok(PageDocument { clear, elements }),
        _ => Err(PageError::MissingElements),
    }
}

/// Page decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageError {
    /// Body exceeds the accepted size
    TooLarge,
    /// Body is not a JSON object
    Malformed,
    /// `elements` missing, null or not an array
    MissingElements,
}

#[cfg(feature = "std")]
impl std::error::Error for PageError {}

impl core::fmt::Display for PageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLarge => write!(f, "page larger than {MAX_JSON_SIZE} bytes"),
            Self::Malformed => write!(f, "page is not a JSON object"),
            Self::MissingElements => write!(f, "page has no elements array"),
        }
    }
}
