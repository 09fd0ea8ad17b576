//! Wire shape of one element description
//!
//! Every field is optional at this layer; defaults, clamping and the
//! required-field rules are applied when the typed element is built.

use serde::Deserialize;
use serde_json::Value;

use super::ElementError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawElement<'a> {
    #[serde(rename = "type", borrow)]
    pub kind: Option<&'a str>,
    pub id: Option<u16>,
    #[serde(borrow)]
    pub text: Option<&'a str>,
    pub x: Option<i16>,
    pub y: Option<i16>,
    #[serde(borrow)]
    pub anchor: Option<&'a str>,
    pub level: Option<u8>,
    #[serde(borrow)]
    pub callback: Option<&'a str>,

    // button
    pub padding_x: Option<i64>,
    pub padding_y: Option<i64>,
    pub radius: Option<i64>,
    pub filled: Option<bool>,

    // image
    #[serde(borrow)]
    pub name: Option<&'a str>,
    #[serde(borrow)]
    pub endpoint: Option<&'a str>,
    #[serde(borrow)]
    pub path: Option<&'a str>,
    pub width: Option<i16>,
    pub height: Option<i16>,
    pub inverted: Option<bool>,
}

impl<'a> RawElement<'a> {
    pub(crate) fn from_value(value: &'a Value) -> Result<Self, ElementError> {
        if !value.is_object() {
            return Err(ElementError::Malformed);
        }
        Self::deserialize(value).map_err(|_| ElementError::Malformed)
    }
}

/// Copy `s` into a fixed-capacity string.
pub(crate) fn bounded<const N: usize>(s: &str) -> Result<heapless::String<N>, ElementError> {
    heapless::String::try_from(s).map_err(|_| ElementError::FieldTooLong)
}
