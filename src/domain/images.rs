//! Listing image field normalization.
//!
//! The `images` column has been written in several shapes over time:
//! native arrays, JSON-encoded strings, comma-joined strings and arrays
//! exploded into one-character entries. Reads coerce any of them into an
//! ordered list of URLs and never fail. Writes are strict: a submitted value
//! either parses into valid URLs or the request is rejected.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::config::EXPLODED_IMAGES_MIN_LEN;
use crate::errors::{AppError, AppResult};

/// Storage representation for newly written image lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageEncoding {
    /// Native JSON array of strings
    #[default]
    Array,
    /// A single string holding a JSON-encoded array
    JsonString,
    /// A single comma-joined string
    Delimited,
}

impl ImageEncoding {
    /// Encode a validated URL list into the stored column value.
    pub fn encode(&self, urls: &[String]) -> Value {
        match self {
            ImageEncoding::Array => Value::from(urls.to_vec()),
            ImageEncoding::JsonString => Value::String(Value::from(urls.to_vec()).to_string()),
            ImageEncoding::Delimited => Value::String(urls.join(",")),
        }
    }

    /// Check that `urls` survive a write and read in this encoding.
    ///
    /// The delimited encoding cannot hold URLs containing its separator,
    /// brace wrapping or quote characters.
    pub fn accepts(&self, urls: &[String]) -> AppResult<()> {
        let unrepresentable = |url: &String| url.contains([',', '{', '}', '"']);
        match self {
            ImageEncoding::Delimited if urls.iter().any(unrepresentable) => {
                Err(AppError::InvalidImages)
            }
            _ => Ok(()),
        }
    }

    /// Validate then encode a URL list for storage.
    pub fn encode_checked(&self, urls: &[String]) -> AppResult<Value> {
        self.accepts(urls)?;
        Ok(self.encode(urls))
    }

    /// Canonical value for a stored `images` column, or `None` when the
    /// row is already in this encoding.
    pub fn rewrite(&self, raw: Option<&Value>) -> Option<Value> {
        let canonical = self.encode(&normalize_stored(raw));
        (raw != Some(&canonical)).then_some(canonical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageEncoding::Array => "array",
            ImageEncoding::JsonString => "json_string",
            ImageEncoding::Delimited => "delimited",
        }
    }
}

impl FromStr for ImageEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" => Ok(ImageEncoding::Array),
            "json_string" | "json" => Ok(ImageEncoding::JsonString),
            "delimited" | "csv" => Ok(ImageEncoding::Delimited),
            other => Err(format!(
                "unknown image encoding '{}', expected array, json_string or delimited",
                other
            )),
        }
    }
}

impl fmt::Display for ImageEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerce a stored `images` value into a list of URLs.
///
/// Unrecognized or corrupt shapes degrade to an empty list.
pub fn normalize_stored(raw: Option<&Value>) -> Vec<String> {
    match raw {
        Some(Value::Array(items)) => from_sequence(items),
        Some(Value::String(text)) => from_text(text),
        _ => Vec::new(),
    }
}

/// Parse a submitted `images` value (JSON-encoded string or array of strings).
///
/// `null` and the empty string mean "no images". Anything that does not
/// parse into a list of `http(s)://` URLs is rejected.
pub fn parse_submitted(raw: &Value) -> AppResult<Vec<String>> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => strict_sequence(items),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(Vec::new());
            }
            match serde_json::from_str::<Value>(text) {
                Ok(Value::Array(items)) => strict_sequence(&items),
                Ok(Value::String(inner)) => strict_delimited(&inner),
                Ok(Value::Null) => Ok(Vec::new()),
                Ok(_) | Err(_) => Err(AppError::InvalidImages),
            }
        }
        _ => Err(AppError::InvalidImages),
    }
}

fn from_sequence(items: &[Value]) -> Vec<String> {
    if is_exploded(items) {
        let joined: String = items.iter().filter_map(Value::as_str).collect();
        return split_delimited(&joined);
    }

    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| is_http_url(s))
        .map(str::to_owned)
        .collect()
}

fn from_text(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => from_sequence(&items),
        Ok(Value::String(inner)) => split_delimited(&inner),
        Ok(_) => Vec::new(),
        // Not JSON: comma-joined or Postgres array literal
        Err(_) => split_delimited(text),
    }
}

/// True when a text value was stored one character per array entry.
fn is_exploded(items: &[Value]) -> bool {
    items.len() > EXPLODED_IMAGES_MIN_LEN
        && items
            .iter()
            .all(|item| item.as_str().is_some_and(|s| s.chars().count() == 1))
}

fn split_delimited(text: &str) -> Vec<String> {
    delimited_parts(text)
        .filter(|s| is_http_url(s))
        .map(str::to_owned)
        .collect()
}

fn delimited_parts(text: &str) -> impl Iterator<Item = &str> {
    text.trim()
        .trim_matches(|c| c == '{' || c == '}')
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim())
        .filter(|part| !part.is_empty())
}

fn strict_sequence(items: &[Value]) -> AppResult<Vec<String>> {
    items
        .iter()
        .map(|item| match item.as_str().map(str::trim) {
            Some(url) if is_http_url(url) => Ok(url.to_owned()),
            _ => Err(AppError::InvalidImages),
        })
        .collect()
}

fn strict_delimited(text: &str) -> AppResult<Vec<String>> {
    delimited_parts(text)
        .map(|url| {
            if is_http_url(url) {
                Ok(url.to_owned())
            } else {
                Err(AppError::InvalidImages)
            }
        })
        .collect()
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
