//! Character catalog records.
//!
//! Summaries come from the list endpoint, details from the per-character
//! endpoint. Both are immutable once received; sentinel values such as
//! `"unknown"` or `"n/a"` are kept verbatim and only interpreted by the view.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Error returned when an identifier is empty or whitespace only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Character uid must not be empty")]
pub struct InvalidUid;

/// Server-assigned character identifier (e.g. `"1"` for Luke Skywalker).
///
/// Smart constructor rejects blank strings. Deserializes through the same check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Uid(String);

impl Uid {
    /// Smart constructor: validates a non-blank uid.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidUid> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InvalidUid);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Uid {
    type Error = InvalidUid;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimal record returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSummary {
    /// Server identifier.
    pub uid: Uid,
    /// Display name.
    pub name: String,
    /// Locator of the full record. May be empty when the API omits it.
    pub url: String,
}

impl CharacterSummary {
    /// Build a summary from its parts.
    pub fn new(uid: Uid, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            url: url.into(),
        }
    }

    /// Locator used to fetch this character's full record.
    ///
    /// Prefers the URL returned by the API, falls back to the uid.
    pub fn locator(&self) -> Locator {
        if self.url.trim().is_empty() {
            Locator::Uid(self.uid.clone())
        } else {
            Locator::Url(self.url.clone())
        }
    }
}

/// Full attribute record returned by the detail endpoint (`result.properties`).
///
/// Scalars tolerate `null` (empty) and numbers (their decimal text); list
/// fields tolerate `null` (empty). Any other type mismatch fails the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct CharacterDetails {
    /// Identifier; filled from `result.uid` when the properties lack it.
    #[serde(deserialize_with = "lenient_uid")]
    pub uid: Option<Uid>,
    /// Display name.
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    /// Height in centimetres, or a sentinel.
    #[serde(deserialize_with = "lenient_string")]
    pub height: String,
    /// Mass in kilograms, or a sentinel.
    #[serde(deserialize_with = "lenient_string")]
    pub mass: String,
    /// Hair colour.
    #[serde(deserialize_with = "lenient_string")]
    pub hair_color: String,
    /// Skin colour.
    #[serde(deserialize_with = "lenient_string")]
    pub skin_color: String,
    /// Eye colour.
    #[serde(deserialize_with = "lenient_string")]
    pub eye_color: String,
    /// Birth year in BBY/ABY notation.
    #[serde(deserialize_with = "lenient_string")]
    pub birth_year: String,
    /// Gender.
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,
    /// Locator of the homeworld planet record.
    #[serde(deserialize_with = "lenient_string")]
    pub homeworld: String,
    /// Locators of films the character appears in.
    #[serde(deserialize_with = "lenient_list")]
    pub films: Vec<String>,
    /// Locators of species records.
    #[serde(deserialize_with = "lenient_list")]
    pub species: Vec<String>,
    /// Locators of vehicle records.
    #[serde(deserialize_with = "lenient_list")]
    pub vehicles: Vec<String>,
    /// Locators of starship records.
    #[serde(deserialize_with = "lenient_list")]
    pub starships: Vec<String>,
    /// Creation timestamp (RFC 3339 string as sent by the API).
    #[serde(deserialize_with = "lenient_string")]
    pub created: String,
    /// Last edit timestamp (RFC 3339 string as sent by the API).
    #[serde(deserialize_with = "lenient_string")]
    pub edited: String,
    /// Canonical locator of this record.
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
}

impl CharacterDetails {
    /// Parsed creation timestamp, `None` if absent or malformed.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created)
    }

    /// Parsed edit timestamp, `None` if absent or malformed.
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.edited)
    }

    /// Combined count of vehicles and starships.
    pub fn craft_count(&self) -> usize {
        self.vehicles.len() + self.starships.len()
    }
}

fn scalar_text<E: de::Error>(value: Value) -> Result<String, E> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(E::custom(format!("expected a string, got {other}"))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    scalar_text(Value::deserialize(deserializer)?)
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.into_iter().map(scalar_text).collect(),
        other => Err(de::Error::custom(format!("expected a list, got {other}"))),
    }
}

/// Blank or unusable uids read as absent so the envelope uid can fill in.
fn lenient_uid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Uid>, D::Error> {
    let text = scalar_text::<D::Error>(Value::deserialize(deserializer)?)?;
    Ok(Uid::new(text).ok())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// One normalized page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharacterPage {
    /// Summaries in server order.
    pub characters: Vec<CharacterSummary>,
    /// Locator of the next page, if the server advertised one.
    pub next: Option<String>,
    /// Total matching records across all pages, when reported.
    pub total_records: Option<u64>,
    /// Total page count, when reported.
    pub total_pages: Option<u64>,
}

impl CharacterPage {
    /// Whether the server signalled a subsequent page.
    pub fn has_next(&self) -> bool {
        self.next.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Where to fetch a character's full record from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Resolved against the configured base address as `people/{uid}`.
    Uid(Uid),
    /// Absolute URL fetched verbatim.
    Url(String),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Uid(uid) => write!(f, "people/{uid}"),
            Locator::Url(url) => f.write_str(url),
        }
    }
}

/// Parameters of a single list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Name filter; empty means "list everyone".
    pub name: String,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl PageQuery {
    /// Build a query, trimming the name filter.
    pub fn new(name: &str, page: u32, limit: u32) -> Self {
        Self {
            name: name.trim().to_string(),
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Whether this is a name search rather than a plain listing.
    pub fn is_search(&self) -> bool {
        !self.name.is_empty()
    }
}
