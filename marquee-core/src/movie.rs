//! Schema-less movie records.
//!
//! Catalog documents carry whatever fields the seed data had. Only the few
//! fields the services act on (`_id`, `title`, `genres`, `poster`) get typed
//! accessors; everything else passes through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CatalogError, Result};

/// Document identifier field.
pub const ID_FIELD: &str = "_id";
/// Title field, used for lookups and title queries.
pub const TITLE_FIELD: &str = "title";
/// Array of genre names.
pub const GENRES_FIELD: &str = "genres";
/// Poster URL or placeholder.
pub const POSTER_FIELD: &str = "poster";

/// One catalog document, kept as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieRecord(Map<String, Value>);

impl MovieRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor used by fixtures and tests.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut record = Self::new();
        record
            .0
            .insert(TITLE_FIELD.to_string(), Value::String(title.into()));
        record
    }

    /// Builder form of [`set_poster`](Self::set_poster).
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.set_poster(poster);
        self
    }

    /// Replace `genres` with the given names.
    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let genres = genres
            .into_iter()
            .map(|genre| Value::String(genre.into()))
            .collect();
        self.0.insert(GENRES_FIELD.to_string(), Value::Array(genres));
        self
    }

    /// Set an arbitrary field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Identifier as a string, whether stored flat or as an extended-JSON
    /// `{"$oid": "..."}` object.
    pub fn id(&self) -> Option<&str> {
        match self.0.get(ID_FIELD)? {
            Value::String(id) => Some(id.as_str()),
            Value::Object(inner) => inner.get("$oid").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Title usable for lookups: present, a string, and not blank.
    pub fn title(&self) -> Option<&str> {
        self.0
            .get(TITLE_FIELD)
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
    }

    /// Genre names; non-string entries are skipped.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.0
            .get(GENRES_FIELD)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// Case-sensitive exact membership test against `genres`.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres().any(|candidate| candidate == genre)
    }

    /// The poster field, treating absent, non-string and empty values alike.
    pub fn poster(&self) -> Option<&str> {
        self.0
            .get(POSTER_FIELD)
            .and_then(Value::as_str)
            .filter(|poster| !poster.trim().is_empty())
    }

    /// Overwrite the poster field.
    pub fn set_poster(&mut self, poster: impl Into<String>) {
        self.0
            .insert(POSTER_FIELD.to_string(), Value::String(poster.into()));
    }

    /// Rewrites an extended-JSON `_id` (`{"$oid": "..."}`) into its plain hex
    /// string. Returns whether anything changed.
    pub fn flatten_object_id(&mut self) -> bool {
        let flat = match self.0.get(ID_FIELD) {
            Some(Value::Object(inner)) => inner
                .get("$oid")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        match flat {
            Some(id) => {
                self.0.insert(ID_FIELD.to_string(), Value::String(id));
                true
            }
            None => false,
        }
    }

    /// Raw access to any field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The record as a JSON object value.
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl TryFrom<Value> for MovieRecord {
    type Error = CatalogError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(CatalogError::MalformedRecord(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<MovieRecord> for Value {
    fn from(record: MovieRecord) -> Self {
        record.into_value()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Classification of a record's poster within one repair pass. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterStatus {
    /// No string poster, or a blank one.
    Missing,
    /// The poster resolves (or is the placeholder).
    Valid,
    /// A poster is set but does not resolve.
    Invalid,
}

impl PosterStatus {
    /// Whether the repair pass should look for a replacement.
    pub fn needs_repair(self) -> bool {
        !matches!(self, PosterStatus::Valid)
    }
}
