//! Frontend Models
//!
//! Data structures matching the REST API payloads.

use std::fmt;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server-assigned project identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub u64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Ongoing,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Pending,
        ProjectStatus::Ongoing,
        ProjectStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Ongoing => "ongoing",
            ProjectStatus::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Completed => "Completed",
        }
    }
}

/// Every editable project field. This is what the editor composes and what
/// create/update send; it never carries an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFields {
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    /// Free text; numeric server values are kept as their textual form
    #[serde(default, deserialize_with = "lenient_text")]
    pub budget: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub timeline: String,
    /// Due date, `null` on the wire when unset
    #[serde(default, deserialize_with = "lenient_date")]
    pub demo_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub contact_number: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reference_person: String,
    #[serde(default)]
    pub status: ProjectStatus,
}

impl ProjectFields {
    /// Name with surrounding whitespace removed
    pub fn trimmed_name(&self) -> &str {
        self.project_name.trim()
    }

    /// Date as the `YYYY-MM-DD` string a date input expects ("" when unset)
    pub fn demo_date_input(&self) -> String {
        self.demo_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Set the date from a date input value; anything unparsable clears it
    pub fn set_demo_date_input(&mut self, value: &str) {
        self.demo_date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
    }
}

/// A persisted project as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(flatten)]
    pub fields: ProjectFields,
}

impl Project {
    pub fn name(&self) -> &str {
        &self.fields.project_name
    }

    /// Case-insensitive substring match on the name; `needle` must already
    /// be lowercase
    pub fn name_contains(&self, needle: &str) -> bool {
        self.fields.project_name.to_lowercase().contains(needle)
    }
}

/// Login form payload
#[derive(Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair returned by `POST /api/login/`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(other) => Err(D::Error::custom(format!("expected text, got {other}"))),
    }
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => parse_day(text.trim()).map(Some).map_err(D::Error::custom),
    }
}

/// Accepts a bare `YYYY-MM-DD` or a timestamp that starts with one
fn parse_day(text: &str) -> chrono::ParseResult<NaiveDate> {
    match NaiveDate::parse_and_remainder(text, "%Y-%m-%d") {
        Ok((date, rest)) if rest.is_empty() || rest.starts_with(['T', ' ']) => Ok(date),
        Ok(_) => NaiveDate::parse_from_str(text, "%Y-%m-%d"),
        Err(err) => Err(err),
    }
}
