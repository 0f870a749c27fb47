//! Resource DTOs matching the companion API's wire format

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// A managed resource as returned by the API.
///
/// Field names follow the API's JSON casing, which mixes exported Go-style
/// names with lowercase ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "ID")]
    pub id: u32,
    pub name: String,
    pub dns: String,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: String,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: String,
    #[serde(rename = "DeletedAt", default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
}

impl Resource {
    /// Reformat an RFC3339 timestamp as `YYYY-MM-DD HH:MM`, returning the
    /// input verbatim when it does not parse.
    pub fn format_timestamp(raw: &str) -> String {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed.format("%Y-%m-%d %H:%M").to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

/// Body for `POST /resource`
#[derive(Debug, Clone, Serialize)]
pub struct CreateRequest<'a> {
    pub name: &'a str,
    pub dns: &'a str,
}

/// Body for `PUT /resource?id=...`; empty fields are omitted
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns: Option<&'a str>,
}

/// Standard `{data, message}` envelope wrapping every successful response
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: String,
}

/// Error body the API returns on failed requests
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
}
