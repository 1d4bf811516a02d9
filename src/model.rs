//! Domain entities and their wire contract.
//!
//! # Responsibilities
//! - Define the `Post` entity and its canonical JSON representation
//! - Pin the timestamp wire format and its canonical resolution
//! - Carry list filtering options between client and server untouched
//!
//! # Design Decisions
//! - Wire field names and order are part of the contract: `ID` (omitted
//!   while unset), then `Title, LinkURL, Body, SubmittedAt, AuthorUserID`;
//!   zero-valued fields still serialize with their zero representation
//! - Timestamps travel as RFC 3339 UTC truncated to whole seconds, and
//!   `0001-01-01T00:00:00Z` is the zero value, so round trips are stable
//!   regardless of clock precision on either side

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// The zero value for [`Post::submitted_at`]: the instant an unset
/// timestamp serializes to and deserializes from.
pub fn zero_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("year-one epoch is a valid date")
        .and_utc()
}

/// Truncate a timestamp to the canonical wire resolution (whole seconds,
/// UTC). Applied server-side when stamping a new post and client-side
/// after every decode, so both ends always hold comparable values.
pub fn normalize_time(t: DateTime<Utc>) -> DateTime<Utc> {
    t.trunc_subsecs(0)
}

fn id_is_unset(id: &i64) -> bool {
    *id == 0
}

/// A submitted news/link post.
///
/// Constructed client-side with user-supplied fields for creation
/// requests (`id`/`submitted_at` unset); returned server-side with all
/// fields populated. Each request produces a fresh value; nothing is
/// shared or mutated concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier; 0 means not yet created.
    #[serde(rename = "ID", default, skip_serializing_if = "id_is_unset")]
    pub id: i64,

    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "LinkURL", default)]
    pub link_url: String,

    #[serde(rename = "Body", default)]
    pub body: String,

    /// Set server-side on creation, in canonical resolution.
    #[serde(rename = "SubmittedAt", default = "zero_time", with = "wire_time")]
    pub submitted_at: DateTime<Utc>,

    #[serde(rename = "AuthorUserID", default)]
    pub author_user_id: i64,
}

impl Default for Post {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            link_url: String::new(),
            body: String::new(),
            submitted_at: zero_time(),
            author_user_id: 0,
        }
    }
}

impl Post {
    /// Normalize derived fields after a decode or construction.
    pub fn normalize(&mut self) {
        self.submitted_at = normalize_time(self.submitted_at);
    }
}

/// Filtering options for listing posts, passed through as query values.
///
/// Unset fields are omitted entirely, so an empty filter produces a
/// request with no query string at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListOptions {
    #[serde(rename = "PerPage", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,

    #[serde(rename = "Page", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl PostListOptions {
    const DEFAULT_PER_PAGE: u32 = 40;
    const MAX_PER_PAGE: u32 = 100;

    /// Page size after defaulting and capping.
    pub fn limit(&self) -> u32 {
        match self.per_page {
            Some(0) | None => Self::DEFAULT_PER_PAGE,
            Some(n) => n.min(Self::MAX_PER_PAGE),
        }
    }

    /// Offset of the first row for the requested page (pages are 1-based).
    pub fn offset(&self) -> u32 {
        let page = self.page.unwrap_or(1).max(1);
        (page - 1) * self.limit()
    }
}

/// RFC 3339 UTC with whole-second precision; the format every timestamp
/// uses on the wire.
mod wire_time {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(t: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
