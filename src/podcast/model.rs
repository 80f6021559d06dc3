// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A podcast preview as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPodcast {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: String,
    pub seasons: u32,
    /// Genre ids, resolved against the genre catalog
    pub genres: Vec<u32>,
    /// ISO-8601 timestamp of the last update, kept verbatim
    pub updated: String,
}

impl RawPodcast {
    /// Parsed `updated` timestamp, if it is well-formed
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.updated)
    }

    /// Replace the genre ids with resolved genre titles
    pub fn enrich(&self, genres: Vec<String>) -> EnrichedPodcast {
        EnrichedPodcast {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            seasons: self.seasons,
            genres,
            updated: self.updated.clone(),
        }
    }
}

/// A podcast whose genre ids have been replaced by genre titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPodcast {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
    pub image: String,
    pub seasons: u32,
    /// Genre titles in the same order as the original ids
    pub genres: Vec<String>,
    pub updated: String,
}

impl EnrichedPodcast {
    /// Parsed `updated` timestamp, if it is well-formed
    pub fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.updated)
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts full RFC 3339 timestamps, date-times without an offset (taken as
/// UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
