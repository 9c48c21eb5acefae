//! DTOs for alias access and statistics.

use serde::{Deserialize, Serialize};

/// Query parameters accepted by the access endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AccessParams {
    /// `true` (any case) requests statistics instead of a redirect.
    pub stats: Option<String>,
}

impl AccessParams {
    pub fn wants_stats(&self) -> bool {
        self.stats
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Click statistics for a short link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_clicks: u64,
    pub original_url: String,
    pub creation_date: String,
    pub expiry_date: String,
    pub click_details: ClickDetails,
}

/// Details of the access that produced this stats response.
///
/// No referrer or geolocation data is collected, so `source` and `location`
/// are always `"Unknown"`.
#[derive(Debug, Serialize)]
pub struct ClickDetails {
    pub timestamp: String,
    pub source: &'static str,
    pub location: &'static str,
}

impl ClickDetails {
    pub fn at(timestamp: String) -> Self {
        Self {
            timestamp,
            source: "Unknown",
            location: "Unknown",
        }
    }
}
