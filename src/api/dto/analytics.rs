//! DTOs for the owner analytics report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::report::{DailyClicks, DeviceBrowserCount, LinkSummary, Report};

/// Body of `GET /api/analytics`.
///
/// Field names are camelCase on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub urls: Vec<LinkDisplay>,
    pub clicks_over_time: Vec<DailyClicksDto>,
    pub device_stats: Vec<DeviceStatDto>,
}

/// One of the owner's links.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDisplay {
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expired: bool,
}

/// Clicks on one UTC calendar day, `date` formatted `YYYY-M-D`.
#[derive(Debug, Serialize)]
pub struct DailyClicksDto {
    pub date: String,
    pub clicks: u64,
}

/// Clicks for one `device - browser` pair.
#[derive(Debug, Serialize)]
pub struct DeviceStatDto {
    pub name: String,
    pub count: u64,
}

impl From<LinkSummary> for LinkDisplay {
    fn from(summary: LinkSummary) -> Self {
        Self {
            original_url: summary.original_url,
            short_url: summary.short_url,
            clicks: summary.clicks,
            created_at: summary.created_at,
            expired: summary.expired,
        }
    }
}

impl From<DailyClicks> for DailyClicksDto {
    fn from(day: DailyClicks) -> Self {
        Self {
            date: day.label(),
            clicks: day.clicks,
        }
    }
}

impl From<DeviceBrowserCount> for DeviceStatDto {
    fn from(row: DeviceBrowserCount) -> Self {
        Self {
            name: row.name(),
            count: row.count,
        }
    }
}

impl From<Report> for AnalyticsResponse {
    fn from(report: Report) -> Self {
        Self {
            urls: report.urls.into_iter().map(Into::into).collect(),
            clicks_over_time: report.clicks_over_time.into_iter().map(Into::into).collect(),
            device_stats: report.device_stats.into_iter().map(Into::into).collect(),
        }
    }
}
