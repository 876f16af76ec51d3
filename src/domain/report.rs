//! Click aggregation for owner reports.
//!
//! Pure functions over already-fetched [`Link`]s and [`Click`]s. Nothing in
//! here touches a store, so the same inputs always produce the same
//! [`Report`], row order included.
//!
//! # Day attribution
//!
//! Events are bucketed by their calendar date in **UTC**. Timestamps are
//! stored as `timestamptz` and read back as UTC; no per-owner time zone is
//! applied. An event at `2024-01-05T23:59:59Z` counts for `2024-1-5`, one at
//! `2024-01-06T00:00:00Z` for `2024-1-6`.
//!
//! # Ordering
//!
//! - time series rows are ordered chronologically by the date value, so
//!   `2024-2-9` comes before `2024-10-1`
//! - device/browser rows are ordered by `(device, browser)`; clients must not
//!   depend on it, it only keeps the output stable

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::domain::entities::{Click, Link};

/// Label used when an event has no device or no browser.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Number of clicks on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyClicks {
    pub date: NaiveDate,
    pub clicks: u64,
}

impl DailyClicks {
    /// Formats the date as `YYYY-M-D` without zero padding.
    pub fn label(&self) -> String {
        format!(
            "{}-{}-{}",
            self.date.year(),
            self.date.month(),
            self.date.day()
        )
    }
}

/// Number of clicks for one `(device, browser)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBrowserCount {
    pub device: String,
    pub browser: String,
    pub count: u64,
}

impl DeviceBrowserCount {
    /// Display name, `"<device> - <browser>"`.
    pub fn name(&self) -> String {
        format!("{} - {}", self.device, self.browser)
    }
}

/// Display record for one link in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkSummary {
    pub link_id: i64,
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expired: bool,
}

/// Aggregated analytics for one owner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub urls: Vec<LinkSummary>,
    pub clicks_over_time: Vec<DailyClicks>,
    pub device_stats: Vec<DeviceBrowserCount>,
}

impl Report {
    /// Report for an owner without links.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.clicks_over_time.is_empty() && self.device_stats.is_empty()
    }
}

/// Stored click counter that disagrees with the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterDrift {
    pub link_id: i64,
    pub stored: i64,
    pub counted: i64,
}

/// Builds the full report from an owner's links and their click events.
///
/// `now` decides the `expired` flag of each link; callers pass the request
/// time.
pub fn assemble(links: &[Link], clicks: &[Click], base_url: &str, now: DateTime<Utc>) -> Report {
    Report {
        urls: links
            .iter()
            .map(|link| summarize_link(link, base_url, now))
            .collect(),
        clicks_over_time: clicks_over_time(clicks),
        device_stats: device_breakdown(clicks),
    }
}

/// Groups events by UTC calendar date, oldest first, omitting empty days.
pub fn clicks_over_time(clicks: &[Click]) -> Vec<DailyClicks> {
    let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for click in clicks {
        *per_day.entry(click.timestamp.date_naive()).or_default() += 1;
    }

    per_day
        .into_iter()
        .map(|(date, clicks)| DailyClicks { date, clicks })
        .collect()
}

/// Groups events by `(device, browser)`, substituting [`UNKNOWN_LABEL`] for
/// missing values.
pub fn device_breakdown(clicks: &[Click]) -> Vec<DeviceBrowserCount> {
    let mut per_pair: BTreeMap<(&str, &str), u64> = BTreeMap::new();
    for click in clicks {
        let key = (label(click.device.as_deref()), label(click.browser.as_deref()));
        *per_pair.entry(key).or_default() += 1;
    }

    per_pair
        .into_iter()
        .map(|((device, browser), count)| DeviceBrowserCount {
            device: device.to_string(),
            browser: browser.to_string(),
            count,
        })
        .collect()
}

/// Formats a link for display.
pub fn summarize_link(link: &Link, base_url: &str, now: DateTime<Utc>) -> LinkSummary {
    LinkSummary {
        link_id: link.id,
        original_url: link.original_url.clone(),
        short_url: short_url(base_url, &link.short_code),
        clicks: link.total_clicks,
        created_at: link.created_at,
        expired: link.is_expired_at(now),
    }
}

/// Joins the public base URL and a short code with exactly one slash.
pub fn short_url(base_url: &str, short_code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), short_code)
}

/// Compares each link's stored counter with a recount of `clicks`.
///
/// Links are read before their events, so a click recorded in between makes
/// the recount higher than the stored counter without any real drift. Only
/// counters that exceed the recount are returned.
pub fn find_counter_drift(links: &[Link], clicks: &[Click]) -> Vec<CounterDrift> {
    let mut counted: HashMap<i64, i64> = HashMap::with_capacity(links.len());
    for click in clicks {
        *counted.entry(click.link_id).or_default() += 1;
    }

    links
        .iter()
        .filter_map(|link| {
            let counted = counted.get(&link.id).copied().unwrap_or(0);
            (link.total_clicks > counted).then_some(CounterDrift {
                link_id: link.id,
                stored: link.total_clicks,
                counted,
            })
        })
        .collect()
}

fn label(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_LABEL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OwnerId;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn click(id: i64, link_id: i64, ts: DateTime<Utc>, device: Option<&str>, browser: Option<&str>) -> Click {
        Click {
            id,
            link_id,
            timestamp: ts,
            ip: None,
            device: device.map(str::to_string),
            browser: browser.map(str::to_string),
            location: None,
        }
    }

    fn link(id: i64, code: &str, total_clicks: i64, expiration_date: Option<DateTime<Utc>>) -> Link {
        Link {
            id,
            owner_id: OwnerId(1),
            original_url: format!("https://example.com/{code}"),
            short_code: code.to_string(),
            custom_alias: None,
            created_at: at(2024, 1, 1, 12, 0, 0),
            expiration_date,
            total_clicks,
        }
    }

    #[test]
    fn test_reference_example() {
        let day = at(2024, 1, 5, 10, 0, 0);
        let links = vec![link(1, "abc1", 3, None)];
        let clicks = vec![
            click(1, 1, day, Some("mobile"), Some("Chrome")),
            click(2, 1, day + Duration::minutes(5), Some("mobile"), Some("Chrome")),
            click(3, 1, day + Duration::hours(2), Some("desktop"), Some("Firefox")),
        ];

        let report = assemble(&links, &clicks, "https://lnk.example.com", day);

        assert_eq!(report.clicks_over_time.len(), 1);
        assert_eq!(report.clicks_over_time[0].label(), "2024-1-5");
        assert_eq!(report.clicks_over_time[0].clicks, 3);

        let names: Vec<(String, u64)> = report
            .device_stats
            .iter()
            .map(|row| (row.name(), row.count))
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&("mobile - Chrome".to_string(), 2)));
        assert!(names.contains(&("desktop - Firefox".to_string(), 1)));

        assert_eq!(report.urls[0].short_url, "https://lnk.example.com/abc1");
        assert_eq!(report.urls[0].clicks, 3);
        assert!(!report.urls[0].expired);
    }

    #[test]
    fn test_empty_inputs_give_empty_report() {
        let report = assemble(&[], &[], "https://lnk.example.com", Utc::now());
        assert!(report.is_empty());
        assert_eq!(report, Report::empty());
    }

    #[test]
    fn test_time_series_is_chronological_not_lexicographic() {
        let clicks = vec![
            click(1, 1, at(2024, 10, 1, 8, 0, 0), None, None),
            click(2, 1, at(2024, 2, 9, 8, 0, 0), None, None),
            click(3, 1, at(2024, 2, 10, 8, 0, 0), None, None),
            click(4, 1, at(2023, 12, 31, 8, 0, 0), None, None),
        ];

        let labels: Vec<String> = clicks_over_time(&clicks)
            .iter()
            .map(DailyClicks::label)
            .collect();

        assert_eq!(labels, vec!["2023-12-31", "2024-2-9", "2024-2-10", "2024-10-1"]);
    }

    #[test]
    fn test_time_series_is_sparse() {
        let clicks = vec![
            click(1, 1, at(2024, 3, 1, 0, 0, 0), None, None),
            click(2, 1, at(2024, 3, 4, 0, 0, 0), None, None),
        ];

        let series = clicks_over_time(&clicks);

        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|row| row.clicks == 1));
    }

    #[test]
    fn test_day_boundaries_use_utc() {
        let clicks = vec![
            click(1, 1, at(2024, 1, 5, 23, 59, 59), None, None),
            click(2, 1, at(2024, 1, 6, 0, 0, 0), None, None),
        ];

        let series = clicks_over_time(&clicks);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label(), "2024-1-5");
        assert_eq!(series[1].label(), "2024-1-6");
    }

    #[test]
    fn test_missing_device_and_browser_become_unknown() {
        let ts = at(2024, 1, 5, 10, 0, 0);
        let clicks = vec![
            click(1, 1, ts, None, Some("Safari")),
            click(2, 1, ts, Some("mobile"), None),
            click(3, 1, ts, None, None),
            click(4, 1, ts, Some(""), Some("")),
        ];

        let names: Vec<(String, u64)> = device_breakdown(&clicks)
            .iter()
            .map(|row| (row.name(), row.count))
            .collect();

        assert!(names.contains(&("Unknown - Safari".to_string(), 1)));
        assert!(names.contains(&("mobile - Unknown".to_string(), 1)));
        assert!(names.contains(&("Unknown - Unknown".to_string(), 2)));
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_group_sums_equal_event_count() {
        let base = at(2024, 1, 28, 6, 0, 0);
        let devices = [Some("mobile"), Some("desktop"), None];
        let browsers = [Some("Chrome"), None, Some("Firefox"), Some("Safari")];
        let clicks: Vec<Click> = (0..57)
            .map(|i| {
                click(
                    i,
                    1 + i % 3,
                    base + Duration::hours(i * 7),
                    devices[(i % 3) as usize],
                    browsers[(i % 4) as usize],
                )
            })
            .collect();

        let series_total: u64 = clicks_over_time(&clicks).iter().map(|r| r.clicks).sum();
        let device_total: u64 = device_breakdown(&clicks).iter().map(|r| r.count).sum();

        assert_eq!(series_total, 57);
        assert_eq!(device_total, 57);
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let ts = at(2024, 5, 1, 9, 0, 0);
        let links = vec![link(1, "a", 2, None), link(2, "b", 1, None)];
        let clicks = vec![
            click(1, 1, ts, Some("mobile"), Some("Chrome")),
            click(2, 2, ts, Some("desktop"), Some("Edge")),
            click(3, 1, ts + Duration::days(1), Some("tablet"), Some("Safari")),
        ];

        let first = assemble(&links, &clicks, "https://x.io", ts);
        let mut reversed = clicks.clone();
        reversed.reverse();
        let second = assemble(&links, &reversed, "https://x.io", ts);

        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_flag() {
        let now = at(2024, 6, 1, 0, 0, 0);
        let past = link(1, "old", 0, Some(now - Duration::days(1)));
        let none = link(2, "forever", 0, None);
        let future = link(3, "soon", 0, Some(now + Duration::days(1)));

        assert!(summarize_link(&past, "https://x.io", now).expired);
        assert!(!summarize_link(&none, "https://x.io", now).expired);
        assert!(!summarize_link(&future, "https://x.io", now).expired);
    }

    #[test]
    fn test_short_url_does_not_double_slash() {
        assert_eq!(short_url("https://x.io/", "abc"), "https://x.io/abc");
        assert_eq!(short_url("https://x.io", "abc"), "https://x.io/abc");
    }

    #[test]
    fn test_counter_drift_detects_mismatch() {
        let ts = at(2024, 5, 1, 9, 0, 0);
        let links = vec![link(1, "ok", 2, None), link(2, "off", 5, None), link(3, "none", 0, None)];
        let clicks = vec![
            click(1, 1, ts, None, None),
            click(2, 1, ts, None, None),
            click(3, 2, ts, None, None),
        ];

        let drift = find_counter_drift(&links, &clicks);

        assert_eq!(
            drift,
            vec![CounterDrift {
                link_id: 2,
                stored: 5,
                counted: 1
            }]
        );
    }

    #[test]
    fn test_counter_behind_recount_is_not_drift() {
        let ts = at(2024, 5, 1, 9, 0, 0);
        // Click landed between the link read and the event read.
        let links = vec![link(2, "busy", 0, None)];
        let clicks = vec![click(1, 2, ts, None, None)];

        assert!(find_counter_drift(&links, &clicks).is_empty());
    }
}
