//! Click aggregation reporter.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::OwnerId;
use crate::domain::report::{self, Report};
use crate::domain::repositories::{ClickRepository, LinkRepository};
use crate::error::AppError;

/// Builds owner reports from the Link Store and the Click Event Store.
///
/// Stateless apart from its store handles: concurrent calls for the same or
/// different owners do not interact, and nothing is ever written.
pub struct ReportService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    links: Arc<L>,
    clicks: Arc<C>,
    base_url: String,
}

impl<L, C> ReportService<L, C>
where
    L: LinkRepository + ?Sized,
    C: ClickRepository + ?Sized,
{
    /// Creates a new report service.
    ///
    /// `base_url` is the public origin short codes are appended to.
    pub fn new(links: Arc<L>, clicks: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            links,
            clicks,
            base_url: base_url.into(),
        }
    }

    /// Builds the report for `owner_id` as of now.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if either store fails. No
    /// partial report is ever returned.
    pub async fn build_report(&self, owner_id: OwnerId) -> Result<Report, AppError> {
        self.build_report_at(owner_id, Utc::now()).await
    }

    /// Builds the report for `owner_id`, evaluating link expiry at `now`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::build_report`].
    pub async fn build_report_at(
        &self,
        owner_id: OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Report, AppError> {
        let links = self.links.find_by_owner(owner_id).await?;
        if links.is_empty() {
            debug!(%owner_id, "Owner has no links");
            return Ok(Report::empty());
        }

        let link_ids: Vec<i64> = links.iter().map(|link| link.id).collect();
        let clicks = self.clicks.find_by_link_ids(&link_ids).await?;

        for drift in report::find_counter_drift(&links, &clicks) {
            warn!(
                %owner_id,
                link_id = drift.link_id,
                stored = drift.stored,
                counted = drift.counted,
                "Stored click counter differs from event log"
            );
        }

        debug!(
            %owner_id,
            links = links.len(),
            clicks = clicks.len(),
            "Report assembled"
        );

        Ok(report::assemble(&links, &clicks, &self.base_url, now))
    }
}
