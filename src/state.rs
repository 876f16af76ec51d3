//! Shared application state passed to every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, ReportService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::{ClickRepository, LinkRepository, TokenRepository};

pub type DynReportService = ReportService<dyn LinkRepository, dyn ClickRepository>;
pub type DynLinkService = LinkService<dyn LinkRepository>;
pub type DynAuthService = AuthService<dyn TokenRepository>;

/// Services and channels shared across requests.
///
/// Cloning is cheap: every field is reference counted. Stores are reached
/// only through the services held here.
#[derive(Clone)]
pub struct AppState {
    pub report_service: Arc<DynReportService>,
    pub link_service: Arc<DynLinkService>,
    pub auth_service: Arc<DynAuthService>,
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` when recording client IPs.
    pub behind_proxy: bool,
}
