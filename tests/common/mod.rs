#![allow(dead_code)]

use async_trait::async_trait;
use axum::{Router, extract::ConnectInfo, middleware, routing::get};
use chrono::{DateTime, Utc};
use link_analytics::api::handlers::{health_handler, redirect_handler};
use link_analytics::api::middleware::{auth, tracing};
use link_analytics::api::routes::protected_routes;
use link_analytics::application::services::auth_service::hash_token;
use link_analytics::application::services::{AuthService, LinkService, ReportService};
use link_analytics::domain::click_event::ClickEvent;
use link_analytics::domain::entities::{Click, Link, NewClick, NewLink, OwnerId};
use link_analytics::domain::repositories::{
    ClickRepository, LinkRepository, OwnerRepository, TokenRepository,
};
use link_analytics::error::AppError;
use link_analytics::infrastructure::memory::InMemoryStore;
use link_analytics::state::AppState;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://lnk.example.com";

/// Injects a fixed peer address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Click store whose every call fails like an unreachable database.
pub struct UnavailableClickStore;

#[async_trait]
impl ClickRepository for UnavailableClickStore {
    async fn record_click(&self, _new_click: NewClick) -> Result<Click, AppError> {
        Err(AppError::store_unavailable("Storage unavailable", serde_json::json!({})))
    }

    async fn find_by_link_ids(&self, _link_ids: &[i64]) -> Result<Vec<Click>, AppError> {
        Err(AppError::store_unavailable(
            "connection refused (os error 111)",
            serde_json::json!({ "host": "db.internal" }),
        ))
    }
}

/// Builds state over `store`, reading clicks from `clicks`.
pub fn state_with(
    store: Arc<InMemoryStore>,
    clicks: Arc<dyn ClickRepository>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let links: Arc<dyn LinkRepository> = store.clone();
    let tokens: Arc<dyn TokenRepository> = store;

    let state = AppState {
        report_service: Arc::new(ReportService::new(links.clone(), clicks, BASE_URL)),
        link_service: Arc::new(LinkService::new(links)),
        auth_service: Arc::new(AuthService::new(tokens, SIGNING_SECRET.to_string())),
        click_sender: tx,
        behind_proxy: false,
    };

    (state, rx)
}

pub fn create_test_state(store: Arc<InMemoryStore>) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let clicks: Arc<dyn ClickRepository> = store.clone();
    state_with(store, clicks)
}

/// Application routes without rate limiting.
pub fn test_router(state: AppState) -> Router {
    let api = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(tracing::layer())
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

/// Creates an owner with an active token whose raw value is `token`.
pub async fn create_owner_with_token(store: &InMemoryStore, name: &str, token: &str) -> OwnerId {
    let owner = OwnerRepository::create(store, name).await.unwrap();
    store
        .create_token(owner.id, &format!("{name}-token"), &hash_token(SIGNING_SECRET, token))
        .await
        .unwrap();
    owner.id
}

pub fn new_link(owner_id: OwnerId, code: &str, url: &str) -> NewLink {
    NewLink {
        owner_id,
        original_url: url.to_string(),
        short_code: code.to_string(),
        custom_alias: None,
        expiration_date: None,
    }
}

pub fn new_click(
    link_id: i64,
    timestamp: DateTime<Utc>,
    device: Option<&str>,
    browser: Option<&str>,
) -> NewClick {
    NewClick {
        link_id,
        timestamp,
        ip: Some("127.0.0.1".to_string()),
        device: device.map(str::to_string),
        browser: browser.map(str::to_string),
        location: None,
    }
}

pub async fn create_pg_owner(pool: &PgPool, name: &str) -> OwnerId {
    let id: i64 = sqlx::query_scalar("INSERT INTO owners (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap();
    OwnerId(id)
}

pub async fn create_pg_link(pool: &PgPool, owner_id: OwnerId, code: &str) -> Link {
    let repo =
        link_analytics::infrastructure::persistence::PgLinkRepository::new(Arc::new(pool.clone()));
    LinkRepository::create(&repo, new_link(owner_id, code, "https://example.com"))
        .await
        .unwrap()
}
