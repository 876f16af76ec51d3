//! Link creation and resolution service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use url::Url;

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};

/// Attempts at inserting a generated code before giving up.
const MAX_GENERATE_ATTEMPTS: usize = 3;

/// Service for creating short links and resolving them on redirect.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a short code for redirection.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code is unknown.
    /// Returns [`AppError::Gone`] if the link expired before `now`.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    pub async fn resolve_for_redirect(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if link.is_expired_at(now) {
            return Err(AppError::gone(
                "Short link has expired",
                json!({ "code": code, "expired_at": link.expiration_date }),
            ));
        }

        Ok(link)
    }

    /// Creates a short link for `owner_id`.
    ///
    /// The short code is the alias when one is given, otherwise a random code.
    /// Generated codes that collide are retried a few times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is not http(s) or the alias
    /// breaks the alias rules. Returns [`AppError::Conflict`] if the alias is
    /// taken.
    pub async fn create_link(
        &self,
        owner_id: OwnerId,
        original_url: &str,
        alias: Option<String>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Result<Link, AppError> {
        let original_url = validate_target_url(original_url)?;

        if let Some(alias) = alias {
            validate_custom_code(&alias)?;

            return self
                .repository
                .create(NewLink {
                    owner_id,
                    original_url,
                    short_code: alias.clone(),
                    custom_alias: Some(alias),
                    expiration_date,
                })
                .await;
        }

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let new_link = NewLink {
                owner_id,
                original_url: original_url.clone(),
                short_code: generate_code(),
                custom_alias: None,
                expiration_date,
            };

            match self.repository.create(new_link).await {
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Generated short code collided, retrying");
                }
                other => return other,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Checks that the Link Store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn validate_target_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(AppError::bad_request(
            "Only http and https URLs can be shortened",
            json!({ "scheme": scheme }),
        )),
    }
}
