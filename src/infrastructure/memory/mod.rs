//! In-process implementation of every repository trait.
//!
//! Mirrors the PostgreSQL constraints that callers rely on: unique short
//! codes, owner and link references, and the click counter being bumped in
//! the same critical section as the event insert. Used by integration tests
//! and for running the service without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Click, Link, NewClick, NewLink, Owner, OwnerId};
use crate::domain::repositories::{
    ApiToken, ClickRepository, LinkRepository, OwnerRepository, TokenRepository,
};
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    owners: Vec<Owner>,
    links: Vec<Link>,
    clicks: Vec<Click>,
    tokens: Vec<StoredToken>,
    next_id: i64,
}

struct StoredToken {
    token: ApiToken,
    last_used_at: Option<DateTime<Utc>>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owner_exists(&self, id: OwnerId) -> bool {
        self.owners.iter().any(|o| o.id == id)
    }
}

/// Repository backed by process memory.
///
/// Ids are allocated from a single sequence shared by all tables.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link with an explicit creation time.
    ///
    /// # Errors
    ///
    /// Same as [`LinkRepository::create`].
    pub async fn create_link_at(
        &self,
        new_link: NewLink,
        created_at: DateTime<Utc>,
    ) -> Result<Link, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.owner_exists(new_link.owner_id) {
            return Err(missing_reference("links_owner_id_fkey"));
        }
        if tables.links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_code_key" }),
            ));
        }

        let link = Link {
            id: tables.next_id(),
            owner_id: new_link.owner_id,
            original_url: new_link.original_url,
            short_code: new_link.short_code,
            custom_alias: new_link.custom_alias,
            created_at,
            expiration_date: new_link.expiration_date,
            total_clicks: 0,
        };
        tables.links.push(link.clone());

        Ok(link)
    }

    /// Returns the `last_used_at` of a token, if it was ever used.
    pub async fn token_last_used(&self, token_hash: &str) -> Option<DateTime<Utc>> {
        let tables = self.tables.read().await;
        tables
            .tokens
            .iter()
            .find(|t| t.token.token_hash == token_hash)
            .and_then(|t| t.last_used_at)
    }
}

fn missing_reference(constraint: &str) -> AppError {
    AppError::bad_request(
        "Referenced record does not exist",
        json!({ "constraint": constraint }),
    )
}

#[async_trait]
impl LinkRepository for InMemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.create_link_at(new_link, Utc::now()).await
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .links
            .iter()
            .find(|l| l.short_code == short_code)
            .cloned())
    }

    async fn find_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Link>, AppError> {
        let tables = self.tables.read().await;
        let mut links: Vec<Link> = tables
            .links
            .iter()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl ClickRepository for InMemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.tables.write().await;
        let id = tables.next_id();

        let Some(link) = tables.links.iter_mut().find(|l| l.id == new_click.link_id) else {
            return Err(missing_reference("click_events_link_id_fkey"));
        };
        link.total_clicks += 1;

        let click = new_click.into_click(id);
        tables.clicks.push(click.clone());
        Ok(click)
    }

    async fn find_by_link_ids(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .clicks
            .iter()
            .filter(|c| link_ids.contains(&c.link_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OwnerRepository for InMemoryStore {
    async fn create(&self, name: &str) -> Result<Owner, AppError> {
        let mut tables = self.tables.write().await;

        if tables.owners.iter().any(|o| o.name == name) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "owners_name_key" }),
            ));
        }

        let owner = Owner {
            id: OwnerId(tables.next_id()),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        tables.owners.push(owner.clone());
        Ok(owner)
    }

    async fn find_by_id(&self, id: OwnerId) -> Result<Option<Owner>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.owners.iter().find(|o| o.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Owner>, AppError> {
        Ok(self.tables.read().await.owners.clone())
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn find_owner(&self, token_hash: &str) -> Result<Option<OwnerId>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .iter()
            .find(|t| t.token.token_hash == token_hash && t.token.revoked_at.is_none())
            .map(|t| t.token.owner_id))
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables
            .tokens
            .iter_mut()
            .find(|t| t.token.token_hash == token_hash && t.token.revoked_at.is_none())
        {
            stored.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_token(
        &self,
        owner_id: OwnerId,
        name: &str,
        token_hash: &str,
    ) -> Result<ApiToken, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.owner_exists(owner_id) {
            return Err(missing_reference("api_tokens_owner_id_fkey"));
        }
        if tables
            .tokens
            .iter()
            .any(|t| t.token.name == name || t.token.token_hash == token_hash)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        let token = ApiToken {
            id: tables.next_id(),
            owner_id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            revoked_at: None,
        };
        tables.tokens.push(StoredToken {
            token: token.clone(),
            last_used_at: None,
        });
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tokens.iter().rev().map(|t| t.token.clone()).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .iter()
            .find(|t| t.token.id == id)
            .map(|t| t.token.clone()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tokens
            .iter()
            .find(|t| t.token.name == name)
            .map(|t| t.token.clone()))
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(stored) = tables
            .tokens
            .iter_mut()
            .find(|t| t.token.id == id && t.token.revoked_at.is_none())
        {
            stored.token.revoked_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn store_with_owner() -> (InMemoryStore, OwnerId) {
        let store = InMemoryStore::new();
        let owner = OwnerRepository::create(&store, "alice").await.unwrap();
        (store, owner.id)
    }

    fn new_link(owner_id: OwnerId, code: &str) -> NewLink {
        NewLink {
            owner_id,
            original_url: format!("https://example.com/{code}"),
            short_code: code.to_string(),
            custom_alias: None,
            expiration_date: None,
        }
    }

    fn new_click(link_id: i64) -> NewClick {
        NewClick {
            link_id,
            timestamp: Utc::now(),
            ip: None,
            device: Some("desktop".to_string()),
            browser: Some("Firefox".to_string()),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_short_code_conflicts() {
        let (store, owner) = store_with_owner().await;
        LinkRepository::create(&store, new_link(owner, "abc")).await.unwrap();

        let result = LinkRepository::create(&store, new_link(owner, "abc")).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_link_for_unknown_owner_is_rejected() {
        let store = InMemoryStore::new();

        let result = LinkRepository::create(&store, new_link(OwnerId(42), "abc")).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_find_by_owner_newest_first_and_scoped() {
        let (store, alice) = store_with_owner().await;
        let bob = OwnerRepository::create(&store, "bob").await.unwrap().id;
        let now = Utc::now();

        store
            .create_link_at(new_link(alice, "old"), now - Duration::days(2))
            .await
            .unwrap();
        store.create_link_at(new_link(alice, "new"), now).await.unwrap();
        store.create_link_at(new_link(bob, "bobs"), now).await.unwrap();

        let links = store.find_by_owner(alice).await.unwrap();
        let codes: Vec<&str> = links.iter().map(|l| l.short_code.as_str()).collect();

        assert_eq!(codes, vec!["new", "old"]);
    }

    #[tokio::test]
    async fn test_record_click_bumps_counter() {
        let (store, owner) = store_with_owner().await;
        let link = LinkRepository::create(&store, new_link(owner, "abc")).await.unwrap();

        for _ in 0..3 {
            store.record_click(new_click(link.id)).await.unwrap();
        }

        let stored = store.find_by_code("abc").await.unwrap().unwrap();
        let events = store.find_by_link_ids(&[link.id]).await.unwrap();
        assert_eq!(stored.total_clicks, 3);
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_record_click_for_missing_link() {
        let store = InMemoryStore::new();

        let result = store.record_click(new_click(999)).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_revoked_token_no_longer_resolves() {
        let (store, owner) = store_with_owner().await;
        let token = store.create_token(owner, "ci", "hash").await.unwrap();

        assert_eq!(store.find_owner("hash").await.unwrap(), Some(owner));

        store.revoke_token(token.id).await.unwrap();

        assert_eq!(store.find_owner("hash").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_last_used() {
        let (store, owner) = store_with_owner().await;
        store.create_token(owner, "ci", "hash").await.unwrap();
        assert!(store.token_last_used("hash").await.is_none());

        store.update_last_used("hash").await.unwrap();

        assert!(store.token_last_used("hash").await.is_some());
    }
}
