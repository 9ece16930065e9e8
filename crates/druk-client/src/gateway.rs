use druk_core::{Draft, Record};

use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use tokio::sync::RwLock;

/// Client mutation gateway: wraps the REST backend and keeps a per-entity
/// cache of collection reads.
///
/// Every successful create/update/delete invalidates the cached collection
/// for that entity, so the next [`list`](Self::list) re-fetches from the
/// server — the UI is never left showing stale data after a confirmed
/// write. A failed mutation leaves the cache untouched so the pre-failure
/// state keeps rendering. No automatic retry.
#[derive(Debug)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    cache: RwLock<HashMap<String, Vec<Record>>>,
}

/// Which gateway call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    PatchStatus,
    Delete,
    Login,
    Logout,
    Seed,
    Clear,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::PatchStatus => "patch-status",
            Self::Delete => "delete",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Seed => "seed",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// A failed gateway call. Carries enough context for the caller to decide
/// whether to retry, and keeps the draft usable.
#[derive(Debug, thiserror::Error)]
#[error("{operation} {entity} failed: {cause}")]
pub struct MutationError {
    pub entity: String,
    pub operation: Operation,
    pub cause: MutationCause,
}

#[derive(Debug, thiserror::Error)]
pub enum MutationCause {
    /// The server answered with a non-2xx status.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection refused, timeout, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl MutationError {
    /// True if the server said the target record no longer exists; the
    /// caller should drop the stale row from its local list.
    pub fn is_not_found(&self) -> bool {
        matches!(self.cause, MutationCause::Status { status: 404, .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.cause, MutationCause::Status { status: 400, .. })
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

/// Per-entity seed counts returned by `POST /api/seed`.
pub type SeedCounts = HashMap<String, usize>;

impl Gateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    async fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Obtain an admin session. Subsequent writes carry the token.
    pub async fn login(&self, password: &str) -> Result<(), MutationError> {
        let req = self
            .http
            .post(self.url("admin/login"))
            .json(&json!({ "password": password }));
        let body: TokenBody = send("session", Operation::Login, req).await?;
        *self.token.write().await = Some(body.token);
        Ok(())
    }

    pub async fn logout(&self) -> Result<(), MutationError> {
        let req = self.authed(self.http.post(self.url("admin/logout"))).await;
        let _: MessageBody = send("session", Operation::Logout, req).await?;
        *self.token.write().await = None;
        Ok(())
    }

    /// The entity's collection. Served from cache when a previous read is
    /// still valid; otherwise fetched and cached.
    pub async fn list(&self, entity: &str) -> Result<Vec<Record>, MutationError> {
        if let Some(cached) = self.cache.read().await.get(entity) {
            return Ok(cached.clone());
        }
        let req = self.http.get(self.url(entity));
        let records: Vec<Record> = send(entity, Operation::Read, req).await?;
        self.cache
            .write()
            .await
            .insert(entity.to_string(), records.clone());
        Ok(records)
    }

    /// Filtered collection read. Not cached — the cache only tracks the
    /// unfiltered collection.
    pub async fn list_where(
        &self,
        entity: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Record>, MutationError> {
        let req = self
            .http
            .get(self.url(entity))
            .query(&[(field, value)]);
        send(entity, Operation::Read, req).await
    }

    pub async fn get(&self, entity: &str, id: i64) -> Result<Record, MutationError> {
        let req = self.http.get(self.url(&format!("{entity}/{id}")));
        send(entity, Operation::Read, req).await
    }

    pub async fn create(&self, entity: &str, draft: &Draft) -> Result<Record, MutationError> {
        let req = self
            .authed(self.http.post(self.url(entity)))
            .await
            .json(draft.fields());
        let record: Record = send(entity, Operation::Create, req).await?;
        self.invalidate(entity).await;
        Ok(record)
    }

    pub async fn update(
        &self,
        entity: &str,
        id: i64,
        draft: &Draft,
    ) -> Result<Record, MutationError> {
        let req = self
            .authed(self.http.put(self.url(&format!("{entity}/{id}"))))
            .await
            .json(draft.fields());
        let record: Record = send(entity, Operation::Update, req).await?;
        self.invalidate(entity).await;
        Ok(record)
    }

    pub async fn patch_status(
        &self,
        entity: &str,
        id: i64,
        status: &str,
    ) -> Result<Record, MutationError> {
        let req = self
            .authed(self.http.patch(self.url(&format!("{entity}/{id}/status"))))
            .await
            .json(&json!({ "status": status }));
        let record: Record = send(entity, Operation::PatchStatus, req).await?;
        self.invalidate(entity).await;
        Ok(record)
    }

    pub async fn delete(&self, entity: &str, id: i64) -> Result<(), MutationError> {
        let req = self
            .authed(self.http.delete(self.url(&format!("{entity}/{id}"))))
            .await;
        let _: MessageBody = send(entity, Operation::Delete, req).await?;
        self.invalidate(entity).await;
        Ok(())
    }

    /// `POST /api/seed`. Invalidates every cached collection.
    pub async fn seed(&self) -> Result<SeedCounts, MutationError> {
        let req = self.authed(self.http.post(self.url("seed"))).await;
        let counts: SeedCounts = send("seed", Operation::Seed, req).await?;
        self.cache.write().await.clear();
        Ok(counts)
    }

    /// `POST /api/clear-database`. Invalidates every cached collection.
    pub async fn clear_database(&self) -> Result<(), MutationError> {
        let req = self.authed(self.http.post(self.url("clear-database"))).await;
        let _: MessageBody = send("database", Operation::Clear, req).await?;
        self.cache.write().await.clear();
        Ok(())
    }

    async fn invalidate(&self, entity: &str) {
        self.cache.write().await.remove(entity);
    }
}

/// Issue a request and decode the JSON response, translating non-2xx and
/// transport failures into [`MutationError`].
async fn send<T: serde::de::DeserializeOwned>(
    entity: &str,
    operation: Operation,
    req: reqwest::RequestBuilder,
) -> Result<T, MutationError> {
    let fail = |cause| MutationError {
        entity: entity.to_string(),
        operation,
        cause,
    };

    let response = req.send().await.map_err(|e| fail(e.into()))?;
    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<MessageBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| status.to_string());
        return Err(fail(MutationCause::Status {
            status: status.as_u16(),
            message,
        }));
    }
    response.json().await.map_err(|e| fail(e.into()))
}
