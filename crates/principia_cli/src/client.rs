//! HTTP client for the Principia API with a refetch-on-write cache.
//!
//! # Invariants
//! - The principle list is fetched at most once until invalidated.
//! - Every successful mutation drops the cached list; nothing is patched
//!   locally, the next read refetches.

use log::debug;
use principia_core::{
    Principle, PrincipleDraft, PrincipleId, PrincipleWithTactics, Tactic, TacticDraft, TacticId,
    ValidationErrors,
};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Client-side failure talking to the API.
#[derive(Debug)]
pub enum ClientError {
    /// Transport or decoding failure.
    Http(reqwest::Error),
    /// Non-success status with the server's message.
    Api {
        status: StatusCode,
        message: String,
        errors: ValidationErrors,
    },
}

impl Display for ClientError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(err) => write!(f, "request failed: {err}"),
            Self::Api {
                status,
                message,
                errors,
            } => {
                write!(f, "{} {message}", status.as_u16())?;
                for error in errors.errors() {
                    write!(f, "\n  {}: {}", error.field, error.message)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            Self::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: ValidationErrors,
}

/// API client holding the cached principle list.
pub struct PrinciplesClient {
    base_url: String,
    http: reqwest::Client,
    cache: Option<Vec<PrincipleWithTactics>>,
}

impl PrinciplesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            cache: None,
        }
    }

    /// Whether a fetched list is currently cached.
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops the cached list so the next read refetches.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            debug!("event=cache_invalidate module=client status=ok");
        }
    }

    /// Returns all principles, fetching only when nothing is cached.
    pub async fn principles(&mut self) -> ClientResult<&[PrincipleWithTactics]> {
        if self.cache.is_none() {
            let response = self.http.get(self.url("/principles")).send().await?;
            let fetched: Vec<PrincipleWithTactics> = decode(response).await?;
            debug!(
                "event=principles_fetch module=client status=ok count={}",
                fetched.len()
            );
            self.cache = Some(fetched);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Fetches one principle; `None` on 404. Bypasses the list cache.
    pub async fn principle(&self, id: PrincipleId) -> ClientResult<Option<PrincipleWithTactics>> {
        let response = self
            .http
            .get(self.url(&format!("/principles/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response).await.map(Some)
    }

    pub async fn create_principle(&mut self, draft: &PrincipleDraft) -> ClientResult<Principle> {
        let response = self
            .http
            .post(self.url("/principles"))
            .json(draft)
            .send()
            .await?;
        let created = decode(response).await?;
        self.invalidate();
        Ok(created)
    }

    pub async fn create_tactic(&mut self, draft: &TacticDraft) -> ClientResult<Tactic> {
        let response = self
            .http
            .post(self.url("/tactics"))
            .json(draft)
            .send()
            .await?;
        let created = decode(response).await?;
        self.invalidate();
        Ok(created)
    }

    pub async fn delete_principle(&mut self, id: PrincipleId) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/principles/{id}")))
            .send()
            .await?;
        expect_success(response).await?;
        self.invalidate();
        Ok(())
    }

    pub async fn delete_tactic(&mut self, id: TacticId) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/tactics/{id}")))
            .send()
            .await?;
        expect_success(response).await?;
        self.invalidate();
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> ClientResult<T> {
    let response = expect_success(response).await?;
    Ok(response.json::<T>().await?)
}

async fn expect_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed = serde_json::from_str::<ErrorBody>(&body).unwrap_or(ErrorBody {
        message: body,
        errors: ValidationErrors::default(),
    });
    Err(ClientError::Api {
        status,
        message: parsed.message,
        errors: parsed.errors,
    })
}
