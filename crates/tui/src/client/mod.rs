use api_types::{
    auth::Token,
    bill::{Bill, BillDraft},
    user::{User, UserNew},
};
use reqwest::{Response, StatusCode, Url};

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Failure of a single API call, shaped from the HTTP outcome.
///
/// Non-2xx variants carry the server `detail` field verbatim; transport and
/// decode failures carry the underlying reqwest error.
#[derive(Debug)]
pub enum ClientError {
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Validation(String),
    Server(String),
    Transport(reqwest::Error),
}

impl ClientError {
    /// Human-readable message for store state or form banners.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized(detail)
            | Self::Forbidden(detail)
            | Self::NotFound(detail)
            | Self::Validation(detail)
            | Self::Server(detail) => detail.clone(),
            Self::Transport(err) if err.is_decode() => "Unexpected server response.".to_string(),
            Self::Transport(_) => "Server unreachable.".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))
    }

    /// OAuth2 password login; the server expects form-encoded credentials.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Token, ClientError> {
        let endpoint = self.endpoint("token")?;

        let res = self
            .http
            .post(endpoint)
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Token>().await.map_err(ClientError::Transport);
        }
        Err(error_for_response(res).await)
    }

    pub async fn register(&self, user: &UserNew) -> std::result::Result<User, ClientError> {
        let endpoint = self.endpoint("users/")?;

        let res = self
            .http
            .post(endpoint)
            .json(user)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<User>().await.map_err(ClientError::Transport);
        }
        Err(error_for_response(res).await)
    }

    pub async fn bills_list(&self, token: &str) -> std::result::Result<Vec<Bill>, ClientError> {
        let endpoint = self.endpoint("bills/")?;

        let res = self
            .http
            .get(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Vec<Bill>>().await.map_err(ClientError::Transport);
        }
        Err(error_for_response(res).await)
    }

    pub async fn bill_create(
        &self,
        token: &str,
        draft: &BillDraft,
    ) -> std::result::Result<Bill, ClientError> {
        let endpoint = self.endpoint("bills/")?;

        let res = self
            .http
            .post(endpoint)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Bill>().await.map_err(ClientError::Transport);
        }
        Err(error_for_response(res).await)
    }

    pub async fn bill_update(
        &self,
        token: &str,
        id: i64,
        draft: &BillDraft,
    ) -> std::result::Result<Bill, ClientError> {
        let endpoint = self.endpoint(&format!("bills/{id}"))?;

        let res = self
            .http
            .put(endpoint)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<Bill>().await.map_err(ClientError::Transport);
        }
        Err(error_for_response(res).await)
    }

    /// Deletes a bill; the server replies with an empty body.
    pub async fn bill_delete(&self, token: &str, id: i64) -> std::result::Result<(), ClientError> {
        let endpoint = self.endpoint(&format!("bills/{id}"))?;

        let res = self
            .http
            .delete(endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(error_for_response(res).await)
    }
}

async fn error_for_response(res: Response) -> ClientError {
    let status = res.status();
    let detail = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.detail)
        .unwrap_or_else(|_| "unknown error".to_string());
    tracing::warn!(status = %status, detail = %detail, "api request failed");

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(detail),
        StatusCode::FORBIDDEN => ClientError::Forbidden(detail),
        StatusCode::NOT_FOUND => ClientError::NotFound(detail),
        StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(detail),
        _ => ClientError::Server(detail),
    }
}
