//! Forgejo API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::models::{CreateTeamRequest, Organization, Team, TeamId, UpdateTeamRequest};
use super::{ApiResult, TeamApi};
use crate::error::ApiError;

/// REST API prefix appended to the instance URL
const API_PREFIX: &str = "/api/v1";

/// Client-side rate limit (requests per second)
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// How the client authenticates against Forgejo
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Personal access token (`Authorization: token <value>`)
    Token(String),
    /// HTTP basic auth
    Basic { username: String, password: String },
}

impl Credentials {
    /// Value for the `Authorization` header
    fn header_value(&self) -> String {
        match self {
            Credentials::Token(token) => format!("token {}", token),
            Credentials::Basic { username, password } => {
                let raw = format!("{}:{}", username, password);
                format!("Basic {}", general_purpose::STANDARD.encode(raw))
            }
        }
    }
}

/// Forgejo API client
pub struct ForgejoClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl ForgejoClient {
    /// Create a new Forgejo API client for the instance at `url`
    pub fn new(url: &str, credentials: Credentials, timeout: Duration) -> ApiResult<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(concat!("forgeteam/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            base_url: api_base_url(url),
            credentials,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Build the URL for `segments` under the API base, percent-encoding each
    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::BadRequest(format!("Invalid Forgejo URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::BadRequest(format!("Invalid Forgejo URL: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode a JSON body from a successful response
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> ApiResult<T> {
        let response = self.execute(method, url, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    /// Send a request whose successful response carries no body
    async fn send_empty(&self, method: Method, url: Url) -> ApiResult<()> {
        self.execute(method, url, None).await.map(|_| ())
    }

    /// Internal request implementation shared by every call
    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> ApiResult<Response> {
        // Apply rate limiting
        self.rate_limiter.until_ready().await;

        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", self.credentials.header_value())
            .header("Accept", "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(error_for_status(status, response).await)
    }
}

/// Normalize an instance URL into the REST API base
fn api_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with(API_PREFIX) {
        trimmed.to_string()
    } else {
        format!("{}{}", trimmed, API_PREFIX)
    }
}

/// Map a non-success response onto an API error
async fn error_for_status(status: StatusCode, response: Response) -> ApiError {
    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let message = response
        .text()
        .await
        .ok()
        .map(|text| error_message(&text))
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(or_default(message, "Resource not found")),
        StatusCode::CONFLICT => ApiError::Conflict(or_default(message, "Resource already exists")),
        StatusCode::UNPROCESSABLE_ENTITY if message.to_lowercase().contains("already exists") => {
            ApiError::Conflict(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(or_default(message, "Bad request"))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(or_default(message, &format!("Server error: {}", status)))
        }
        status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

/// Forgejo error bodies look like `{"message": "...", "url": "..."}`
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn or_default(message: String, default: &str) -> String {
    if message.is_empty() {
        default.to_string()
    } else {
        message
    }
}

fn encode<T: serde::Serialize>(request: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(request)
        .map_err(|e| ApiError::BadRequest(format!("Failed to encode request: {}", e)))
}

#[async_trait]
impl TeamApi for ForgejoClient {
    async fn get_org(&self, org: &str) -> ApiResult<Organization> {
        let url = self.endpoint(&["orgs", org])?;
        self.send(Method::GET, url, None).await
    }

    async fn list_teams(&self, org: &str, page: usize, limit: usize) -> ApiResult<Vec<Team>> {
        let mut url = self.endpoint(&["orgs", org, "teams"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        self.send(Method::GET, url, None).await
    }

    async fn get_team(&self, id: TeamId) -> ApiResult<Team> {
        let url = self.endpoint(&["teams", &id.to_string()])?;
        self.send(Method::GET, url, None).await
    }

    async fn create_team(&self, org: &str, request: CreateTeamRequest) -> ApiResult<Team> {
        let body = encode(&request)?;
        let url = self.endpoint(&["orgs", org, "teams"])?;
        self.send(Method::POST, url, Some(body)).await
    }

    async fn update_team(&self, id: TeamId, request: UpdateTeamRequest) -> ApiResult<Team> {
        let body = encode(&request)?;
        let url = self.endpoint(&["teams", &id.to_string()])?;
        self.send(Method::PATCH, url, Some(body)).await
    }

    async fn delete_team(&self, id: TeamId) -> ApiResult<()> {
        let url = self.endpoint(&["teams", &id.to_string()])?;
        self.send_empty(Method::DELETE, url).await
    }
}
