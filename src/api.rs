//! HTTP client wrapper around the backend REST API.
//!
//! Every request attaches the stored bearer token, every error is logged
//! with status/message/url/method, and a 401 outside the login screen
//! triggers a hard redirect to `/login`. Clearing the stored session is the
//! auth context's job alone; this layer only navigates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::browser;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::session;
use crate::session::User;
use crate::types::{
    CorrelationData, GraphPoint, Reading, ReadingDraft, SummaryInsights, Warning,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SignupRequest {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password: String,
    pub email: String,
    pub user_type: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CheckResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub user: User,
}

/// Create/update payload for the admin user management screen. The password
/// is only sent when set (updates may leave it unchanged).
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserDraft {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub email: String,
    pub user_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `?a=b&c=d` from the non-empty pairs, percent-encoded. Empty when every
/// value is empty.
pub fn build_query(pairs: &[(&str, String)]) -> String {
    let encoded: Vec<String> = pairs
        .iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    if encoded.is_empty() {
        String::new()
    } else {
        format!("?{}", encoded.join("&"))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
    retry_attempts: u32,
    retry_delay_ms: u32,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> ApiClient {
        ApiClient {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            retry_attempts: config.retry_attempts.max(1),
            retry_delay_ms: config.retry_delay_ms,
        }
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<web_sys::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let opts = web_sys::RequestInit::new();
        opts.set_method(method.as_str());

        let headers = web_sys::Headers::new().map_err(|_| ApiError::Network)?;
        if body.is_some() {
            let _ = headers.append("Content-Type", "application/json");
        }
        if let Some(token) = session::stored_token() {
            let _ = headers.append("Authorization", &format!("Bearer {token}"));
        }
        opts.set_headers(&headers);
        if let Some(json) = body {
            opts.set_body(&wasm_bindgen::JsValue::from_str(&json));
        }

        let request = web_sys::Request::new_with_str_and_init(&url, &opts)
            .map_err(|_| ApiError::Network)?;
        let window = browser::window().ok_or(ApiError::Network)?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|_| {
                browser::console_error(&format!(
                    "API error: network failure url={url} method={}",
                    method.as_str()
                ));
                ApiError::Network
            })?;
        let resp: web_sys::Response = resp_value.dyn_into().map_err(|_| ApiError::Network)?;

        if resp.ok() {
            return Ok(resp);
        }
        Err(self.response_error(&resp, &url, method).await)
    }

    /// Turn a non-2xx response into an `ApiError`, logging it and firing
    /// the 401 redirect when appropriate.
    async fn response_error(
        &self,
        resp: &web_sys::Response,
        url: &str,
        method: Method,
    ) -> ApiError {
        let status = resp.status();
        let message = body_message(resp).await.unwrap_or_else(|| {
            format!("Request failed with status {status}")
        });
        browser::console_error(&format!(
            "API error: status={status} message={message} url={url} method={}",
            method.as_str()
        ));

        if status == 401 {
            let path = browser::pathname();
            if !path.contains("/login") && !path.contains("/signup") {
                browser::console_warn("Unauthorized access detected. Token may be expired.");
                let notice = urlencoding::encode("Session expired. Please login again.");
                browser::redirect(&format!("/login?message={notice}"));
                return ApiError::Unauthorized;
            }
            // On the login screen a 401 is a business error ("Invalid
            // credentials"), not a session teardown.
            return ApiError::Server { status, message };
        }
        ApiError::Server { status, message }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<T, ApiError> {
        let resp = self.request(method, path, body).await?;
        let promise = resp.json().map_err(|_| ApiError::Decode)?;
        let value = JsFuture::from(promise).await.map_err(|_| ApiError::Decode)?;
        serde_wasm_bindgen::from_value(value).map_err(|_| ApiError::Decode)
    }

    /// Fire a request and ignore the response body.
    async fn fetch_ok(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<(), ApiError> {
        self.request(method, path, body).await.map(|_| ())
    }

    /// Idempotent GET with fixed-delay retries. Mutating calls never go
    /// through here.
    async fn get_with_retry<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_json(Method::Get, path, None).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.retry_attempts || !err.is_retryable() {
                        return Err(err);
                    }
                    browser::console_warn(&format!(
                        "Retrying GET {path} (attempt {} of {})",
                        attempt + 1,
                        self.retry_attempts
                    ));
                    browser::sleep_ms(self.retry_delay_ms as i32).await;
                }
            }
        }
    }

    fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
        serde_json::to_string(body).map_err(|_| ApiError::Decode)
    }

    // --- auth ---

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.fetch_json(Method::Post, "/login", Some(Self::encode(credentials)?))
            .await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.fetch_ok(Method::Post, "/signup", Some(Self::encode(request)?))
            .await
    }

    pub async fn check(&self) -> Result<CheckResponse, ApiError> {
        self.fetch_json(Method::Get, "/check", None).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.fetch_ok(Method::Post, "/logout", None).await
    }

    // --- dashboard reads (retried) ---

    pub async fn summary_insights(&self) -> Result<SummaryInsights, ApiError> {
        self.get_with_retry("/summary-insights").await
    }

    pub async fn warnings(&self) -> Result<Vec<Warning>, ApiError> {
        self.get_with_retry("/warnings").await
    }

    pub async fn recent_data(&self) -> Result<Vec<Reading>, ApiError> {
        self.get_with_retry("/recent-data").await
    }

    pub async fn correlation_data(&self, location: &str) -> Result<CorrelationData, ApiError> {
        let query = build_query(&[("location", location.to_string())]);
        self.get_with_retry(&format!("/correlation-data{query}")).await
    }

    pub async fn data(
        &self,
        date: Option<&str>,
        location: Option<&str>,
    ) -> Result<Vec<Reading>, ApiError> {
        let query = build_query(&[
            ("date", date.unwrap_or_default().to_string()),
            ("location", location.unwrap_or_default().to_string()),
        ]);
        self.get_with_retry(&format!("/data{query}")).await
    }

    pub async fn graph_data(
        &self,
        start_date: &str,
        end_date: &str,
        location: &str,
        data_type: &str,
    ) -> Result<Vec<GraphPoint>, ApiError> {
        let query = build_query(&[
            ("startDate", start_date.to_string()),
            ("endDate", end_date.to_string()),
            ("location", location.to_string()),
            ("dataType", data_type.to_string()),
        ]);
        self.get_with_retry(&format!("/graph-data{query}")).await
    }

    /// Raw JSON: the payload shape varies by backend version, so the chart
    /// module decodes it explicitly.
    pub async fn compare_graph_data(
        &self,
        start_date: &str,
        end_date: &str,
        locations: &[String],
        data_type: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let query = build_query(&[
            ("startDate", start_date.to_string()),
            ("endDate", end_date.to_string()),
            ("locations", locations.join(",")),
            ("dataType", data_type.to_string()),
        ]);
        self.get_with_retry(&format!("/compare-graph-data{query}")).await
    }

    // --- admin readings CRUD (no retry on mutations, no retry on the
    // --- admin table fetch either: stale pages are worse than an error) ---

    pub async fn all_data(&self) -> Result<Vec<Reading>, ApiError> {
        self.fetch_json(Method::Get, "/all-data", None).await
    }

    pub async fn create_data(&self, draft: &ReadingDraft) -> Result<(), ApiError> {
        self.fetch_ok(Method::Post, "/create-data", Some(Self::encode(draft)?))
            .await
    }

    pub async fn update_data(&self, id: i64, draft: &ReadingDraft) -> Result<(), ApiError> {
        self.fetch_ok(
            Method::Put,
            &format!("/update-data/{id}"),
            Some(Self::encode(draft)?),
        )
        .await
    }

    pub async fn delete_data(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_ok(Method::Delete, &format!("/delete-data/{id}"), None)
            .await
    }

    // --- admin user management ---

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_with_retry("/admin/users").await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<(), ApiError> {
        self.fetch_ok(Method::Post, "/admin/users", Some(Self::encode(draft)?))
            .await
    }

    pub async fn update_user(&self, id: i64, draft: &UserDraft) -> Result<(), ApiError> {
        self.fetch_ok(
            Method::Put,
            &format!("/admin/users/{id}"),
            Some(Self::encode(draft)?),
        )
        .await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.fetch_ok(Method::Delete, &format!("/admin/users/{id}"), None)
            .await
    }
}

/// `message`/`error` field of an error body, if the body is JSON at all.
async fn body_message(resp: &web_sys::Response) -> Option<String> {
    let promise = resp.text().ok()?;
    let text = JsFuture::from(promise).await.ok()?.as_string()?;
    let value: serde_json::Value = serde_json::from_str(&text).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_skips_empty_values() {
        let q = build_query(&[
            ("date", String::new()),
            ("location", "US".to_string()),
        ]);
        assert_eq!(q, "?location=US");
        assert_eq!(build_query(&[("date", String::new())]), "");
    }

    #[test]
    fn query_percent_encodes_values() {
        let q = build_query(&[("locations", "Rams Creek,Amsterdam".to_string())]);
        assert_eq!(q, "?locations=Rams%20Creek%2CAmsterdam");
    }

    #[test]
    fn user_draft_omits_unset_password() {
        let draft = UserDraft {
            username: "root".into(),
            user_type: "admin".into(),
            ..UserDraft::default()
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("password"));

        let with_pw = UserDraft { password: Some("hunter22".into()), ..draft };
        assert!(serde_json::to_string(&with_pw).unwrap().contains("password"));
    }
}
