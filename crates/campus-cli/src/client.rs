//! Async HTTP client wrapping the university data service's JSON API.

use anyhow::Context;
use campus_core::{
  course::Course,
  service::DataService,
  stats::{Health, StatsSummary},
  student::{NewStudent, Student},
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Any failure talking to the data service.
#[derive(Debug, Error)]
pub enum NetworkError {
  /// The request never produced a response (connection refused, DNS, …).
  #[error("{method} {path} failed: {source}")]
  Transport {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{method} {path} → {status}")]
  Status {
    method: Method,
    path:   String,
    status: StatusCode,
  },

  #[error("decoding {method} {path} response: {source}")]
  Decode {
    method: Method,
    path:   String,
    #[source]
    source: reqwest::Error,
  },
}

/// Connection settings for the data service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the data service.
///
/// No retries, no timeout, no caching: each call is one round trip.
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  /// Build the client. No request is made until the first call.
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Issue one request and decode the JSON response body.
  async fn call<T: DeserializeOwned>(
    &self,
    method: Method,
    path: String,
    body: Option<&NewStudent>,
  ) -> Result<T, NetworkError> {
    tracing::debug!(%method, %path, "sending request");

    let mut req = self.client.request(method.clone(), self.url(&path));
    if let Some(body) = body {
      req = req.json(body);
    }

    let resp = match req.send().await {
      Ok(resp) => resp,
      Err(source) => return Err(NetworkError::Transport { method, path, source }),
    };

    let status = resp.status();
    if !status.is_success() {
      return Err(NetworkError::Status { method, path, status });
    }

    match resp.json().await {
      Ok(value) => Ok(value),
      Err(source) => Err(NetworkError::Decode { method, path, source }),
    }
  }
}

impl DataService for ApiClient {
  type Error = NetworkError;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn list_students(&self) -> Result<Vec<Student>, NetworkError> {
    self.call(Method::GET, "/students".into(), None).await
  }

  async fn get_student(&self, id: u32) -> Result<Student, NetworkError> {
    self.call(Method::GET, format!("/students/{id}"), None).await
  }

  async fn create_student(&self, student: &NewStudent) -> Result<Student, NetworkError> {
    self.call(Method::POST, "/students".into(), Some(student)).await
  }

  async fn update_student(
    &self,
    id: u32,
    student: &NewStudent,
  ) -> Result<Student, NetworkError> {
    self
      .call(Method::PUT, format!("/students/{id}"), Some(student))
      .await
  }

  async fn delete_student(&self, id: u32) -> Result<serde_json::Value, NetworkError> {
    self.call(Method::DELETE, format!("/students/{id}"), None).await
  }

  // ── Courses ───────────────────────────────────────────────────────────────

  async fn list_courses(&self) -> Result<Vec<Course>, NetworkError> {
    self.call(Method::GET, "/courses".into(), None).await
  }

  async fn get_course(&self, id: u32) -> Result<Course, NetworkError> {
    self.call(Method::GET, format!("/courses/{id}"), None).await
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  async fn get_stats(&self) -> Result<StatsSummary, NetworkError> {
    self.call(Method::GET, "/stats".into(), None).await
  }

  async fn health(&self) -> Result<Health, NetworkError> {
    self.call(Method::GET, "/health".into(), None).await
  }
}

// ─── Tests against an in-process stub service ───────────────────────────────
