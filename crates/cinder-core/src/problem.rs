//! RFC 7807 problem responses for the HTTP layer
//!
//! Handlers return `Result<impl IntoResponse, Problem>`; the error branch
//! serializes as `application/problem+json`.

use std::collections::BTreeMap;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// A problem response to send to the client, per RFC 7807.
#[derive(Debug, Clone)]
pub struct Problem {
    pub status: StatusCode,
    body: BTreeMap<String, Value>,
}

impl Problem {
    pub fn new(status: StatusCode) -> Self {
        let mut body = BTreeMap::new();
        body.insert(
            "timestamp".to_owned(),
            Value::String(chrono::Utc::now().to_rfc3339()),
        );
        Problem { status, body }
    }

    /// A 400 problem with the given type slug and title.
    pub fn bad_request(type_slug: &str, title: impl Into<String>) -> Self {
        Problem::new(StatusCode::BAD_REQUEST)
            .with_type(format!("https://cinder.sh/probs/{type_slug}"))
            .with_title(title)
    }

    /// A 500 problem with the given type slug and title.
    pub fn internal_error(type_slug: &str, title: impl Into<String>) -> Self {
        Problem::new(StatusCode::INTERNAL_SERVER_ERROR)
            .with_type(format!("https://cinder.sh/probs/{type_slug}"))
            .with_title(title)
    }

    pub fn with_type(self, value: impl Into<String>) -> Self {
        self.with_value("type", value.into())
    }

    pub fn with_title(self, value: impl Into<String>) -> Self {
        self.with_value("title", value.into())
    }

    pub fn with_detail(self, value: impl Into<String>) -> Self {
        self.with_value("detail", value.into())
    }

    pub fn with_instance(self, value: impl Into<String>) -> Self {
        self.with_value("instance", value.into())
    }

    /// Attach an arbitrary extension member to the problem body.
    pub fn with_value<V>(mut self, key: &str, value: V) -> Self
    where
        V: Into<Value>,
    {
        self.body.insert(key.to_owned(), value.into());
        self
    }

    /// Attach a serializable extension member; serialization failures drop
    /// the member rather than failing the response.
    pub fn with_serialized<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(value) = serde_json::to_value(value) {
            self.body.insert(key.to_owned(), value);
        }
        self
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status, Json(self.body)).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, "application/problem+json".parse().unwrap());
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_standard_members() {
        let problem = Problem::bad_request("invalid-parameter", "Invalid Parameter")
            .with_detail("year is required")
            .with_instance("/burns/records");

        assert_eq!(problem.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            problem.body.get("type").unwrap(),
            "https://cinder.sh/probs/invalid-parameter"
        );
        assert_eq!(problem.body.get("title").unwrap(), "Invalid Parameter");
        assert_eq!(problem.body.get("detail").unwrap(), "year is required");
        assert!(problem.body.contains_key("timestamp"));
    }

    #[test]
    fn response_carries_problem_content_type() {
        let response = Problem::internal_error("persistence", "Persistence Error").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
