//! Problem-body error mapping for non-2xx responses.
//!
//! Wise reports failures with a JSON body shaped like
//! `{"type": "about:blank", "title": "Unsupported Media Type", "status": 415,
//! "detail": "Content-Type 'null' is not supported.", "instance": "/public/v3/quotes"}`.
//! [`ApiError::from_response`] prefers those fields and synthesizes the missing ones from the
//! response itself, so an error can always be built, even from an HTML or empty body.

// self
use crate::{_prelude::*, http::ApiResponse};

/// Server-reported failure parsed from (or synthesized for) an HTTP error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
#[error("{status} at {instance}: {title}: {detail}")]
pub struct ApiError {
	/// Problem type URI (or the status code when the body has none).
	#[serde(rename = "type")]
	pub problem_type: String,
	/// Short summary; defaults to the HTTP reason phrase.
	pub title: String,
	/// HTTP status code.
	pub status: u16,
	/// Human-readable explanation; defaults to the transport error message.
	pub detail: String,
	/// Path or URL of the failing request.
	pub instance: String,
	/// Raw JSON body, when the body was JSON.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub json: Option<JsonValue>,
}
impl ApiError {
	/// Builds an error from a non-2xx response.
	pub fn from_response(response: &ApiResponse) -> Self {
		let json = serde_json::from_slice::<JsonValue>(&response.body).ok();
		let field = |name: &str| json.as_ref().and_then(|body| body.get(name));
		let text = |name: &str| field(name).and_then(JsonValue::as_str).map(str::to_owned);
		let status = field("status")
			.and_then(JsonValue::as_u64)
			.and_then(|status| u16::try_from(status).ok())
			.unwrap_or(response.status);

		Self {
			problem_type: text("type").unwrap_or_else(|| response.status.to_string()),
			title: text("title").unwrap_or_else(|| response.reason().to_owned()),
			status,
			detail: text("detail").unwrap_or_else(|| transport_message(response)),
			instance: text("instance").unwrap_or_else(|| response.url.to_string()),
			json,
		}
	}

	/// Returns true for 4xx statuses.
	pub fn is_client_error(&self) -> bool {
		(400..500).contains(&self.status)
	}

	/// Returns true for 5xx statuses.
	pub fn is_server_error(&self) -> bool {
		(500..600).contains(&self.status)
	}
}

/// Message an HTTP stack would attach to a failed status check.
pub fn transport_message(response: &ApiResponse) -> String {
	let class = if response.status >= 500 { "Server" } else { "Client" };

	format!("{} {class} Error: {} for url: {}", response.status, response.reason(), response.url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn response(status: u16, reason: &str, body: &str) -> ApiResponse {
		ApiResponse::new(
			status,
			Url::parse("https://api.sandbox.transferwise.tech/v3/quotes")
				.expect("URL fixture should parse."),
		)
		.with_reason(reason)
		.with_body(body.as_bytes().to_vec())
	}

	#[test]
	fn json_fields_take_precedence() {
		let body = r#"{
			"type": "about:blank",
			"title": "Unsupported Media Type",
			"status": 415,
			"detail": "Content-Type 'null' is not supported.",
			"instance": "/public/v3/quotes",
			"extra": true
		}"#;
		let err = ApiError::from_response(&response(415, "Unsupported Media Type", body));

		assert_eq!(err.problem_type, "about:blank");
		assert_eq!(err.instance, "/public/v3/quotes");
		assert_eq!(
			err.to_string(),
			"415 at /public/v3/quotes: Unsupported Media Type: Content-Type 'null' is not supported."
		);
		assert_eq!(err.json.as_ref().and_then(|json| json.get("extra")), Some(&JsonValue::Bool(true)));
	}

	#[test]
	fn non_json_bodies_fall_back_to_synthesized_fields() {
		let err = ApiError::from_response(&response(415, "Unsupported Media Type", "<html>"));

		assert_eq!(err.status, 415);
		assert_eq!(err.problem_type, "415");
		assert_eq!(err.title, "Unsupported Media Type");
		assert_eq!(err.instance, "https://api.sandbox.transferwise.tech/v3/quotes");
		assert_eq!(
			err.detail,
			"415 Client Error: Unsupported Media Type for url: https://api.sandbox.transferwise.tech/v3/quotes"
		);
		assert!(err.to_string().contains("Unsupported Media Type"));
		assert!(err.json.is_none());
		assert!(err.is_client_error());
	}

	#[test]
	fn partial_bodies_mix_json_and_defaults() {
		let body = r#"{"status": 403, "error": "Forbidden", "message": "You are forbidden"}"#;
		let err = ApiError::from_response(&response(403, "Forbidden", body));

		assert_eq!(err.status, 403);
		assert_eq!(err.title, "Forbidden");
		assert_eq!(err.problem_type, "403");
		assert!(err.json.is_some());
	}

	#[test]
	fn wrongly_typed_fields_are_ignored() {
		let err =
			ApiError::from_response(&response(502, "Bad Gateway", r#"{"status": "oops", "title": 7}"#));

		assert_eq!(err.status, 502);
		assert_eq!(err.title, "Bad Gateway");
		assert!(err.detail.starts_with("502 Server Error: Bad Gateway"));
		assert!(err.is_server_error());
	}
}
