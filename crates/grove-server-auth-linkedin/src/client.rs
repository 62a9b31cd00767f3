// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Protected-resource fetch and profile-data response parsing.
//!
//! Request signing is the OAuth transport's concern; callers hand this
//! client a pre-computed `Authorization` header value. The client's job is
//! issuing the GET and flattening the JSON body into the raw attribute map
//! the mapping layer consumes.

use grove_oauth_core::AttributeMap;
use http::Method;
use url::Url;

/// Errors that can occur fetching or parsing protected provider data.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	/// The HTTP request to LinkedIn failed (network error, timeout, etc.).
	#[error("HTTP request failed: {0}")]
	HttpRequest(#[from] reqwest::Error),

	/// The requested URL does not parse.
	#[error("invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// LinkedIn returned a non-success status.
	#[error("LinkedIn API error: {0}")]
	Api(String),

	/// The response body could not be parsed as expected.
	#[error("failed to parse response: {0}")]
	ParseError(String),
}

/// Descriptor for a protected-resource request: always a plain GET against
/// the given URL for this provider.
#[derive(Debug, Clone)]
pub struct ProtectedDataRequest {
	pub method: Method,
	pub url: Url,
}

impl ProtectedDataRequest {
	/// Build a GET request descriptor for `url`.
	///
	/// # Errors
	///
	/// Returns [`ClientError::InvalidUrl`] when `url` does not parse.
	pub fn get(url: &str) -> Result<Self, ClientError> {
		Ok(Self {
			method: Method::GET,
			url: Url::parse(url)?,
		})
	}
}

/// HTTP client for fetching protected LinkedIn profile data.
#[derive(Debug, Clone, Default)]
pub struct LinkedInClient {
	http_client: reqwest::Client,
}

impl LinkedInClient {
	pub fn new() -> Self {
		Self {
			http_client: reqwest::Client::new(),
		}
	}

	/// Execute a protected-data request and parse the profile body.
	///
	/// # Arguments
	///
	/// - `request`: the descriptor from
	///   [`LinkedInProvider::protected_data_request`](crate::LinkedInProvider::protected_data_request).
	/// - `authorization`: the signed `Authorization` header value supplied by
	///   the OAuth transport.
	///
	/// # Errors
	///
	/// - [`ClientError::HttpRequest`]: network error or timeout.
	/// - [`ClientError::Api`]: non-success status from LinkedIn.
	/// - [`ClientError::ParseError`]: unexpected response shape.
	#[tracing::instrument(skip(self, authorization), fields(url = %request.url))]
	pub async fn fetch_profile_data(
		&self,
		request: ProtectedDataRequest,
		authorization: &str,
	) -> Result<AttributeMap, ClientError> {
		tracing::debug!("fetching LinkedIn profile data");

		let response = self
			.http_client
			.request(request.method, request.url)
			.header("Authorization", authorization)
			.send()
			.await?;

		if !response.status().is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(ClientError::Api(format!(
				"failed to fetch profile data: {body}"
			)));
		}

		let body = response.text().await?;
		parse_profile_data_response(&body)
	}
}

/// Flatten a profile-data response body into raw provider attributes.
///
/// The body must be a JSON object. Nested objects and arrays are flattened
/// with `/`-joined keys (array elements by index); scalar values are kept as
/// they are, nulls dropped. `{"location": {"name": "NL"}}` yields the key
/// `location/name`.
///
/// # Errors
///
/// Returns [`ClientError::ParseError`] when the body is not a JSON object.
pub fn parse_profile_data_response(body: &str) -> Result<AttributeMap, ClientError> {
	let parsed: serde_json::Value = serde_json::from_str(body)
		.map_err(|e| ClientError::ParseError(format!("invalid JSON body: {e}")))?;

	let serde_json::Value::Object(fields) = parsed else {
		return Err(ClientError::ParseError(
			"profile data body is not a JSON object".to_string(),
		));
	};

	let mut attributes = AttributeMap::new();
	for (key, value) in fields {
		flatten_into(&mut attributes, key, value);
	}
	Ok(attributes)
}

fn flatten_into(out: &mut AttributeMap, key: String, value: serde_json::Value) {
	match value {
		serde_json::Value::Null => {}
		serde_json::Value::Object(fields) => {
			for (child_key, child) in fields {
				flatten_into(out, format!("{key}/{child_key}"), child);
			}
		}
		serde_json::Value::Array(items) => {
			for (index, item) in items.into_iter().enumerate() {
				flatten_into(out, format!("{key}/{index}"), item);
			}
		}
		scalar => {
			out.insert(key, scalar);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn request_descriptor_is_get() {
		let request = ProtectedDataRequest::get(crate::LINKEDIN_DETAILS_URL).unwrap();
		assert_eq!(request.method, Method::GET);
		assert_eq!(request.url.host_str(), Some("api.linkedin.com"));
	}

	#[test]
	fn request_descriptor_rejects_invalid_url() {
		assert!(ProtectedDataRequest::get("not a url").is_err());
	}

	#[test]
	fn parse_flattens_scalars() {
		let attrs = parse_profile_data_response(
			r#"{"id": "abc", "firstName": "Ada", "numConnections": 42}"#,
		)
		.unwrap();

		assert_eq!(attrs.get("id").and_then(|v| v.as_str()), Some("abc"));
		assert_eq!(attrs.get("firstName").and_then(|v| v.as_str()), Some("Ada"));
		assert_eq!(attrs.get("numConnections").and_then(|v| v.as_i64()), Some(42));
	}

	#[test]
	fn parse_flattens_nested_objects_with_slash_keys() {
		let attrs = parse_profile_data_response(
			r#"{"location": {"name": "Netherlands", "country": {"code": "nl"}}}"#,
		)
		.unwrap();

		assert_eq!(
			attrs.get("location/name").and_then(|v| v.as_str()),
			Some("Netherlands")
		);
		assert_eq!(
			attrs.get("location/country/code").and_then(|v| v.as_str()),
			Some("nl")
		);
	}

	#[test]
	fn parse_flattens_arrays_by_index() {
		let attrs = parse_profile_data_response(
			r#"{"positions": {"values": [{"title": "Engineer"}, {"title": "Founder"}]}}"#,
		)
		.unwrap();

		assert_eq!(
			attrs.get("positions/values/0/title").and_then(|v| v.as_str()),
			Some("Engineer")
		);
		assert_eq!(
			attrs.get("positions/values/1/title").and_then(|v| v.as_str()),
			Some("Founder")
		);
	}

	#[test]
	fn parse_drops_null_values() {
		let attrs =
			parse_profile_data_response(r#"{"headline": null, "firstName": "Ada"}"#).unwrap();

		assert_eq!(attrs.len(), 1);
		assert!(!attrs.contains_key("headline"));
	}

	#[test]
	fn parse_rejects_non_object_bodies() {
		assert!(parse_profile_data_response("[1, 2, 3]").is_err());
		assert!(parse_profile_data_response("\"nope\"").is_err());
		assert!(parse_profile_data_response("not json").is_err());
	}
}
