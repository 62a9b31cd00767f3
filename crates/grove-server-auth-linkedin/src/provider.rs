// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The LinkedIn provider: lifecycle, property paths, and profile sync.

use std::sync::Arc;

use grove_oauth_core::AttributeMap;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::client::{ClientError, ProtectedDataRequest};
use crate::config::{ConfigError, LinkedInConfig};
use crate::mapping::{self, FieldMap};
use crate::store::UserProfileStore;

/// LinkedIn's user details endpoint; the only source URL this provider maps
/// properties from.
pub const LINKEDIN_DETAILS_URL: &str = "https://api.linkedin.com/v1/people/~?format=json";

/// Resource type stamped on the profile sub-record at create time.
const PROFILE_RESOURCE_TYPE: &str = "grove/security/components/profile";

/// OAuth protocol versions a provider can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
	OAuth1a,
	OAuth2,
}

/// Shape of a token-validation response body:
/// `{"token": {"user_id": "..."}}`.
#[derive(Debug, Deserialize)]
struct ValidateTokenResponse {
	token: Option<TokenBody>,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
	user_id: Option<String>,
}

/// LinkedIn OAuth 1.0a provider.
///
/// Holds the parsed field-mapping table and the long-lived identity-store
/// handle. All entry points are synchronous pure functions except
/// [`on_user_create`](Self::on_user_create) and
/// [`on_user_update`](Self::on_user_update), which write through the store.
pub struct LinkedInProvider {
	config: LinkedInConfig,
	field_map: FieldMap,
	store: Arc<dyn UserProfileStore>,
}

impl LinkedInProvider {
	/// Build a provider from configuration and a store handle.
	///
	/// Malformed field-mapping entries are dropped with a warning during
	/// parse; they never fail startup.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if the configuration fails
	/// validation.
	pub fn start(
		config: LinkedInConfig,
		store: Arc<dyn UserProfileStore>,
	) -> Result<Self, ConfigError> {
		config.validate()?;
		let field_map = FieldMap::parse(&config.field_mappings);
		debug!(
			provider_id = %config.provider_id,
			mappings = field_map.len(),
			"starting LinkedIn provider"
		);
		Ok(Self {
			config,
			field_map,
			store,
		})
	}

	/// Release the identity-store handle.
	///
	/// A failure to close is logged and swallowed; there is nothing useful a
	/// caller can do with it at teardown.
	pub async fn close(self) {
		debug!(provider_id = %self.config.provider_id, "closing LinkedIn provider");
		if let Err(e) = self.store.close().await {
			warn!(error = %e, "failed to close identity store handle");
		}
	}

	/// Unique id matching this provider with its runtime configuration.
	pub fn id(&self) -> &str {
		&self.config.provider_id
	}

	/// OAuth protocol version this provider speaks.
	pub fn provider_type(&self) -> ProviderType {
		ProviderType::OAuth1a
	}

	/// The user details URL profile data is fetched from.
	pub fn details_url(&self) -> &'static str {
		LINKEDIN_DETAILS_URL
	}

	/// Extended details URLs for a scope. LinkedIn profile data comes from
	/// the single canonical endpoint, so this is always empty.
	pub fn extended_details_urls(&self, _scope: &str) -> Vec<String> {
		Vec::new()
	}

	/// Extended details URLs derived from previously fetched data; always
	/// empty for this provider.
	pub fn extended_details_urls_for_user(
		&self,
		_scope: &str,
		_user_id: &str,
		_props: &AttributeMap,
	) -> Vec<String> {
		Vec::new()
	}

	/// Property path where the access token is stored for a user, when token
	/// storage is enabled on the provider configuration.
	pub fn access_token_property_path(&self, client_id: &str) -> String {
		format!("oauth/token-{client_id}")
	}

	/// Property path where the provider user id is stored for a user.
	pub fn oauth_id_property_path(&self, client_id: &str) -> String {
		format!("oauth/oauthid-{client_id}")
	}

	/// Name of the raw provider attribute carrying the provider user id.
	pub fn user_id_property(&self) -> &'static str {
		"id"
	}

	/// Token-validation URL; LinkedIn OAuth 1.0a does not support one.
	pub fn validate_token_url(&self, _client_id: &str, _token: &str) -> Option<String> {
		None
	}

	/// Whether a validation response attests the token. Never true here,
	/// since there is no validation endpoint.
	pub fn is_valid_token(&self, _response_body: &str, _client_id: &str, _token_type: &str) -> bool {
		false
	}

	/// Error description from a token-validation response body; LinkedIn
	/// responses carry none.
	pub fn error_description_from_validate_token_response(
		&self,
		_response_body: &str,
	) -> Option<String> {
		None
	}

	/// Extract the provider user id from a token-validation response body.
	///
	/// Returns `None` when the body is malformed or carries no id; parse
	/// failures are logged, never propagated.
	pub fn user_id_from_validate_token_response(&self, response_body: &str) -> Option<String> {
		let parsed: ValidateTokenResponse = match serde_json::from_str(response_body) {
			Ok(parsed) => parsed,
			Err(e) => {
				error!(error = %e, "error while parsing validate-token response body");
				return None;
			}
		};
		parsed
			.token
			.and_then(|t| t.user_id)
			.filter(|id| !id.is_empty())
	}

	/// Build the request descriptor for fetching protected provider data.
	///
	/// # Errors
	///
	/// Returns [`ClientError::InvalidUrl`] when `url` does not parse.
	pub fn protected_data_request(&self, url: &str) -> Result<ProtectedDataRequest, ClientError> {
		ProtectedDataRequest::get(url)
	}

	/// Map raw provider attributes into internal profile storage paths.
	///
	/// See [`mapping::map_properties`] for the merge semantics.
	pub fn map_properties(
		&self,
		src_url: &str,
		client_id: &str,
		existing: &AttributeMap,
		new_attributes: &AttributeMap,
	) -> AttributeMap {
		mapping::map_properties(src_url, client_id, existing, new_attributes)
	}

	/// Derive the internal user id for a LinkedIn account.
	pub fn map_user_id(&self, provider_user_id: &str, mapped: &AttributeMap) -> String {
		mapping::resolve_user_id(provider_user_id, mapped)
	}

	/// Folder under which a user record is created, relative to the users
	/// root.
	pub fn user_folder_path(&self, user_id: &str) -> String {
		mapping::user_folder_path(&self.config.user_base_folder, user_id)
	}

	/// Called after a user is created by the provisioning pipeline.
	///
	/// Tags the profile sub-record with the platform resource type, copies
	/// every configured mapped field from the user record into the profile,
	/// and commits. Store failures are logged and the sync is abandoned
	/// without retry; the host lifecycle owns any retry policy.
	pub async fn on_user_create(&self, user_id: &str) {
		debug!(user_id, "on_user_create");
		if let Err(e) = self.sync_profile(user_id, true).await {
			error!(user_id, error = %e, "failed to copy profile properties on user create");
		}
	}

	/// Called after a user is updated (profile data re-mapped onto an
	/// existing user). A no-op unless `refresh_user_data` is enabled.
	pub async fn on_user_update(&self, user_id: &str) {
		if !self.config.refresh_user_data {
			return;
		}
		debug!(user_id, "on_user_update");
		if let Err(e) = self.sync_profile(user_id, false).await {
			error!(user_id, error = %e, "failed to refresh profile properties on user update");
		}
	}

	/// Copy configured mapped fields from the user record into its profile.
	async fn sync_profile(
		&self,
		user_id: &str,
		tag_resource_type: bool,
	) -> Result<(), crate::store::StoreError> {
		self.store.refresh().await?;
		if tag_resource_type {
			self.store
				.set_profile_resource_type(user_id, PROFILE_RESOURCE_TYPE)
				.await?;
		}
		self.process_profile_mappings(user_id).await?;
		self.store.commit().await
	}

	/// Apply each configured mapping, isolating read failures per field: a
	/// missing or unreadable source attribute leaves that one profile key
	/// unset and the remaining mappings still run.
	async fn process_profile_mappings(
		&self,
		user_id: &str,
	) -> Result<(), crate::store::StoreError> {
		for entry in self.field_map.iter() {
			let value = self
				.read_user_attribute_or(user_id, &entry.source_path, None)
				.await;
			if let Some(value) = value {
				self.store
					.write_profile_attribute(user_id, &entry.profile_field, &value)
					.await?;
			}
		}
		Ok(())
	}

	/// Read a user attribute, returning `default` when the attribute is
	/// absent or the read fails. Read failures are logged at warn level.
	async fn read_user_attribute_or(
		&self,
		user_id: &str,
		path: &str,
		default: Option<String>,
	) -> Option<String> {
		match self.store.read_user_attribute(user_id, path).await {
			Ok(Some(value)) => Some(value),
			Ok(None) => default,
			Err(e) => {
				warn!(path, error = %e, "couldn't read attribute value from user record");
				default
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::store::StoreError;
	use async_trait::async_trait;
	use std::collections::BTreeMap;
	use std::sync::Mutex;

	/// In-memory store: user attributes in, profile attributes out.
	#[derive(Default)]
	struct MemoryStore {
		user_attributes: Mutex<BTreeMap<String, String>>,
		profile: Mutex<BTreeMap<String, String>>,
		resource_type: Mutex<Option<String>>,
		committed: Mutex<bool>,
		failing_paths: Mutex<Vec<String>>,
	}

	impl MemoryStore {
		fn with_user_attributes(pairs: &[(&str, &str)]) -> Self {
			let store = Self::default();
			{
				let mut attrs = store.user_attributes.lock().unwrap();
				for (k, v) in pairs {
					attrs.insert(k.to_string(), v.to_string());
				}
			}
			store
		}

		fn fail_reads_of(&self, path: &str) {
			self.failing_paths.lock().unwrap().push(path.to_string());
		}
	}

	#[async_trait]
	impl UserProfileStore for MemoryStore {
		async fn refresh(&self) -> Result<(), StoreError> {
			Ok(())
		}

		async fn read_user_attribute(
			&self,
			_user_id: &str,
			path: &str,
		) -> Result<Option<String>, StoreError> {
			if self.failing_paths.lock().unwrap().iter().any(|p| p == path) {
				return Err(StoreError::Read {
					path: path.to_string(),
					reason: "simulated failure".to_string(),
				});
			}
			Ok(self.user_attributes.lock().unwrap().get(path).cloned())
		}

		async fn write_profile_attribute(
			&self,
			_user_id: &str,
			name: &str,
			value: &str,
		) -> Result<(), StoreError> {
			self.profile
				.lock()
				.unwrap()
				.insert(name.to_string(), value.to_string());
			Ok(())
		}

		async fn set_profile_resource_type(
			&self,
			_user_id: &str,
			resource_type: &str,
		) -> Result<(), StoreError> {
			*self.resource_type.lock().unwrap() = Some(resource_type.to_string());
			Ok(())
		}

		async fn commit(&self) -> Result<(), StoreError> {
			*self.committed.lock().unwrap() = true;
			Ok(())
		}

		async fn close(&self) -> Result<(), StoreError> {
			Ok(())
		}
	}

	fn provider_with(store: Arc<MemoryStore>, config: LinkedInConfig) -> LinkedInProvider {
		LinkedInProvider::start(config, store).expect("valid config")
	}

	#[tokio::test]
	async fn on_user_create_copies_mapped_fields_and_commits() {
		let store = Arc::new(MemoryStore::with_user_attributes(&[
			("profile/linkedin/firstName", "Ada"),
			("profile/linkedin/lastName", "Lovelace"),
			("profile/linkedin/headline", "Engineer"),
		]));
		let provider = provider_with(store.clone(), LinkedInConfig::default());

		provider.on_user_create("li-abc").await;

		let profile = store.profile.lock().unwrap().clone();
		assert_eq!(profile.get("givenName").map(String::as_str), Some("Ada"));
		assert_eq!(profile.get("familyName").map(String::as_str), Some("Lovelace"));
		assert_eq!(profile.get("jobTitle").map(String::as_str), Some("Engineer"));
		assert_eq!(
			store.resource_type.lock().unwrap().as_deref(),
			Some("grove/security/components/profile")
		);
		assert!(*store.committed.lock().unwrap());
	}

	#[tokio::test]
	async fn missing_source_attribute_leaves_single_field_unset() {
		let store = Arc::new(MemoryStore::with_user_attributes(&[
			("profile/linkedin/firstName", "Ada"),
			("profile/linkedin/headline", "Engineer"),
		]));
		let provider = provider_with(store.clone(), LinkedInConfig::default());

		provider.on_user_create("li-abc").await;

		let profile = store.profile.lock().unwrap().clone();
		assert_eq!(profile.get("givenName").map(String::as_str), Some("Ada"));
		assert!(!profile.contains_key("familyName"));
		assert_eq!(profile.get("jobTitle").map(String::as_str), Some("Engineer"));
	}

	#[tokio::test]
	async fn unreadable_source_attribute_does_not_abort_siblings() {
		let store = Arc::new(MemoryStore::with_user_attributes(&[
			("profile/linkedin/firstName", "Ada"),
			("profile/linkedin/lastName", "Lovelace"),
		]));
		store.fail_reads_of("profile/linkedin/firstName");
		let provider = provider_with(store.clone(), LinkedInConfig::default());

		provider.on_user_create("li-abc").await;

		let profile = store.profile.lock().unwrap().clone();
		assert!(!profile.contains_key("givenName"));
		assert_eq!(profile.get("familyName").map(String::as_str), Some("Lovelace"));
		assert!(*store.committed.lock().unwrap());
	}

	#[tokio::test]
	async fn on_user_update_is_noop_without_refresh_flag() {
		let store = Arc::new(MemoryStore::with_user_attributes(&[(
			"profile/linkedin/firstName",
			"Ada",
		)]));
		let provider = provider_with(store.clone(), LinkedInConfig::default());

		provider.on_user_update("li-abc").await;

		assert!(store.profile.lock().unwrap().is_empty());
		assert!(!*store.committed.lock().unwrap());
	}

	#[tokio::test]
	async fn on_user_update_syncs_when_refresh_enabled() {
		let store = Arc::new(MemoryStore::with_user_attributes(&[(
			"profile/linkedin/firstName",
			"Ada",
		)]));
		let config = LinkedInConfig {
			refresh_user_data: true,
			..LinkedInConfig::default()
		};
		let provider = provider_with(store.clone(), config);

		provider.on_user_update("li-abc").await;

		let profile = store.profile.lock().unwrap().clone();
		assert_eq!(profile.get("givenName").map(String::as_str), Some("Ada"));
		// Updates re-copy fields but do not re-tag the resource type.
		assert!(store.resource_type.lock().unwrap().is_none());
		assert!(*store.committed.lock().unwrap());
	}

	#[test]
	fn user_id_from_validate_token_response_extracts_id() {
		let store = Arc::new(MemoryStore::default());
		let provider = provider_with(store, LinkedInConfig::default());

		let body = r#"{"token": {"user_id": "abc123"}}"#;
		assert_eq!(
			provider.user_id_from_validate_token_response(body),
			Some("abc123".to_string())
		);
	}

	#[test]
	fn user_id_from_validate_token_response_handles_missing_and_malformed() {
		let store = Arc::new(MemoryStore::default());
		let provider = provider_with(store, LinkedInConfig::default());

		assert_eq!(provider.user_id_from_validate_token_response("{}"), None);
		assert_eq!(
			provider.user_id_from_validate_token_response(r#"{"token": {}}"#),
			None
		);
		assert_eq!(
			provider.user_id_from_validate_token_response(r#"{"token": {"user_id": ""}}"#),
			None
		);
		assert_eq!(
			provider.user_id_from_validate_token_response("not json"),
			None
		);
	}

	#[test]
	fn property_paths_include_client_id() {
		let store = Arc::new(MemoryStore::default());
		let provider = provider_with(store, LinkedInConfig::default());

		assert_eq!(
			provider.access_token_property_path("app-1"),
			"oauth/token-app-1"
		);
		assert_eq!(
			provider.oauth_id_property_path("app-1"),
			"oauth/oauthid-app-1"
		);
	}

	#[test]
	fn provider_surface_defaults() {
		let store = Arc::new(MemoryStore::default());
		let provider = provider_with(store, LinkedInConfig::default());

		assert_eq!(provider.provider_type(), ProviderType::OAuth1a);
		assert_eq!(provider.user_id_property(), "id");
		assert_eq!(provider.details_url(), LINKEDIN_DETAILS_URL);
		assert!(provider.extended_details_urls("r_basicprofile").is_empty());
		assert!(provider.validate_token_url("app-1", "tok").is_none());
		assert!(!provider.is_valid_token("{}", "app-1", "bearer"));
		assert!(provider
			.error_description_from_validate_token_response("{}")
			.is_none());
	}

	#[test]
	fn user_folder_path_uses_configured_base() {
		let store = Arc::new(MemoryStore::default());
		let config = LinkedInConfig {
			user_base_folder: "members".to_string(),
			..LinkedInConfig::default()
		};
		let provider = provider_with(store, config);

		assert_eq!(provider.user_folder_path("li-abcdefgh"), "members/li-a");
	}

	#[test]
	fn start_rejects_invalid_config() {
		let store: Arc<dyn UserProfileStore> = Arc::new(MemoryStore::default());
		let config = LinkedInConfig {
			provider_id: String::new(),
			..LinkedInConfig::default()
		};
		assert!(LinkedInProvider::start(config, store).is_err());
	}

	#[test]
	fn start_tolerates_malformed_mappings() {
		let store: Arc<dyn UserProfileStore> = Arc::new(MemoryStore::default());
		let config = LinkedInConfig {
			field_mappings: vec!["broken".to_string(), "givenName=firstName".to_string()],
			..LinkedInConfig::default()
		};
		let provider = LinkedInProvider::start(config, store).expect("partial config tolerated");
		assert_eq!(provider.field_map.len(), 1);
	}
}
