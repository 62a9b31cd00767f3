// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Provider configuration.

use std::env;

const DEFAULT_PROVIDER_ID: &str = "soco-linkedin";
const DEFAULT_USER_BASE_FOLDER: &str = "community";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// A configuration value was empty or invalid.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),
}

/// Configuration for the LinkedIn provider.
///
/// Every option has a usable default, so a bare environment yields a working
/// provider. Field mappings are `profile-field=provider-field` strings;
/// malformed entries are dropped with a warning when the mapping table is
/// parsed, never treated as fatal.
#[derive(Debug, Clone)]
pub struct LinkedInConfig {
	/// Unique id matching this provider with its runtime configuration.
	pub provider_id: String,
	/// Base folder under which provisioned users are sharded.
	pub user_base_folder: String,
	/// `profile-field=provider-field` mapping entries, in order.
	pub field_mappings: Vec<String>,
	/// Re-copy mapped fields into the profile on every user update.
	pub refresh_user_data: bool,
}

impl Default for LinkedInConfig {
	fn default() -> Self {
		Self {
			provider_id: DEFAULT_PROVIDER_ID.to_string(),
			user_base_folder: DEFAULT_USER_BASE_FOLDER.to_string(),
			field_mappings: vec![
				"givenName=firstName".to_string(),
				"familyName=lastName".to_string(),
				"jobTitle=headline".to_string(),
			],
			refresh_user_data: false,
		}
	}
}

impl LinkedInConfig {
	/// Load configuration from environment variables.
	///
	/// # Recognized Environment Variables
	///
	/// - `GROVE_SERVER_LINKEDIN_PROVIDER_ID`: provider id (default
	///   `soco-linkedin`).
	/// - `GROVE_SERVER_LINKEDIN_USER_FOLDER`: user base folder (default
	///   `community`).
	/// - `GROVE_SERVER_LINKEDIN_FIELD_MAPPINGS`: comma-separated
	///   `profile-field=provider-field` entries.
	/// - `GROVE_SERVER_LINKEDIN_REFRESH_USER_DATA`: `true`/`1` to re-sync
	///   profile fields on user update.
	///
	/// Unset variables fall back to the defaults above.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if a set variable fails
	/// validation.
	pub fn from_env() -> Result<Self, ConfigError> {
		let defaults = Self::default();

		let provider_id =
			env::var("GROVE_SERVER_LINKEDIN_PROVIDER_ID").unwrap_or(defaults.provider_id);
		let user_base_folder =
			env::var("GROVE_SERVER_LINKEDIN_USER_FOLDER").unwrap_or(defaults.user_base_folder);
		let field_mappings = match env::var("GROVE_SERVER_LINKEDIN_FIELD_MAPPINGS") {
			Ok(raw) => Self::parse_mapping_list(&raw),
			Err(_) => defaults.field_mappings,
		};
		let refresh_user_data = match env::var("GROVE_SERVER_LINKEDIN_REFRESH_USER_DATA") {
			Ok(raw) => matches!(raw.trim(), "true" | "1" | "yes"),
			Err(_) => defaults.refresh_user_data,
		};

		let config = Self {
			provider_id,
			user_base_folder,
			field_mappings,
			refresh_user_data,
		};
		config.validate()?;
		Ok(config)
	}

	/// Parse a comma-separated mapping list into individual entries.
	///
	/// Whitespace around entries is trimmed; empty entries are discarded.
	/// Entry-level validation (the `=` split) happens later, in
	/// [`FieldMap::parse`](crate::mapping::FieldMap::parse).
	pub fn parse_mapping_list(raw: &str) -> Vec<String> {
		raw.split(',')
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect()
	}

	/// Validate that required configuration fields are non-empty.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::InvalidConfig`] if the provider id or base
	/// folder is empty.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.provider_id.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"provider_id cannot be empty".to_string(),
			));
		}
		if self.user_base_folder.is_empty() {
			return Err(ConfigError::InvalidConfig(
				"user_base_folder cannot be empty".to_string(),
			));
		}
		Ok(())
	}
}
