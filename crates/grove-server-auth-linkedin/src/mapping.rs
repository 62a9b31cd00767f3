// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Field mapping and identity resolution.
//!
//! Everything in this module is pure: the same provider inputs always yield
//! the same outputs. That property matters most for [`resolve_user_id`],
//! which keys user creation — repeated syncs of the same LinkedIn account
//! must land on the same internal user record.

use grove_oauth_core::AttributeMap;
use tracing::warn;

use crate::provider::LINKEDIN_DETAILS_URL;

/// Storage namespace for mapped LinkedIn attributes.
const PROFILE_NAMESPACE: &str = "profile/linkedin/";

/// Prefix distinguishing LinkedIn-provisioned users from users of other
/// identity providers sharing the store.
const USER_ID_PREFIX: &str = "li-";

/// Number of leading user-id characters used as the folder shard.
const FOLDER_SHARD_LEN: usize = 4;

/// One configured mapping rule: copy the attribute at `source_path` on the
/// user record into `profile_field` on the profile record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
	/// Profile attribute name the value is written to.
	pub profile_field: String,
	/// Path on the user record the value is read from.
	pub source_path: String,
}

/// Ordered table of field mappings, parsed from `key=value` configuration
/// entries.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
	entries: Vec<FieldMapping>,
}

impl FieldMap {
	/// Parse configured `profile-field=provider-field` entries.
	///
	/// Each entry is split once on `=`. Entries that do not yield exactly two
	/// non-empty parts are skipped with a warning — partial configuration is
	/// tolerated, never fatal. The order of the surviving entries is
	/// preserved.
	///
	/// A right-hand side containing `/` is stored verbatim (the source node
	/// hierarchy is already spelled out); a bare attribute name is rewritten
	/// under the `profile/linkedin/` namespace.
	pub fn parse<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut parsed = Vec::new();
		for entry in entries {
			let entry = entry.as_ref();
			match entry.split_once('=') {
				Some((profile_field, source)) if !profile_field.is_empty() && !source.is_empty() => {
					let source_path = if source.contains('/') {
						source.to_string()
					} else {
						profile_property_path(source)
					};
					parsed.push(FieldMapping {
						profile_field: profile_field.to_string(),
						source_path,
					});
				}
				_ => {
					warn!(mapping = entry, "invalid profile mapping, skipping");
				}
			}
		}
		Self { entries: parsed }
	}

	/// Iterate the mappings in configuration order.
	pub fn iter(&self) -> impl Iterator<Item = &FieldMapping> {
		self.entries.iter()
	}

	/// Number of valid mappings.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no valid mappings were configured.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Storage path for a LinkedIn attribute, e.g. `id` → `profile/linkedin/id`.
pub fn profile_property_path(attribute: &str) -> String {
	format!("{PROFILE_NAMESPACE}{attribute}")
}

/// Map raw provider attributes into internal profile storage paths.
///
/// Only applies to attributes fetched from the canonical details URL; for
/// any other source the `existing` map is returned unchanged (extended
/// details URLs are not used by this provider). For the canonical URL the
/// result starts from a copy of `existing`, then overlays every non-null
/// `(key, value)` at `profile/linkedin/<key>`. Existing keys not touched by
/// `new_attributes` are retained; overlapping keys take the new value.
pub fn map_properties(
	src_url: &str,
	_client_id: &str,
	existing: &AttributeMap,
	new_attributes: &AttributeMap,
) -> AttributeMap {
	if src_url != LINKEDIN_DETAILS_URL {
		return existing.clone();
	}

	let mut mapped = existing.clone();
	for (key, value) in new_attributes {
		if !value.is_null() {
			mapped.insert(profile_property_path(key), value.clone());
		}
	}
	mapped
}

/// Derive the internal user id for a LinkedIn account.
///
/// Prefers the mapped `profile/linkedin/id` attribute when it is a non-empty
/// string, falling back to the raw provider user id. The result always
/// carries the `li-` prefix.
pub fn resolve_user_id(provider_user_id: &str, mapped: &AttributeMap) -> String {
	let mapped_id = mapped
		.get(&profile_property_path("id"))
		.and_then(|v| v.as_str())
		.filter(|s| !s.is_empty());

	match mapped_id {
		Some(id) => format!("{USER_ID_PREFIX}{id}"),
		None => format!("{USER_ID_PREFIX}{provider_user_id}"),
	}
}

/// Folder under which a user record is created, relative to the users root.
///
/// Users are sharded by the first four characters of their id, e.g. base
/// folder `community` and id `li-abcdefgh` yield `community/li-a`. Ids
/// shorter than four characters shard by the full id; truncation respects
/// `char` boundaries, so multi-byte ids never split mid-character.
pub fn user_folder_path(base_folder: &str, user_id: &str) -> String {
	let shard_end = user_id
		.char_indices()
		.nth(FOLDER_SHARD_LEN)
		.map(|(idx, _)| idx)
		.unwrap_or(user_id.len());
	format!("{base_folder}/{}", &user_id[..shard_end])
}
