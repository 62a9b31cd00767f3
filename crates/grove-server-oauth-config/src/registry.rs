// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration-registry collaborator trait.

use async_trait::async_trait;
use grove_oauth_core::AttributeMap;

use crate::error::Result;

/// The platform's runtime registry of named, typed configuration instances.
///
/// Queries are conjunctive equality filters over the factory kind and the
/// recorded `oauth.config.id`. The trait is deliberately non-transactional,
/// matching the host service; an implementation backed by a transactional
/// store may serialize create+update internally.
#[async_trait]
pub trait ConfigRegistry: Send + Sync {
	/// Create a new, empty entry under `factory_kind` and return its id.
	async fn create_entry(&self, factory_kind: &str) -> Result<String>;

	/// Write the attribute bag into the entry.
	async fn update_entry(&self, entry_id: &str, attributes: &AttributeMap) -> Result<()>;

	/// Ids of all entries whose factory kind and recorded `oauth.config.id`
	/// both match.
	async fn find_entries(&self, factory_kind: &str, config_id: &str) -> Result<Vec<String>>;

	/// Delete one entry by id.
	async fn delete_entry(&self, entry_id: &str) -> Result<()>;
}
