// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The configuration mirror itself.

use std::sync::Arc;

use grove_oauth_core::{config_id_of, filter_oauth_attributes, AttributeMap};
use tracing::{debug, error};

use crate::error::{MirrorError, Result};
use crate::event::ChangeEvent;
use crate::registry::ConfigRegistry;
use crate::source::ConfigNodeSource;

/// Factory kind the mirrored OAuth provider configurations are registered
/// under.
pub const FACTORY_KIND: &str = "grove.auth.oauth.provider";

/// Mirrors edited configuration nodes into the registry.
///
/// Purge and create are two separate registry calls; if the host delivers
/// overlapping edits for the same config id, the last write wins and a
/// transient duplicate is possible until the next edit. A transactional
/// [`ConfigRegistry`] implementation can close that window behind the trait.
pub struct ConfigMirror {
	source: Arc<dyn ConfigNodeSource>,
	registry: Arc<dyn ConfigRegistry>,
}

impl ConfigMirror {
	pub fn new(source: Arc<dyn ConfigNodeSource>, registry: Arc<dyn ConfigRegistry>) -> Self {
		Self { source, registry }
	}

	/// Process a batch of change notifications, sequentially and in delivery
	/// order.
	///
	/// Each event is handled independently: a failure mirroring one node is
	/// logged and does not stop the remaining events in the batch.
	pub async fn on_events<I>(&self, events: I)
	where
		I: IntoIterator<Item = ChangeEvent>,
	{
		for event in events {
			debug!(kind = ?event.kind, path = %event.path, "change event");
			if let Err(e) = self.process_event(&event).await {
				error!(path = %event.path, error = %e, "error while handling change event");
			}
		}
	}

	/// Mirror a single edited node into the registry.
	async fn process_event(&self, event: &ChangeEvent) -> Result<()> {
		let attributes = self
			.source
			.read_node(&event.path)
			.await?
			.ok_or_else(|| MirrorError::NodeNotFound(event.path.clone()))?;

		let oauth_attributes = filter_oauth_attributes(&attributes);
		self.purge_existing_entries(&oauth_attributes).await;

		let entry_id = self.registry.create_entry(FACTORY_KIND).await?;
		debug!(entry_id = %entry_id, "new configuration entry created");
		self.registry
			.update_entry(&entry_id, &oauth_attributes)
			.await?;

		self.source.persist().await
	}

	/// Delete all registry entries recorded under this factory kind and the
	/// new bag's `oauth.config.id`, so repeated edits never accumulate
	/// duplicates.
	///
	/// Best effort: a failed query or delete is logged and skipped — one
	/// un-deletable stale entry must not block publishing the new
	/// configuration.
	async fn purge_existing_entries(&self, new_attributes: &AttributeMap) {
		let Some(config_id) = config_id_of(new_attributes) else {
			return;
		};
		debug!(config_id, "purging existing configuration entries");

		let existing = match self.registry.find_entries(FACTORY_KIND, config_id).await {
			Ok(existing) => existing,
			Err(e) => {
				error!(config_id, error = %e, "failed to query existing configuration entries");
				return;
			}
		};

		for entry_id in existing {
			match self.registry.delete_entry(&entry_id).await {
				Ok(()) => debug!(entry_id = %entry_id, "deleted stale configuration entry"),
				Err(e) => {
					error!(entry_id = %entry_id, error = %e, "failed to delete stale configuration entry");
				}
			}
		}
	}
}
