// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Content-tree read-side collaborator trait.

use async_trait::async_trait;
use grove_oauth_core::AttributeMap;

use crate::error::Result;

/// Read-side view of the content tree the mirror observes.
///
/// The mirror does not own the underlying session; it reads nodes through
/// this trait and asks it to persist the read-side transaction once an event
/// has been mirrored.
#[async_trait]
pub trait ConfigNodeSource: Send + Sync {
	/// Read the attribute bag of the node at `path`.
	///
	/// Returns `Ok(None)` when the path no longer resolves to a node (the
	/// node may have been removed between the notification and this read).
	async fn read_node(&self, path: &str) -> Result<Option<AttributeMap>>;

	/// Durably persist the read-side transaction.
	async fn persist(&self) -> Result<()>;
}
