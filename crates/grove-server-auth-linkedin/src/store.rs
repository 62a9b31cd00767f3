// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Identity-store collaborator trait.

use async_trait::async_trait;

/// Errors surfaced by an identity-store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	/// The store connection is unavailable or was closed.
	#[error("identity store unavailable: {0}")]
	Unavailable(String),

	/// Reading an attribute failed.
	#[error("failed to read {path}: {reason}")]
	Read { path: String, reason: String },

	/// Writing an attribute failed.
	#[error("failed to write {path}: {reason}")]
	Write { path: String, reason: String },

	/// Committing pending writes failed.
	#[error("commit failed: {0}")]
	Commit(String),
}

/// Persistence layer for user records and their profile sub-records.
///
/// The provider holds one long-lived handle for its entire lifetime, opened
/// by the caller before [`LinkedInProvider::start`](crate::LinkedInProvider::start)
/// and released by [`close`](UserProfileStore::close). Implementations must
/// be safe for concurrent use (`Send + Sync`); a backend whose underlying
/// connection is not should serialize internally.
#[async_trait]
pub trait UserProfileStore: Send + Sync {
	/// Refresh the view of the store, discarding stale reads.
	async fn refresh(&self) -> Result<(), StoreError>;

	/// Read a string attribute at `path` on the user record.
	///
	/// Returns `Ok(None)` when the attribute does not exist.
	async fn read_user_attribute(
		&self,
		user_id: &str,
		path: &str,
	) -> Result<Option<String>, StoreError>;

	/// Write a string attribute on the user's profile sub-record.
	///
	/// The write is pending until [`commit`](UserProfileStore::commit).
	async fn write_profile_attribute(
		&self,
		user_id: &str,
		name: &str,
		value: &str,
	) -> Result<(), StoreError>;

	/// Tag the user's profile sub-record with a platform resource type.
	async fn set_profile_resource_type(
		&self,
		user_id: &str,
		resource_type: &str,
	) -> Result<(), StoreError>;

	/// Atomically persist all pending writes.
	async fn commit(&self) -> Result<(), StoreError>;

	/// Release the underlying connection. Further calls may fail with
	/// [`StoreError::Unavailable`].
	async fn close(&self) -> Result<(), StoreError>;
}
