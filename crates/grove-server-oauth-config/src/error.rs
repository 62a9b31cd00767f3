// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for configuration mirroring.

use thiserror::Error;

/// Result type for mirror operations.
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Errors that can occur while mirroring a configuration node.
#[derive(Debug, Error)]
pub enum MirrorError {
	/// Reading the edited node from the content tree failed.
	#[error("failed to read node {path}: {reason}")]
	NodeRead { path: String, reason: String },

	/// The notified path no longer resolves to a node.
	#[error("node not found: {0}")]
	NodeNotFound(String),

	/// A registry operation (create, query, delete, update) failed.
	#[error("registry error: {0}")]
	Registry(String),

	/// Persisting the read-side transaction failed.
	#[error("failed to persist: {0}")]
	Persist(String),
}
