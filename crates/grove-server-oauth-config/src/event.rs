// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Change notifications delivered by the content-tree observation host.

/// Kind of change that occurred at a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
	Added,
	Changed,
	Removed,
}

/// One change notification for a watched subtree.
///
/// Delivery is at-least-once and ordered per session only; the mirror does
/// not assume global ordering across unrelated paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
	pub kind: ChangeKind,
	/// Absolute path of the edited configuration node.
	pub path: String,
}

impl ChangeEvent {
	pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
		Self {
			kind,
			path: path.into(),
		}
	}

	/// Logical config id: the last segment of the notified path.
	pub fn config_node_name(&self) -> &str {
		self.path.rsplit('/').next().unwrap_or(&self.path)
	}
}
