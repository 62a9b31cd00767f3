// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Attribute bags exchanged with the identity store and configuration registry.

use std::collections::BTreeMap;

use crate::namespace::OAUTH_CONFIG_ID_KEY;

/// A loosely-typed attribute bag keyed by attribute name.
///
/// Values are opaque external data ([`serde_json::Value`]); callers that need
/// a scalar coerce at the point of use. A `BTreeMap` keeps iteration order
/// deterministic so that mirrored configuration entries are stable across
/// repeated syncs.
pub type AttributeMap = BTreeMap<String, serde_json::Value>;

/// Extract the logical configuration id from an attribute bag.
///
/// Returns the value of [`OAUTH_CONFIG_ID_KEY`] when it is present and a
/// non-empty string; `None` otherwise. Non-string values are treated as
/// absent rather than coerced, so a numeric id misconfiguration surfaces as
/// "no id" instead of a surprising registry key.
pub fn config_id_of(attrs: &AttributeMap) -> Option<&str> {
	attrs
		.get(OAUTH_CONFIG_ID_KEY)
		.and_then(|v| v.as_str())
		.filter(|s| !s.is_empty())
}
