// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `oauth.` key-namespace convention.
//!
//! Configuration nodes edited in the content tree carry a mix of
//! platform-internal attributes (`jcr:*`, `sling:*`, ...) and OAuth provider
//! settings. Only the latter may be mirrored into the configuration
//! registry. Membership is decided by an explicit prefix rule declared here,
//! in one place: a key belongs to the OAuth namespace iff it is exactly
//! `oauth` or starts with `oauth.`.

use crate::attributes::AttributeMap;

/// Prefix marking attribute keys owned by the OAuth subsystem.
pub const OAUTH_KEY_PREFIX: &str = "oauth.";

/// Attribute key carrying the logical configuration id.
pub const OAUTH_CONFIG_ID_KEY: &str = "oauth.config.id";

/// Whether `key` belongs to the OAuth attribute namespace.
///
/// Matches the bare key `oauth` and any key under the `oauth.` prefix.
/// A key that merely contains the word elsewhere (`my.oauthish.flag`) does
/// not match.
pub fn is_oauth_key(key: &str) -> bool {
	key == "oauth" || key.starts_with(OAUTH_KEY_PREFIX)
}

/// Retain only the attributes whose keys belong to the OAuth namespace.
pub fn filter_oauth_attributes(attrs: &AttributeMap) -> AttributeMap {
	attrs
		.iter()
		.filter(|(key, _)| is_oauth_key(key))
		.map(|(key, value)| (key.clone(), value.clone()))
		.collect()
}
