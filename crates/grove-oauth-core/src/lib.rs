// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared types for Grove OAuth provider integration.
//!
//! This crate provides the pieces that both the provider implementations
//! (e.g. `grove-server-auth-linkedin`) and the configuration mirror
//! (`grove-server-oauth-config`) agree on:
//!
//! - [`AttributeMap`], the loosely-typed attribute bag exchanged with the
//!   identity store and the configuration registry
//! - the `oauth.` key-namespace convention ([`is_oauth_key`],
//!   [`filter_oauth_attributes`]) that decides which attributes of an edited
//!   configuration node belong to the OAuth subsystem
//! - [`config_id_of`], extraction of the logical configuration id that ties
//!   a content-tree node to its registry entry
//!
//! # Example
//!
//! ```
//! use grove_oauth_core::{filter_oauth_attributes, AttributeMap, OAUTH_CONFIG_ID_KEY};
//!
//! let mut attrs = AttributeMap::new();
//! attrs.insert(OAUTH_CONFIG_ID_KEY.to_string(), "linkedin-prod".into());
//! attrs.insert("jcr:primaryType".to_string(), "nt:unstructured".into());
//!
//! let filtered = filter_oauth_attributes(&attrs);
//! assert_eq!(filtered.len(), 1);
//! assert!(filtered.contains_key(OAUTH_CONFIG_ID_KEY));
//! ```

pub mod attributes;
pub mod namespace;

pub use attributes::{config_id_of, AttributeMap};
pub use namespace::{filter_oauth_attributes, is_oauth_key, OAUTH_CONFIG_ID_KEY, OAUTH_KEY_PREFIX};
