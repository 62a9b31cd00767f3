// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! LinkedIn OAuth 1.0a identity provider for Grove.
//!
//! This crate maps LinkedIn profile data onto Grove user records during the
//! user-provisioning flow. It owns three concerns:
//!
//! 1. **Field mapping**: a configured table of `profile-field=provider-field`
//!    rules translating LinkedIn attribute names into internal profile
//!    storage paths (see [`FieldMap`]).
//!
//! 2. **Identity resolution**: deriving a stable internal user id from
//!    provider data. Resolved ids always carry the `li-` prefix so LinkedIn
//!    users can never collide with users provisioned by another identity
//!    provider sharing the same store.
//!
//! 3. **Profile sync**: on user create (and, when enabled, user update),
//!    copying every configured field from the user's raw attribute record
//!    into its profile sub-record via an injected [`UserProfileStore`].
//!
//! # Lifecycle
//!
//! The provider is built with [`LinkedInProvider::start`], which takes the
//! configuration and the long-lived identity-store handle, and is torn down
//! deterministically with [`LinkedInProvider::close`]:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use grove_server_auth_linkedin::{LinkedInConfig, LinkedInProvider, UserProfileStore};
//!
//! # async fn example(store: Arc<dyn UserProfileStore>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = LinkedInConfig::from_env()?;
//! let provider = LinkedInProvider::start(config, store)?;
//!
//! // ... host invokes provider callbacks ...
//! provider.on_user_create("li-abc123").await;
//!
//! provider.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure semantics
//!
//! Store failures during create/update sync are logged and swallowed; the
//! host lifecycle owns any retry policy. A single unreadable attribute never
//! aborts the sync of sibling fields.

pub mod client;
pub mod config;
pub mod mapping;
pub mod provider;
pub mod store;

pub use client::{parse_profile_data_response, ClientError, LinkedInClient, ProtectedDataRequest};
pub use config::{ConfigError, LinkedInConfig};
pub use mapping::{
	map_properties, profile_property_path, resolve_user_id, user_folder_path, FieldMap,
	FieldMapping,
};
pub use provider::{LinkedInProvider, ProviderType, LINKEDIN_DETAILS_URL};
pub use store::{StoreError, UserProfileStore};
