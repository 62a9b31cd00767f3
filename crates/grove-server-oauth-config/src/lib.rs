// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mirrors edited OAuth cloud-config nodes into the Grove configuration
//! registry.
//!
//! When an OAuth cloud-service configuration is edited in the content tree,
//! the host delivers change notifications for the edited subtree. For each
//! notification this crate:
//!
//! 1. derives the logical config id from the last path segment,
//! 2. reads the node's attributes and keeps only `oauth.`-namespaced keys,
//! 3. deletes every existing registry entry recorded under the same
//!    (factory kind, `oauth.config.id`) pair — best effort, so one stale
//!    un-deletable entry never blocks publishing,
//! 4. creates a fresh registry entry with the filtered attributes and
//!    persists the read-side transaction.
//!
//! Failures are isolated per event: a broken node or registry hiccup is
//! logged and the remaining events in the batch still run. Events are
//! processed sequentially in delivery order; the mirror adds no concurrency
//! of its own.

pub mod error;
pub mod event;
pub mod mirror;
pub mod registry;
pub mod source;

pub use error::{MirrorError, Result};
pub use event::{ChangeEvent, ChangeKind};
pub use mirror::{ConfigMirror, FACTORY_KIND};
pub use registry::ConfigRegistry;
pub use source::ConfigNodeSource;
