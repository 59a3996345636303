//! # Docket
//!
//! Client core for looking up court hearings by court file number and keeping
//! bookmarks on them in step with the hearings service.
//!
//! ## Architecture
//!
//! ```text
//! HearingsApi → BookmarkSynchronizer → BookmarkStore
//!                      ↓
//!      SubscriptionStatusStore + NotificationChannel → view
//! ```
//!
//! The remote service is authoritative for subscription status. Local state
//! is optimistic and is consolidated with an `IsSubscribedTo` query after
//! every change.
//!
//! ## Quick Start
//!
//! ```bash
//! # Hearings with times in the hearing's own zone
//! docket hearings CF-1234
//!
//! # Toggle the bookmark
//! docket bookmark CF-1234
//!
//! # Locally cached bookmarks
//! docket bookmarks
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store, the
/// remote client, the time normalizer and the synchronizer.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/docket/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Hearing`](domain::Hearing): a hearing as the service returns it
/// - [`HearingRecord`](domain::HearingRecord): bookmark payload and cache row
/// - [`SubscriptionStatus`](domain::SubscriptionStatus): known bookmark status
/// - [`BookmarkIntent`](domain::BookmarkIntent): one requested change
pub mod domain;

/// Hearing time normalization into the hearing's own `Etc/GMT` zone.
pub mod normalizer;

/// Transient user-facing messages.
pub mod notify;

/// The hearings service.
///
/// - [`HearingsApi`](remote::HearingsApi): async trait over the five operations
/// - [`GraphqlClient`](remote::graphql::GraphqlClient): reqwest implementation
pub mod remote;

/// SQLite bookmark cache.
///
/// - [`BookmarkStore`](store::BookmarkStore): trait defining cache operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Bookmark synchronization.
pub mod sync;
