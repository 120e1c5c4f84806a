//! One-shot historical range and warden chat client.
//!
//! Everything here is request/response against the mission control HTTP
//! API: bootstrap fetches for the last 24 h, bounded paginated range
//! queries for ad-hoc inspection outside the live window, and the warden
//! chat. Failures surface as [`QueryError`] and are not retried — unlike
//! the stream channels, there is no reconnection machinery here.
//!
//! # Modules
//!
//! - [`client`] -- The [`ApiClient`] and bootstrap fetches
//! - [`range`] -- Bounded range query parameters and page shapes
//! - [`chat`] -- Warden chat reply shapes
//! - [`error`] -- Query error taxonomy
//!
//! [`ApiClient`]: client::ApiClient
//! [`QueryError`]: error::QueryError

pub mod chat;
pub mod client;
pub mod error;
pub mod range;

pub use chat::{ChatReply, PlanImpact, ReplyKind, TacticalPlan};
pub use client::{ApiClient, RecentHistory};
pub use error::QueryError;
pub use range::{EntityFilter, RangePage, RangeQuery, RangeTotals};
