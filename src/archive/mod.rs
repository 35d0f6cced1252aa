//! Data reconciliation and archive aggregation
//!
//! The core of the gateway: takes heterogeneous, partially-populated,
//! multi-locale rows from the store and (a) normalizes them into consistent
//! `Profile` values despite missing and legacy fields, and (b) re-derives
//! the hierarchical sector → category → placement index by joining profiles
//! against category and assignment rows.
//!
//! # Pipeline
//!
//! ```text
//! ┌──────────┐   fetch    ┌───────────────────────────────────────────┐
//! │  store   │──────────► │  join_assignments   (rows → per-profile)  │
//! │ gateway  │            │  normalize          (row → Profile)       │
//! └──────────┘            │  aggregate          (profiles → grouping) │
//!      ▲                  └──────────────────┬────────────────────────┘
//!      │ mutate                              │ swap
//!      │                            ┌────────▼────────┐
//!      └─────── ArchiveService ──── │ ArchiveSnapshot │  (epoch N)
//!                                   └─────────────────┘
//! ```
//!
//! All three core passes are synchronous pure functions; the service runs
//! them to completion on every load, locale change, and mutation. Malformed
//! rows never raise; they resolve to documented defaults or are dropped
//! row-by-row with a log line.

pub mod aggregate;
pub mod join;
pub mod normalize;
pub mod service;
pub mod snapshot;

pub use aggregate::{aggregate, Placement, SectorGrouping};
pub use join::join_assignments;
pub use normalize::normalize;
pub use service::ArchiveService;
pub use snapshot::{ArchiveSnapshot, SnapshotStore};
