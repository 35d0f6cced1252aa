//! Diiwaan - registry gateway for the national biographical archive
//!
//! Diiwaan serves a public registry of biographical dossiers reconciled
//! from a hosted record store, with an authenticated admin surface for the
//! editorial team.
//!
//! ## Services
//!
//! - **Archive**: the reconciliation core: normalizes schema-drifted rows
//!   into canonical profiles and re-derives the sector placement index
//! - **Store**: repository gateway to the hosted store (REST) or an
//!   in-memory table set for development and tests
//! - **Server**: HTTP read API plus admin mutation routes

pub mod archive;
pub mod config;
pub mod locale;
pub mod model;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{DiiwaanError, Result};
