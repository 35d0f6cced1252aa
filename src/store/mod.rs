//! Store boundary: raw row shapes and the repository gateway
//!
//! The hosted record store is an opaque fetch/mutate boundary. Rows come
//! back loosely typed and schema-drifted; everything defensive happens in
//! `crate::archive`, so the row types here accept any JSON the store has
//! ever produced.

pub mod gateway;
pub mod memory;
pub mod rest;
pub mod rows;

pub use gateway::RepositoryGateway;
pub use memory::MemoryGateway;
pub use rest::{RestGateway, RestGatewayConfig};
pub use rows::{AssignmentRow, CategoryRow, DossierRow};
