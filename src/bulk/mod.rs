//! Bulk Module
//!
//! Groups incoming commands into bulks and decides when each one is flushed:
//! - StaticBulk: fixed capacity, flushes itself when full
//! - DynamicBulk: unbounded, flushed when a delimited block closes
//! - BulkCoordinator: routes each line to one of the two and tracks block depth

mod coordinator;
mod dynamic_bulk;
mod static_bulk;


pub use coordinator::BulkCoordinator;
pub use dynamic_bulk::DynamicBulk;
pub use static_bulk::StaticBulk;
