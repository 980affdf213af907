//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept any MySQL executor (a connection or a pool) as the first
//! argument.

pub mod recent_change_repo;

pub use recent_change_repo::RecentChangeRepo;
