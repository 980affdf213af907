//! Domain rules for querying wiki recent-changes replicas.
//!
//! Nothing in this crate performs I/O. It validates and normalizes caller
//! input and describes the time windows the query layer renders into SQL.

pub mod error;
pub mod hashtag;
pub mod lookback;
pub mod naming;
pub mod params;
pub mod types;
