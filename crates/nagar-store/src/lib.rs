//! Flat-file persistence: each store owns one JSON document, loads it into
//! memory at startup, and rewrites the whole document after every
//! mutation. The in-memory working set is authoritative; a failed write
//! costs durability, not correctness.

mod persist;

pub mod reference;
pub mod reports;
pub mod sessions;
pub mod users;
