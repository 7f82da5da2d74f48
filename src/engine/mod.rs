//! Pure decision logic behind the HTTP handlers.

pub mod ingest;
pub mod ranker;
pub mod scores;
