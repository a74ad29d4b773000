//! Browser host helpers shared by the portal desktop runtime and its apps.
//!
//! Everything here degrades to deterministic fallbacks off `wasm32`, so native test builds of the
//! runtime never touch browser globals.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod time;
pub mod viewport;

pub use time::{next_monotonic_timestamp_ms, unix_time_ms_now};
pub use viewport::{browser_viewport_size, ViewportSize, FALLBACK_VIEWPORT};
