//! Long-running background processors.
//!
//! - `SessionSweeper`: drops checkout sessions that outlived their TTL

pub mod session_sweeper;

pub use session_sweeper::SessionSweeper;
