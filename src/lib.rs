//! Rollover TestKit - keyboard and mouse tester with session reports
//!
//! Captures key and click events, aggregates live statistics, runs the
//! gaming checks (rollover tier, combo validation, rapid-press response) and
//! compiles paginated reports and plain-text summaries.

pub mod config;
pub mod gaming;
pub mod keyboard;
pub mod mouse;
pub mod report;
pub mod session;
pub mod stats;
pub mod ui;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::Config;
pub use session::Session;
