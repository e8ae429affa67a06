//! CLI command handlers. Each command is in its own file.

mod analyze;
mod interactive;
mod mirror;
mod report;
mod session;

pub use analyze::run_analyze;
pub use interactive::run_interactive;
pub use mirror::run_mirror;
pub use report::run_report;
pub use session::CensusSession;
