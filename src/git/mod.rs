//! Git access: porcelain status parsing and the process-backed git backend.

pub mod backend;
pub mod status;

pub use backend::{GitBackend, SystemGit, check_git_installed};
pub use status::{ChangeEntry, StatusCode, StatusReport, parse_status_line, parse_status_output, unquote};
