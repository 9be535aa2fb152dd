//! Terminal front end shared by the `fair-rps` and `fair-rps-verify` binaries.

pub mod console;
pub mod logging;
