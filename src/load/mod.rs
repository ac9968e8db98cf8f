//! Loading env files into an environment

pub mod loader;
pub mod report;

pub use loader::{apply, Loader};
pub use report::LoadReport;
