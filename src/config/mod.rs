//! Configuration module for casa-split
//!
//! - XDG-compliant path resolution
//! - User settings persistence (display and month defaults)

pub mod paths;
pub mod settings;

pub use paths::CasaPaths;
pub use settings::{MonthDefaults, Settings};
