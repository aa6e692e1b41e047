//! Path management for casa-split
//!
//! ## Path Resolution Order
//!
//! 1. `CASA_SPLIT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/casa-split` or `~/.config/casa-split`
//! 3. Windows: `%APPDATA%\casa-split`

use std::path::PathBuf;

use crate::error::CasaError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CASA_SPLIT_DATA_DIR";

/// Manages all paths used by casa-split
#[derive(Debug, Clone)]
pub struct CasaPaths {
    base_dir: PathBuf,
}

impl CasaPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, CasaError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CasaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn periods_file(&self) -> PathBuf {
        self.data_dir().join("periods.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("payments.json")
    }

    /// Debts, debt payments and the monthly payoff budget
    pub fn debts_file(&self) -> PathBuf {
        self.data_dir().join("debts.json")
    }

    pub fn work_logs_file(&self) -> PathBuf {
        self.data_dir().join("work_logs.json")
    }

    /// Maintenance records and odometer readings
    pub fn vehicle_file(&self) -> PathBuf {
        self.data_dir().join("vehicle.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CasaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CasaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CasaError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if casa-split has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CasaError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME")
                .map_err(|_| CasaError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("casa-split"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CasaError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CasaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("casa-split"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CasaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.debts_file(),
            temp_dir.path().join("data").join("debts.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CasaPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(!paths.is_initialized());
    }
}
