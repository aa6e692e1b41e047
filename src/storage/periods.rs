//! Monthly period repository (periods.json)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CasaError;
use crate::models::{MonthKey, MonthlyPeriod, PeriodId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PeriodData {
    periods: Vec<MonthlyPeriod>,
}

/// Repository for monthly period persistence
pub struct PeriodRepository {
    path: PathBuf,
    data: RwLock<HashMap<PeriodId, MonthlyPeriod>>,
}

impl PeriodRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: PeriodData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        for period in file_data.periods {
            data.insert(period.id, period);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let periods = self.get_all()?;
        write_json_atomic(&self.path, &PeriodData { periods })
    }

    pub fn get(&self, id: PeriodId) -> Result<Option<MonthlyPeriod>, CasaError> {
        Ok(read_lock(&self.data)?.get(&id).cloned())
    }

    /// Find the period for a calendar month
    pub fn get_by_key(&self, key: MonthKey) -> Result<Option<MonthlyPeriod>, CasaError> {
        Ok(read_lock(&self.data)?
            .values()
            .find(|p| p.key() == key)
            .cloned())
    }

    /// All periods, newest first
    pub fn get_all(&self) -> Result<Vec<MonthlyPeriod>, CasaError> {
        let mut periods: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        periods.sort_by(|a, b| b.key().cmp(&a.key()));
        Ok(periods)
    }

    pub fn upsert(&self, period: MonthlyPeriod) -> Result<(), CasaError> {
        write_lock(&self.data)?.insert(period.id, period);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, CasaError> {
        Ok(read_lock(&self.data)?.len())
    }
}
