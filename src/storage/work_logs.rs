//! Work log repository (work_logs.json)

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::CasaError;
use crate::models::{Member, WorkLog, WorkLogId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct WorkLogData {
    logs: Vec<WorkLog>,
}

/// Repository for daily work logs
pub struct WorkLogRepository {
    path: PathBuf,
    data: RwLock<HashMap<WorkLogId, WorkLog>>,
}

impl WorkLogRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: WorkLogData = read_json(&self.path)?;
        let mut data = write_lock(&self.data)?;

        data.clear();
        data.extend(file_data.logs.into_iter().map(|l| (l.id, l)));

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let mut logs: Vec<_> = read_lock(&self.data)?.values().cloned().collect();
        logs.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));
        write_json_atomic(&self.path, &WorkLogData { logs })
    }

    pub fn find_by_short_id(&self, short: &str) -> Result<Option<WorkLog>, CasaError> {
        Ok(read_lock(&self.data)?
            .values()
            .find(|l| l.id.matches_short(short))
            .cloned())
    }

    /// A member's logs dated within `[start, end]`, newest first
    pub fn get_in_range(
        &self,
        member: Member,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WorkLog>, CasaError> {
        let mut logs: Vec<_> = read_lock(&self.data)?
            .values()
            .filter(|l| l.member == member && l.date >= start && l.date <= end)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(logs)
    }

    pub fn upsert(&self, log: WorkLog) -> Result<(), CasaError> {
        write_lock(&self.data)?.insert(log.id, log);
        Ok(())
    }

    pub fn delete(&self, id: WorkLogId) -> Result<bool, CasaError> {
        Ok(write_lock(&self.data)?.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_and_per_member() {
        let temp_dir = TempDir::new().unwrap();
        let repo = WorkLogRepository::new(temp_dir.path().join("work_logs.json"));
        repo.load().unwrap();

        repo.upsert(WorkLog::new(Member::Duvan, date(3, 1), Money::from_units(100_000)))
            .unwrap();
        repo.upsert(WorkLog::new(Member::Duvan, date(3, 31), Money::from_units(120_000)))
            .unwrap();
        repo.upsert(WorkLog::new(Member::Duvan, date(4, 1), Money::from_units(90_000)))
            .unwrap();
        repo.upsert(WorkLog::new(Member::Alex, date(3, 15), Money::from_units(50_000)))
            .unwrap();

        let march = repo.get_in_range(Member::Duvan, date(3, 1), date(3, 31)).unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].date, date(3, 31));

        repo.save().unwrap();
        let repo2 = WorkLogRepository::new(temp_dir.path().join("work_logs.json"));
        repo2.load().unwrap();
        assert_eq!(
            repo2.get_in_range(Member::Duvan, date(1, 1), date(12, 31)).unwrap().len(),
            3
        );
    }
}
