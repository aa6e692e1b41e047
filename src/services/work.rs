//! Work income service

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{CasaError, CasaResult};
use crate::models::{Member, Money, MonthKey, WorkLog};
use crate::storage::Storage;

/// Optional fields of a work log
#[derive(Debug, Clone, Default)]
pub struct WorkLogInput {
    pub gas_cost: Money,
    pub other_costs: Money,
    pub km_driven: Option<u32>,
    pub notes: Option<String>,
}

/// Fields to change on an existing work log; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct WorkLogUpdate {
    pub date: Option<NaiveDate>,
    pub gross_income: Option<Money>,
    pub gas_cost: Option<Money>,
    pub other_costs: Option<Money>,
    pub km_driven: Option<u32>,
    pub notes: Option<String>,
}

/// Income totals for one month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkSummary {
    pub days_worked: usize,
    pub total_gross: Money,
    pub total_gas: Money,
    pub total_other: Money,
    pub total_net: Money,
    /// `round(net / days)`; zero when nothing was logged
    pub average_daily_net: Money,
    pub total_km: u64,
}

impl WorkSummary {
    pub fn from_logs(logs: &[WorkLog]) -> Self {
        let total_gross: Money = logs.iter().map(|l| l.gross_income).sum();
        let total_gas: Money = logs.iter().map(|l| l.gas_cost).sum();
        let total_other: Money = logs.iter().map(|l| l.other_costs).sum();
        let total_net = total_gross - total_gas - total_other;

        let average_daily_net = if logs.is_empty() {
            Money::zero()
        } else {
            total_net.div_round(logs.len() as i64)
        };

        Self {
            days_worked: logs.len(),
            total_gross,
            total_gas,
            total_other,
            total_net,
            average_daily_net,
            total_km: logs.iter().filter_map(|l| l.km_driven).map(u64::from).sum(),
        }
    }
}

/// Service for one member's work logs
pub struct WorkService<'a> {
    storage: &'a Storage,
    member: Member,
}

impl<'a> WorkService<'a> {
    pub fn new(storage: &'a Storage, member: Member) -> Self {
        Self { storage, member }
    }

    pub fn log(&self, date: NaiveDate, gross_income: Money, input: WorkLogInput) -> CasaResult<WorkLog> {
        let mut log = WorkLog::new(self.member, date, gross_income);
        log.gas_cost = input.gas_cost;
        log.other_costs = input.other_costs;
        log.km_driven = input.km_driven;
        log.notes = input.notes.unwrap_or_default();

        log.validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        self.storage.work_logs.upsert(log.clone())?;
        self.storage.work_logs.save()?;

        self.storage.log_create(
            EntityType::WorkLog,
            log.id.to_string(),
            Some(date.to_string()),
            &log,
        )?;

        tracing::debug!(%date, net = log.net_income().units(), "logged work day");
        Ok(log)
    }

    pub fn update(&self, short_id: &str, changes: WorkLogUpdate) -> CasaResult<WorkLog> {
        let before = self.find(short_id)?;
        let mut log = before.clone();

        if let Some(date) = changes.date {
            log.date = date;
        }
        if let Some(gross) = changes.gross_income {
            log.gross_income = gross;
        }
        if let Some(gas) = changes.gas_cost {
            log.gas_cost = gas;
        }
        if let Some(other) = changes.other_costs {
            log.other_costs = other;
        }
        if let Some(km) = changes.km_driven {
            log.km_driven = Some(km);
        }
        if let Some(notes) = changes.notes {
            log.notes = notes;
        }

        log.validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        self.storage.work_logs.upsert(log.clone())?;
        self.storage.work_logs.save()?;

        let diff = format!("net: {} -> {}", before.net_income(), log.net_income());
        self.storage.log_update(
            EntityType::WorkLog,
            log.id.to_string(),
            Some(log.date.to_string()),
            &before,
            &log,
            Some(diff),
        )?;

        Ok(log)
    }

    pub fn delete(&self, short_id: &str) -> CasaResult<WorkLog> {
        let log = self.find(short_id)?;

        self.storage.work_logs.delete(log.id)?;
        self.storage.work_logs.save()?;

        self.storage.log_delete(
            EntityType::WorkLog,
            log.id.to_string(),
            Some(log.date.to_string()),
            &log,
        )?;

        Ok(log)
    }

    fn find(&self, short_id: &str) -> CasaResult<WorkLog> {
        self.storage
            .work_logs
            .find_by_short_id(short_id)?
            .filter(|l| l.member == self.member)
            .ok_or_else(|| CasaError::work_log_not_found(short_id))
    }

    /// Logs for a month, newest first
    pub fn month_logs(&self, key: MonthKey) -> CasaResult<Vec<WorkLog>> {
        self.storage
            .work_logs
            .get_in_range(self.member, key.start_date(), key.end_date())
    }

    pub fn month_summary(&self, key: MonthKey) -> CasaResult<WorkSummary> {
        Ok(WorkSummary::from_logs(&self.month_logs(key)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CasaPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CasaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_empty_month() {
        let summary = WorkSummary::from_logs(&[]);
        assert_eq!(summary.days_worked, 0);
        assert_eq!(summary.average_daily_net, Money::zero());
    }

    #[test]
    fn test_month_summary() {
        let (_temp, storage) = create_test_storage();
        let service = WorkService::new(&storage, Member::Duvan);

        service
            .log(
                day(3),
                Money::from_units(150_000),
                WorkLogInput {
                    gas_cost: Money::from_units(25_000),
                    km_driven: Some(120),
                    ..Default::default()
                },
            )
            .unwrap();
        service
            .log(
                day(4),
                Money::from_units(100_000),
                WorkLogInput {
                    gas_cost: Money::from_units(20_000),
                    other_costs: Money::from_units(4_999),
                    km_driven: Some(80),
                    ..Default::default()
                },
            )
            .unwrap();
        service
            .log(
                NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
                Money::from_units(90_000),
                WorkLogInput::default(),
            )
            .unwrap();

        let summary = service.month_summary(MonthKey::new(2025, 3).unwrap()).unwrap();
        assert_eq!(summary.days_worked, 2);
        assert_eq!(summary.total_gross.units(), 250_000);
        assert_eq!(summary.total_net.units(), 200_001);
        // 200001 / 2 = 100000.5 rounds up
        assert_eq!(summary.average_daily_net.units(), 100_001);
        assert_eq!(summary.total_km, 200);
    }

    #[test]
    fn test_rejects_negative_costs_and_deletes() {
        let (_temp, storage) = create_test_storage();
        let service = WorkService::new(&storage, Member::Duvan);

        let err = service
            .log(
                day(3),
                Money::from_units(10_000),
                WorkLogInput {
                    gas_cost: Money::from_units(-1),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let log = service
            .log(day(3), Money::from_units(10_000), WorkLogInput::default())
            .unwrap();
        assert!(WorkService::new(&storage, Member::Alex)
            .delete(&log.id.to_string())
            .unwrap_err()
            .is_not_found());
        service.delete(&log.id.to_string()).unwrap();
        assert!(service
            .month_logs(MonthKey::new(2025, 3).unwrap())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_keeps_identity() {
        let (_temp, storage) = create_test_storage();
        let service = WorkService::new(&storage, Member::Duvan);

        let log = service
            .log(
                day(3),
                Money::from_units(120_000),
                WorkLogInput {
                    gas_cost: Money::from_units(20_000),
                    notes: Some("turno largo".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let updated = service
            .update(
                &log.id.to_string(),
                WorkLogUpdate {
                    date: Some(day(4)),
                    gross_income: Some(Money::from_units(130_000)),
                    km_driven: Some(95),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, log.id);
        assert_eq!(updated.created_at, log.created_at);
        assert_eq!(updated.date, day(4));
        assert_eq!(updated.gas_cost.units(), 20_000);
        assert_eq!(updated.notes, "turno largo");
        assert_eq!(updated.net_income().units(), 110_000);

        let logs = service.month_logs(MonthKey::new(2025, 3).unwrap()).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].km_driven, Some(95));

        let err = service
            .update(
                &log.id.to_string(),
                WorkLogUpdate {
                    other_costs: Some(Money::from_units(-1)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert!(service
            .update("work-ffffffff", WorkLogUpdate::default())
            .unwrap_err()
            .is_not_found());
    }
}
