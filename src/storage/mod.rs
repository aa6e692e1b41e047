//! Storage layer for casa-split
//!
//! JSON files under `data/`, written atomically, with one repository per
//! file. The `Storage` coordinator also owns the audit logger so services can
//! record every change they persist.

pub mod debts;
pub mod expenses;
pub mod file_io;
pub mod payments;
pub mod periods;
pub mod vehicle;
pub mod work_logs;

pub use debts::DebtRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use payments::PaymentRepository;
pub use periods::PeriodRepository;
pub use vehicle::VehicleRepository;
pub use work_logs::WorkLogRepository;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::CasaPaths;
use crate::error::CasaError;

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, CasaError> {
    lock.read()
        .map_err(|e| CasaError::Storage(format!("Failed to acquire read lock: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, CasaError> {
    lock.write()
        .map_err(|e| CasaError::Storage(format!("Failed to acquire write lock: {}", e)))
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: CasaPaths,
    audit: AuditLogger,
    pub periods: PeriodRepository,
    pub expenses: ExpenseRepository,
    pub payments: PaymentRepository,
    pub debts: DebtRepository,
    pub work_logs: WorkLogRepository,
    pub vehicle: VehicleRepository,
}

impl Storage {
    pub fn new(paths: CasaPaths) -> Result<Self, CasaError> {
        paths.ensure_directories()?;

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            periods: PeriodRepository::new(paths.periods_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            payments: PaymentRepository::new(paths.payments_file()),
            debts: DebtRepository::new(paths.debts_file()),
            work_logs: WorkLogRepository::new(paths.work_logs_file()),
            vehicle: VehicleRepository::new(paths.vehicle_file()),
            paths,
        })
    }

    /// Open storage and load every data file
    pub fn open(paths: CasaPaths) -> Result<Self, CasaError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &CasaPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn load_all(&self) -> Result<(), CasaError> {
        self.periods.load()?;
        self.expenses.load()?;
        self.payments.load()?;
        self.debts.load()?;
        self.work_logs.load()?;
        self.vehicle.load()?;
        tracing::debug!(base = %self.paths.base_dir().display(), "loaded data files");
        Ok(())
    }

    pub fn save_all(&self) -> Result<(), CasaError> {
        self.periods.save()?;
        self.expenses.save()?;
        self.payments.save()?;
        self.debts.save()?;
        self.work_logs.save()?;
        self.vehicle.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CasaError> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), CasaError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), CasaError> {
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }
}
