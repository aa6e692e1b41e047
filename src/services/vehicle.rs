//! Vehicle maintenance service
//!
//! Service history and odometer readings for a member's motorcycle, the
//! monthly cost of keeping it running, upcoming services by kilometre, the
//! financing installment and the legal documents that expire every year.

use chrono::{Months, NaiveDate};

use crate::audit::EntityType;
use crate::error::{CasaError, CasaResult};
use crate::models::{
    MaintenanceKind, MaintenanceRecord, Member, Money, OdometerReading, SavingsTotals,
    VehicleConfig, VehicleDocument,
};
use crate::storage::Storage;

/// Alert window: warn this many km before the next service
const ALERT_AHEAD_KM: i64 = 500;
/// Alerts stop once a service is this many km overdue
const ALERT_OVERDUE_LIMIT_KM: i64 = 1_000;

/// Optional fields of a maintenance record
#[derive(Debug, Clone, Default)]
pub struct ServiceInput {
    pub km_at_service: Option<u32>,
    pub next_service_km: Option<u32>,
    pub description: Option<String>,
}

/// An upcoming or overdue service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceAlert {
    pub kind: MaintenanceKind,
    /// Negative when overdue
    pub km_left: i64,
}

impl ServiceAlert {
    pub fn is_overdue(&self) -> bool {
        self.km_left <= 0
    }
}

/// Monthly cost of last year's maintenance
///
/// Records dated on or after `today` minus twelve months count.
pub fn monthly_amortization(records: &[MaintenanceRecord], today: NaiveDate) -> Money {
    let since = today
        .checked_sub_months(Months::new(12))
        .unwrap_or(NaiveDate::MIN);

    let total: Money = records
        .iter()
        .filter(|r| r.date >= since)
        .map(|r| r.cost)
        .sum();
    total.div_round(12)
}

/// Services coming due at the current odometer reading
///
/// `records` must be newest first; only the first record of each kind that
/// falls inside the window produces an alert.
pub fn service_alerts(records: &[MaintenanceRecord], current_km: u32) -> Vec<ServiceAlert> {
    if current_km == 0 {
        return Vec::new();
    }

    let mut alerts: Vec<ServiceAlert> = Vec::new();
    for record in records {
        let Some(next) = record.next_service_km else {
            continue;
        };

        let km_left = i64::from(next) - i64::from(current_km);
        if km_left < ALERT_AHEAD_KM
            && km_left > -ALERT_OVERDUE_LIMIT_KM
            && !alerts.iter().any(|a| a.kind == record.kind)
        {
            alerts.push(ServiceAlert {
                kind: record.kind,
                km_left,
            });
        }
    }
    alerts
}

/// Countdown to a document's due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentDue {
    pub document: VehicleDocument,
    pub due_date: NaiveDate,
    /// Zero on the due date, negative afterwards
    pub days_left: i64,
}

impl DocumentDue {
    pub fn is_expired(&self) -> bool {
        self.days_left <= 0
    }
}

/// Days left on each document that has a due date set
pub fn document_alerts(config: &VehicleConfig, today: NaiveDate) -> Vec<DocumentDue> {
    [
        (VehicleDocument::Soat, config.soat_due_date),
        (VehicleDocument::Tecnomecanica, config.tecno_due_date),
    ]
    .into_iter()
    .filter_map(|(document, due)| {
        due.map(|due_date| DocumentDue {
            document,
            due_date,
            days_left: (due_date - today).num_days(),
        })
    })
    .collect()
}

/// Everything shown on the vehicle summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSummary {
    pub latest_reading: Option<OdometerReading>,
    pub monthly_amortization: Money,
    pub alerts: Vec<ServiceAlert>,
    pub recent_records: Vec<MaintenanceRecord>,
    pub config: VehicleConfig,
    pub documents: Vec<DocumentDue>,
    pub savings: SavingsTotals,
}

/// Service for one member's vehicle
pub struct VehicleService<'a> {
    storage: &'a Storage,
    member: Member,
}

impl<'a> VehicleService<'a> {
    pub fn new(storage: &'a Storage, member: Member) -> Self {
        Self { storage, member }
    }

    /// Log a service
    ///
    /// Without an explicit next service the kind's default interval is added
    /// to the odometer at service. A known odometer is also stored as a
    /// reading on the service date.
    pub fn add_service(
        &self,
        date: NaiveDate,
        kind: MaintenanceKind,
        cost: Money,
        input: ServiceInput,
    ) -> CasaResult<MaintenanceRecord> {
        let mut record = MaintenanceRecord::new(self.member, date, kind, cost);
        record.km_at_service = input.km_at_service;
        record.next_service_km = input.next_service_km;
        record.description = input.description.unwrap_or_default();
        record.apply_default_interval();

        record
            .validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        self.storage.vehicle.upsert_maintenance(record.clone())?;
        let reading = record
            .km_at_service
            .filter(|km| *km > 0)
            .map(|km| OdometerReading {
                member: self.member,
                date,
                km,
            });
        if let Some(reading) = reading {
            self.storage.vehicle.add_reading(reading)?;
        }
        self.storage.vehicle.save()?;

        self.storage.log_create(
            EntityType::Maintenance,
            record.id.to_string(),
            Some(kind.label().to_string()),
            &record,
        )?;
        if let Some(reading) = reading {
            self.storage.log_create(
                EntityType::Odometer,
                format!("{}@{}", self.member.slug(), date),
                None,
                &reading,
            )?;
        }

        Ok(record)
    }

    pub fn delete_service(&self, short_id: &str) -> CasaResult<MaintenanceRecord> {
        let record = self
            .storage
            .vehicle
            .find_by_short_id(short_id)?
            .filter(|r| r.member == self.member)
            .ok_or_else(|| CasaError::maintenance_not_found(short_id))?;

        self.storage.vehicle.delete_maintenance(record.id)?;
        self.storage.vehicle.save()?;

        self.storage.log_delete(
            EntityType::Maintenance,
            record.id.to_string(),
            Some(record.kind.label().to_string()),
            &record,
        )?;

        Ok(record)
    }

    pub fn record_km(&self, date: NaiveDate, km: u32) -> CasaResult<OdometerReading> {
        if km == 0 {
            return Err(CasaError::Validation("Odometer reading must be greater than zero".into()));
        }

        let reading = OdometerReading {
            member: self.member,
            date,
            km,
        };

        self.storage.vehicle.add_reading(reading)?;
        self.storage.vehicle.save()?;

        self.storage.log_create(
            EntityType::Odometer,
            format!("{}@{}", self.member.slug(), date),
            None,
            &reading,
        )?;

        Ok(reading)
    }

    pub fn latest_reading(&self) -> CasaResult<Option<OdometerReading>> {
        self.storage.vehicle.latest_reading(self.member)
    }

    /// Records, newest first
    pub fn history(&self) -> CasaResult<Vec<MaintenanceRecord>> {
        self.storage.vehicle.maintenance_for(self.member)
    }

    pub fn config(&self) -> CasaResult<VehicleConfig> {
        self.storage.vehicle.config(self.member)
    }

    /// Replace the installment and document dates
    pub fn set_config(&self, config: VehicleConfig) -> CasaResult<VehicleConfig> {
        config
            .validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        let before = self.config()?;
        self.storage.vehicle.set_config(self.member, config)?;
        self.storage.vehicle.save()?;

        self.storage.log_update(
            EntityType::VehicleConfig,
            self.member.slug(),
            None,
            &before,
            &config,
            None,
        )?;

        Ok(config)
    }

    pub fn summary(&self, today: NaiveDate) -> CasaResult<VehicleSummary> {
        let records = self.history()?;
        let latest_reading = self.latest_reading()?;
        let current_km = latest_reading.map(|r| r.km).unwrap_or(0);
        let config = self.config()?;
        let goals = self.storage.vehicle.goals_for(self.member)?;

        Ok(VehicleSummary {
            latest_reading,
            monthly_amortization: monthly_amortization(&records, today),
            alerts: service_alerts(&records, current_km),
            recent_records: records,
            documents: document_alerts(&config, today),
            config,
            savings: SavingsTotals::from_goals(&goals),
        })
    }
}
