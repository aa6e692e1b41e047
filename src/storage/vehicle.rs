//! Vehicle repository (vehicle.json)
//!
//! Stores maintenance records, odometer readings, per-member financing and
//! document dates, and savings goals in one file.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CasaError;
use crate::models::{
    MaintenanceId, MaintenanceRecord, Member, OdometerReading, SavingsGoal, VehicleConfig,
};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct VehicleData {
    #[serde(default)]
    maintenance: Vec<MaintenanceRecord>,
    #[serde(default)]
    odometer: Vec<OdometerReading>,
    #[serde(default)]
    configs: BTreeMap<Member, VehicleConfig>,
    #[serde(default)]
    goals: Vec<SavingsGoal>,
}

#[derive(Default)]
struct VehicleState {
    maintenance: HashMap<MaintenanceId, MaintenanceRecord>,
    odometer: Vec<OdometerReading>,
    configs: BTreeMap<Member, VehicleConfig>,
    goals: Vec<SavingsGoal>,
}

/// Repository for maintenance records and odometer readings
pub struct VehicleRepository {
    path: PathBuf,
    state: RwLock<VehicleState>,
}

impl VehicleRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(VehicleState::default()),
        }
    }

    pub fn load(&self) -> Result<(), CasaError> {
        let file_data: VehicleData = read_json(&self.path)?;
        let mut state = write_lock(&self.state)?;

        state.maintenance = file_data.maintenance.into_iter().map(|r| (r.id, r)).collect();
        state.odometer = file_data.odometer;
        state.configs = file_data.configs;
        state.goals = file_data.goals;

        Ok(())
    }

    pub fn save(&self) -> Result<(), CasaError> {
        let state = read_lock(&self.state)?;

        let mut maintenance: Vec<_> = state.maintenance.values().cloned().collect();
        maintenance.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        write_json_atomic(
            &self.path,
            &VehicleData {
                maintenance,
                odometer: state.odometer.clone(),
                configs: state.configs.clone(),
                goals: state.goals.clone(),
            },
        )
    }

    pub fn find_by_short_id(&self, short: &str) -> Result<Option<MaintenanceRecord>, CasaError> {
        Ok(read_lock(&self.state)?
            .maintenance
            .values()
            .find(|r| r.id.matches_short(short))
            .cloned())
    }

    /// A member's maintenance records, newest first
    pub fn maintenance_for(&self, member: Member) -> Result<Vec<MaintenanceRecord>, CasaError> {
        let mut records: Vec<_> = read_lock(&self.state)?
            .maintenance
            .values()
            .filter(|r| r.member == member)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(records)
    }

    pub fn upsert_maintenance(&self, record: MaintenanceRecord) -> Result<(), CasaError> {
        write_lock(&self.state)?.maintenance.insert(record.id, record);
        Ok(())
    }

    pub fn delete_maintenance(&self, id: MaintenanceId) -> Result<bool, CasaError> {
        Ok(write_lock(&self.state)?.maintenance.remove(&id).is_some())
    }

    pub fn add_reading(&self, reading: OdometerReading) -> Result<(), CasaError> {
        write_lock(&self.state)?.odometer.push(reading);
        Ok(())
    }

    /// Latest reading by date; among same-day readings the last recorded wins
    pub fn latest_reading(&self, member: Member) -> Result<Option<OdometerReading>, CasaError> {
        Ok(read_lock(&self.state)?
            .odometer
            .iter()
            .filter(|r| r.member == member)
            .max_by_key(|r| r.date)
            .copied())
    }

    /// A member's financing and document dates; defaults when never set
    pub fn config(&self, member: Member) -> Result<VehicleConfig, CasaError> {
        Ok(read_lock(&self.state)?
            .configs
            .get(&member)
            .copied()
            .unwrap_or_default())
    }

    pub fn set_config(&self, member: Member, config: VehicleConfig) -> Result<(), CasaError> {
        write_lock(&self.state)?.configs.insert(member, config);
        Ok(())
    }

    /// A member's active savings goals in creation order
    pub fn goals_for(&self, member: Member) -> Result<Vec<SavingsGoal>, CasaError> {
        let mut goals: Vec<_> = read_lock(&self.state)?
            .goals
            .iter()
            .filter(|g| g.member == member && g.is_active)
            .cloned()
            .collect();
        goals.sort_by_key(|g| g.created_at);
        Ok(goals)
    }

    pub fn upsert_goal(&self, goal: SavingsGoal) -> Result<(), CasaError> {
        let mut state = write_lock(&self.state)?;
        match state.goals.iter_mut().find(|g| g.id == goal.id) {
            Some(existing) => *existing = goal,
            None => state.goals.push(goal),
        }
        Ok(())
    }
}
