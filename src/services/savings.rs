//! Savings goal service
//!
//! Goals live in the vehicle file next to the records they save for.

use chrono::NaiveDate;

use crate::audit::EntityType;
use crate::error::{CasaError, CasaResult};
use crate::models::{Member, Money, SavingsGoal, SavingsTotals};
use crate::storage::Storage;

/// Service for one member's savings goals
pub struct SavingsService<'a> {
    storage: &'a Storage,
    member: Member,
}

impl<'a> SavingsService<'a> {
    pub fn new(storage: &'a Storage, member: Member) -> Self {
        Self { storage, member }
    }

    /// Load the preloaded goals; fails when the member already has goals
    pub fn init_defaults(&self) -> CasaResult<Vec<SavingsGoal>> {
        if !self.goals()?.is_empty() {
            return Err(CasaError::Validation(format!(
                "{} already has savings goals",
                self.member
            )));
        }

        let goals = SavingsGoal::defaults(self.member);
        for goal in &goals {
            self.storage.vehicle.upsert_goal(goal.clone())?;
        }
        self.storage.vehicle.save()?;

        for goal in &goals {
            self.storage.log_create(
                EntityType::SavingsGoal,
                goal.id.to_string(),
                Some(goal.name.clone()),
                goal,
            )?;
        }

        tracing::debug!(member = %self.member, count = goals.len(), "loaded default savings goals");
        Ok(goals)
    }

    /// Active goals in creation order
    pub fn goals(&self) -> CasaResult<Vec<SavingsGoal>> {
        self.storage.vehicle.goals_for(self.member)
    }

    /// Find a goal by short ID, category, or name
    ///
    /// Names match case-insensitively, exactly first and then as a substring.
    pub fn find(&self, query: &str) -> CasaResult<SavingsGoal> {
        let goals = self.goals()?;
        let needle = query.trim().to_lowercase();

        let found = goals
            .iter()
            .find(|g| g.id.matches_short(query))
            .or_else(|| goals.iter().find(|g| g.category.slug() == needle))
            .or_else(|| goals.iter().find(|g| g.name.to_lowercase() == needle))
            .or_else(|| {
                (!needle.is_empty())
                    .then(|| goals.iter().find(|g| g.name.to_lowercase().contains(&needle)))
                    .flatten()
            });

        found
            .cloned()
            .ok_or_else(|| CasaError::savings_goal_not_found(query))
    }

    /// Put money into a goal
    pub fn add_savings(&self, query: &str, amount: Money) -> CasaResult<SavingsGoal> {
        if !amount.is_positive() {
            return Err(CasaError::Validation(
                "Savings amount must be greater than zero".into(),
            ));
        }

        let before = self.find(query)?;
        let mut goal = before.clone();
        goal.saved_amount = goal.saved_amount.saturating_add(amount);

        self.store_update(&before, &goal, format!("saved +{}", amount))?;
        Ok(goal)
    }

    /// Change what a goal saves towards
    pub fn set_target(&self, query: &str, target: Money) -> CasaResult<SavingsGoal> {
        if target.units() < 1 {
            return Err(CasaError::Validation("Savings target must be at least 1".into()));
        }

        let before = self.find(query)?;
        let mut goal = before.clone();
        goal.target_amount = target;

        self.store_update(
            &before,
            &goal,
            format!("target: {} -> {}", before.target_amount, target),
        )?;
        Ok(goal)
    }

    /// The expense was paid: empty the goal and restart its interval today
    pub fn reset(&self, query: &str, today: NaiveDate) -> CasaResult<SavingsGoal> {
        let before = self.find(query)?;
        let mut goal = before.clone();
        goal.saved_amount = Money::zero();
        goal.last_done_date = Some(today);

        self.store_update(&before, &goal, format!("reset on {}", today))?;
        Ok(goal)
    }

    pub fn totals(&self) -> CasaResult<SavingsTotals> {
        Ok(SavingsTotals::from_goals(&self.goals()?))
    }

    fn store_update(&self, before: &SavingsGoal, after: &SavingsGoal, diff: String) -> CasaResult<()> {
        after
            .validate()
            .map_err(|e| CasaError::Validation(e.to_string()))?;

        self.storage.vehicle.upsert_goal(after.clone())?;
        self.storage.vehicle.save()?;

        self.storage.log_update(
            EntityType::SavingsGoal,
            after.id.to_string(),
            Some(after.name.clone()),
            before,
            after,
            Some(diff),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CasaPaths;
    use crate::models::GoalCategory;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CasaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_init_defaults_once() {
        let (_temp, storage) = create_test_storage();
        let service = SavingsService::new(&storage, Member::Duvan);

        let goals = service.init_defaults().unwrap();
        assert_eq!(goals.len(), 11);
        assert_eq!(service.goals().unwrap().len(), 11);
        assert!(service.init_defaults().unwrap_err().is_validation());

        // Other members start empty
        assert!(SavingsService::new(&storage, Member::Alex).goals().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_category_and_name() {
        let (_temp, storage) = create_test_storage();
        let service = SavingsService::new(&storage, Member::Duvan);
        service.init_defaults().unwrap();

        assert_eq!(service.find("soat").unwrap().category, GoalCategory::Soat);
        assert_eq!(service.find("tire_rear").unwrap().category, GoalCategory::TireRear);
        assert_eq!(service.find("filtro de aceite").unwrap().category, GoalCategory::OilFilter);
        assert_eq!(service.find("refrigerante").unwrap().category, GoalCategory::Coolant);

        let oil = service.find("oil").unwrap();
        assert_eq!(service.find(&oil.id.to_string()).unwrap().id, oil.id);

        assert!(service.find("turbo").unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_target_and_reset() {
        let (_temp, storage) = create_test_storage();
        let service = SavingsService::new(&storage, Member::Duvan);
        service.init_defaults().unwrap();

        let before = service.totals().unwrap();
        // 35000 + 11667 + 24167 + 33250 + 28608 + 20667
        assert_eq!(before.needed_monthly.units(), 153_359);

        service.add_savings("oil", Money::from_units(20_000)).unwrap();
        let oil = service.add_savings("oil", Money::from_units(15_000)).unwrap();
        assert_eq!(oil.saved_amount.units(), 35_000);
        assert!(service.add_savings("oil", Money::zero()).unwrap_err().is_validation());

        let filter = service.set_target("oil_filter", Money::from_units(24_000)).unwrap();
        assert_eq!(filter.monthly_needed().units(), 6_000);
        assert!(service.set_target("oil_filter", Money::zero()).is_err());

        let totals = service.totals().unwrap();
        assert_eq!(totals.saved.units(), 35_000);
        assert_eq!(totals.needed_monthly.units(), 159_359);

        let today = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let reset = service.reset("oil", today).unwrap();
        assert_eq!(reset.saved_amount, Money::zero());
        assert_eq!(reset.next_due_date(), NaiveDate::from_ymd_opt(2025, 7, 10));
        assert_eq!(service.totals().unwrap().saved, Money::zero());
    }
}
