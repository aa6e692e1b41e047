//! Service layer for casa-split
//!
//! Business rules on top of the storage layer: validation, seeding new
//! months, payments and audit logging. Services never read the clock; dates
//! come from the caller.

pub mod contribution;
pub mod debt;
pub mod expense;
pub mod period;
pub mod savings;
pub mod vehicle;
pub mod work;

pub use contribution::{ContributionService, FundShare, FundStatus};
pub use debt::DebtService;
pub use expense::{ExpenseService, MemberBreakdown, PeriodBreakdown};
pub use period::PeriodService;
pub use savings::SavingsService;
pub use vehicle::{DocumentDue, ServiceAlert, ServiceInput, VehicleService, VehicleSummary};
pub use work::{WorkLogInput, WorkLogUpdate, WorkService, WorkSummary};
