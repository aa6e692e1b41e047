//! casa-split - shared household finances from the terminal
//!
//! Splits household costs between the three contributors of one home, keeps
//! track of who has paid their share each month, and plans how one member
//! pays down personal debts.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `allocation`: how much each member owes for an amount in a category
//! - `planner`: debt payoff ordering, snowball plan and debt-free date
//! - `models`: core data models (money, members, periods, debts, etc.)
//! - `storage`: JSON file storage layer
//! - `services`: business logic layer
//! - `audit`: audit logging system
//! - `config`: configuration and path management
//! - `cli` / `display`: command handlers and terminal formatting
//!
//! `allocation` and `planner` are pure: no I/O, no clock, no errors.
//!
//! # Example
//!
//! ```rust
//! use casa_split::allocation::compute_share;
//! use casa_split::models::{Category, Member, Money};
//!
//! let share = compute_share(Money::from_units(100), Category::Groceries, Member::Manuel);
//! assert_eq!(share, Money::from_units(33));
//! ```

pub mod allocation;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod services;
pub mod storage;

pub use error::{CasaError, CasaResult};
