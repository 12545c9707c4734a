//! Financial Insight Deriver
//!
//! Pure functions that turn one snapshot of upstream figures into what the
//! dashboard shows. Nothing here performs I/O or keeps state between calls.
//!
//! ## Components
//!
//! - **Alerts** - Threshold rules over income, expenses and balance
//! - **Budgets** - Per-category spend against configured limits
//! - **Projection** - End-of-month balance under three spending scenarios
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finboard_core::{derive_dashboard, Config};
//!
//! let config = Config::embedded()?;
//! let today = chrono::Local::now().date_naive();
//! let dashboard = derive_dashboard(&snapshot, &config, today);
//! ```

pub mod alerts;
pub mod budgets;
pub mod dashboard;
pub mod projection;

pub use alerts::{derive_alerts, largest_category};
pub use budgets::compute_utilization;
pub use dashboard::{derive_dashboard, Dashboard};
pub use projection::{days_in_month, project_month_end};
