//! Pension Planner - tax benefit and retirement projection engine for
//! pension savings, IRP and ISA accounts
//!
//! This library provides:
//! - Current-year tax credit and ISA tax saving with recommendations
//! - Long-term projection of balances to retirement, nominal and real
//! - Lumpsum and annuity withdrawal taxation
//! - CSV-configurable tax rules and batch scenario evaluation

pub mod error;
pub mod inputs;
pub mod rules;
pub mod projection;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{CalculatorError, InvalidInputError};
pub use inputs::{IsaType, PlanInputs, WithdrawalType};
pub use rules::TaxRules;
pub use projection::{
    compute_future_value, compute_long_term_projection, compute_yearly_benefit, BenefitEngine,
    LongTermProjection, YearlyBenefit,
};
pub use scenario::ScenarioRunner;
