//! Tax benefit and long-term projection engine

mod future_value;
mod contribution;
mod yearly;
mod withdrawal;
mod results;
mod engine;

pub use future_value::{compute_future_value, inflation_discount_factor, real_value};
pub use contribution::ContributionBenefits;
pub use yearly::{Recommendation, YearlyBenefit};
pub use withdrawal::{AppliedTaxRates, WithdrawalPhase, WithdrawalSettlement};
pub use results::{
    AccountTotals, LongTermProjection, ProjectionSummary, StreamValues, TaxBenefitGrowth,
};
pub use engine::{BenefitEngine, compute_long_term_projection, compute_yearly_benefit};
