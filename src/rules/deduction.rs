//! Tax credit tiers and contribution limits for pension savings and IRP

use serde::{Deserialize, Serialize};

/// Deduction parameters shared by the pension savings and IRP accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionRules {
    /// Income at or below which the preferential rate applies
    pub low_income_threshold: f64,

    /// Age at or above which the preferential rate applies
    pub senior_age: u32,

    /// Credit rate for low income or senior savers (16.5% incl. local tax)
    pub preferential_rate: f64,

    /// Credit rate for everyone else (13.2% incl. local tax)
    pub standard_rate: f64,

    /// Annual creditable pension savings contribution
    pub pension_limit: f64,

    /// Annual creditable pension savings + IRP contribution
    pub combined_limit: f64,

    /// Floor the remaining IRP limit at zero.
    /// Off by default: a pension amount above the combined limit yields a
    /// negative IRP amount and a negative IRP credit.
    pub clamp_irp_limit: bool,
}

impl DeductionRules {
    /// Credit rate for a saver with the given income and age
    pub fn tax_deduction_rate(&self, annual_income: f64, age: u32) -> f64 {
        if annual_income <= self.low_income_threshold || age >= self.senior_age {
            self.preferential_rate
        } else {
            self.standard_rate
        }
    }

    /// Creditable portion of the pension savings contribution
    pub fn pension_amount(&self, pension_saving: f64) -> f64 {
        pension_saving.min(self.pension_limit)
    }

    /// Room left under the combined limit once pension savings are counted
    pub fn irp_limit(&self, pension_amount: f64) -> f64 {
        let limit = self.combined_limit - pension_amount;
        if self.clamp_irp_limit {
            limit.max(0.0)
        } else {
            limit
        }
    }
}

impl Default for DeductionRules {
    fn default() -> Self {
        Self {
            low_income_threshold: 5500.0,
            senior_age: 50,
            preferential_rate: 0.165,
            standard_rate: 0.132,
            pension_limit: 600.0,
            combined_limit: 900.0,
            clamp_irp_limit: false,
        }
    }
}
