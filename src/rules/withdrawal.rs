//! Taxes applied when accumulated balances are withdrawn at retirement

use serde::{Deserialize, Serialize};

/// Simplified withdrawal tax schedule
///
/// Lumpsum withdrawals pay flat rates per account. Annuity withdrawals of
/// pension savings and IRP pay a pension income tax whose bracket depends on
/// the combined annual withdrawal across all streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalRules {
    /// Other-income tax on a lumpsum pension savings withdrawal
    pub lumpsum_pension_tax_rate: f64,

    /// Approximate retirement income tax on a lumpsum IRP withdrawal
    pub lumpsum_irp_tax_rate: f64,

    /// Financial income tax on the reinvested tax benefit (both modes)
    pub financial_income_tax_rate: f64,

    /// Combined annual withdrawal at or below which the low rate applies
    pub annuity_bracket_threshold: f64,

    pub annuity_low_rate: f64,
    pub annuity_high_rate: f64,

    /// Share of the pre-tax balance quoted as the rough saving from taking an annuity
    pub annuity_saving_estimate_rate: f64,
}

impl WithdrawalRules {
    /// Pension income tax rate for a combined annual withdrawal
    pub fn annuity_tax_rate(&self, total_annual_withdrawal: f64) -> f64 {
        if total_annual_withdrawal <= self.annuity_bracket_threshold {
            self.annuity_low_rate
        } else {
            self.annuity_high_rate
        }
    }
}

impl Default for WithdrawalRules {
    fn default() -> Self {
        Self {
            lumpsum_pension_tax_rate: 0.165,
            lumpsum_irp_tax_rate: 0.20,
            financial_income_tax_rate: 0.154,
            annuity_bracket_threshold: 1200.0,
            annuity_low_rate: 0.033,
            annuity_high_rate: 0.055,
            annuity_saving_estimate_rate: 0.10,
        }
    }
}
