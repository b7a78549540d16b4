//! Output structures for long-term projections

use super::withdrawal::{AppliedTaxRates, WithdrawalPhase, WithdrawalSettlement};
use crate::rules::WithdrawalRules;
use serde::{Deserialize, Serialize};

/// Amounts broken down by account
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTotals {
    pub pension: f64,
    pub irp: f64,
    pub isa: f64,
    pub total: f64,
}

impl AccountTotals {
    pub fn new(pension: f64, irp: f64, isa: f64) -> Self {
        Self {
            pension,
            irp,
            isa,
            total: pension + irp + isa,
        }
    }

    /// Scale every account by the same factor (e.g. years of contributions)
    pub fn times(&self, factor: f64) -> Self {
        Self::new(self.pension * factor, self.irp * factor, self.isa * factor)
    }
}

/// Balances for the three accounts plus the reinvested tax benefit
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamValues {
    pub pension: f64,
    pub irp: f64,
    pub isa: f64,

    /// Yearly tax benefits reinvested outside the accounts
    pub tax_benefit: f64,

    pub total: f64,

    /// `total` in today's purchasing power
    pub total_real: f64,
}

impl StreamValues {
    pub fn new(pension: f64, irp: f64, isa: f64, tax_benefit: f64, discount_factor: f64) -> Self {
        let total = pension + irp + isa + tax_benefit;
        Self {
            pension,
            irp,
            isa,
            tax_benefit,
            total,
            total_real: total / discount_factor,
        }
    }

    pub(crate) fn from_settlement(settlement: &WithdrawalSettlement, discount_factor: f64) -> Self {
        Self {
            pension: settlement.pension,
            irp: settlement.irp,
            isa: settlement.isa,
            tax_benefit: settlement.tax_benefit,
            total: settlement.total,
            total_real: settlement.total / discount_factor,
        }
    }
}

/// Complete long-term projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTermProjection {
    pub tax_deduction_rate: f64,

    /// retirement_age - age
    pub years_to_retirement: i64,

    /// Years deposits compound: min(years_to_retirement, contribution_years)
    pub accumulation_years: u32,

    /// Inflation compounding over years_to_retirement
    pub discount_factor: f64,

    /// Deposits over all contribution years
    pub total_contribution: AccountTotals,

    /// Tax benefits over all contribution years
    pub total_tax_benefit: AccountTotals,

    /// Balances at retirement
    pub future_value: StreamValues,

    /// Amounts received after withdrawal taxes
    pub after_tax_withdrawal: StreamValues,

    /// Terminal phase reached at retirement
    pub withdrawal_phase: WithdrawalPhase,

    /// Tax rates withheld from each stream
    pub withdrawal_tax_rates: AppliedTaxRates,

    /// Combined yearly annuity payment (annuity only)
    pub total_annual_withdrawal: Option<f64>,

    pub monthly_income: f64,
    pub monthly_income_real: f64,
}

/// Headline figures derived from a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Share of the pre-tax balance actually received; None for an empty balance
    pub after_tax_ratio: Option<f64>,

    /// Tax paid on withdrawal
    pub withdrawal_tax: f64,

    /// Rough saving from taking an annuity instead of a lumpsum (annuity only)
    pub annuity_tax_saving_estimate: Option<f64>,

    pub tax_benefit_growth: TaxBenefitGrowth,
}

/// How the reinvested tax benefit grows by retirement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBenefitGrowth {
    /// Sum of yearly benefits
    pub accumulated: f64,

    /// Value of those benefits at retirement
    pub future_value: f64,

    pub years: i64,
}

impl LongTermProjection {
    /// Get summary figures
    pub fn summary(&self, rules: &WithdrawalRules) -> ProjectionSummary {
        let after_tax_ratio = if self.future_value.total != 0.0 {
            Some(self.after_tax_withdrawal.total / self.future_value.total)
        } else {
            None
        };

        let annuity_tax_saving_estimate = match self.withdrawal_phase {
            WithdrawalPhase::AnnuityWithdrawal => {
                Some(self.future_value.total * rules.annuity_saving_estimate_rate)
            }
            WithdrawalPhase::LumpsumWithdrawal | WithdrawalPhase::Accumulating => None,
        };

        ProjectionSummary {
            after_tax_ratio,
            withdrawal_tax: self.future_value.total - self.after_tax_withdrawal.total,
            annuity_tax_saving_estimate,
            tax_benefit_growth: TaxBenefitGrowth {
                accumulated: self.total_tax_benefit.total,
                future_value: self.future_value.tax_benefit,
                years: self.years_to_retirement,
            },
        }
    }
}
