//! Withdrawal phase at retirement and the taxes applied to each stream

use super::results::StreamValues;
use crate::inputs::WithdrawalType;
use crate::rules::WithdrawalRules;
use serde::{Deserialize, Serialize};

/// Lifecycle of the accumulated balance
///
/// `Accumulating` moves exactly once, at retirement, to one of the two
/// withdrawal phases. Both withdrawal phases are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WithdrawalPhase {
    /// Before retirement; contributions compound, nothing is withdrawn
    #[default]
    Accumulating,
    /// Whole balance taken at retirement, flat-taxed per account
    LumpsumWithdrawal,
    /// Balance spread over the withdrawal period, bracket-taxed
    AnnuityWithdrawal,
}

impl WithdrawalPhase {
    /// Transition at retirement; a terminal phase stays where it is
    pub fn retire(self, withdrawal_type: WithdrawalType) -> Self {
        match self {
            WithdrawalPhase::Accumulating => match withdrawal_type {
                WithdrawalType::Lumpsum => WithdrawalPhase::LumpsumWithdrawal,
                WithdrawalType::Annuity => WithdrawalPhase::AnnuityWithdrawal,
            },
            terminal => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, WithdrawalPhase::Accumulating)
    }

    /// Apply withdrawal taxes to the balances accumulated at retirement
    pub fn settle(
        &self,
        future_value: &StreamValues,
        withdrawal_period: u32,
        rules: &WithdrawalRules,
    ) -> WithdrawalSettlement {
        let period = f64::from(withdrawal_period);

        match self {
            WithdrawalPhase::Accumulating => WithdrawalSettlement {
                phase: *self,
                rates: AppliedTaxRates::default(),
                total_annual_withdrawal: None,
                pension: 0.0,
                irp: 0.0,
                isa: 0.0,
                tax_benefit: 0.0,
                total: 0.0,
                monthly_income: 0.0,
            },
            WithdrawalPhase::LumpsumWithdrawal => {
                let rates = AppliedTaxRates {
                    pension: rules.lumpsum_pension_tax_rate,
                    irp: rules.lumpsum_irp_tax_rate,
                    isa: 0.0,
                    tax_benefit: rules.financial_income_tax_rate,
                };
                WithdrawalSettlement::after_tax(*self, rates, None, future_value)
            }
            WithdrawalPhase::AnnuityWithdrawal => {
                let total_annual_withdrawal = future_value.pension / period
                    + future_value.irp / period
                    + future_value.isa / period
                    + future_value.tax_benefit / period;

                // Bracket follows the combined withdrawal, not each stream
                let pension_tax_rate = rules.annuity_tax_rate(total_annual_withdrawal);
                let rates = AppliedTaxRates {
                    pension: pension_tax_rate,
                    irp: pension_tax_rate,
                    isa: 0.0,
                    tax_benefit: rules.financial_income_tax_rate,
                };
                let mut settlement = WithdrawalSettlement::after_tax(
                    *self,
                    rates,
                    Some(total_annual_withdrawal),
                    future_value,
                );
                settlement.monthly_income = settlement.total / period / 12.0;
                settlement
            }
        }
    }
}

/// Tax rate withheld from each stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedTaxRates {
    pub pension: f64,
    pub irp: f64,
    pub isa: f64,
    pub tax_benefit: f64,
}

/// After-tax amounts received in a withdrawal phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawalSettlement {
    pub phase: WithdrawalPhase,
    pub rates: AppliedTaxRates,

    /// Combined yearly withdrawal that picked the annuity bracket
    pub total_annual_withdrawal: Option<f64>,

    pub pension: f64,
    pub irp: f64,
    pub isa: f64,
    pub tax_benefit: f64,
    pub total: f64,

    /// Zero unless the balance is paid as an annuity
    pub monthly_income: f64,
}

impl WithdrawalSettlement {
    fn after_tax(
        phase: WithdrawalPhase,
        rates: AppliedTaxRates,
        total_annual_withdrawal: Option<f64>,
        future_value: &StreamValues,
    ) -> Self {
        let pension = future_value.pension * (1.0 - rates.pension);
        let irp = future_value.irp * (1.0 - rates.irp);
        let isa = future_value.isa * (1.0 - rates.isa);
        let tax_benefit = future_value.tax_benefit * (1.0 - rates.tax_benefit);

        Self {
            phase,
            rates,
            total_annual_withdrawal,
            pension,
            irp,
            isa,
            tax_benefit,
            total: pension + irp + isa + tax_benefit,
            monthly_income: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn balances(pension: f64, irp: f64, isa: f64, tax_benefit: f64) -> StreamValues {
        StreamValues::new(pension, irp, isa, tax_benefit, 1.0)
    }

    #[test]
    fn test_transition_happens_once() {
        let phase = WithdrawalPhase::default();
        assert!(!phase.is_terminal());

        let lumpsum = phase.retire(WithdrawalType::Lumpsum);
        assert_eq!(lumpsum, WithdrawalPhase::LumpsumWithdrawal);
        assert!(lumpsum.is_terminal());

        // No switching once withdrawal has started
        assert_eq!(lumpsum.retire(WithdrawalType::Annuity), WithdrawalPhase::LumpsumWithdrawal);
        assert_eq!(
            WithdrawalPhase::Accumulating
                .retire(WithdrawalType::Annuity)
                .retire(WithdrawalType::Lumpsum),
            WithdrawalPhase::AnnuityWithdrawal
        );
    }

    #[test]
    fn test_lumpsum_flat_rates() {
        let fv = balances(1000.0, 1000.0, 1000.0, 1000.0);
        let settlement =
            WithdrawalPhase::LumpsumWithdrawal.settle(&fv, 30, &WithdrawalRules::default());

        assert_relative_eq!(settlement.pension, 835.0, max_relative = 1e-12);
        assert_relative_eq!(settlement.irp, 800.0, max_relative = 1e-12);
        assert_eq!(settlement.isa, 1000.0);
        assert_relative_eq!(settlement.tax_benefit, 846.0, max_relative = 1e-12);
        assert_relative_eq!(settlement.total, 3481.0, max_relative = 1e-12);
        assert_eq!(settlement.monthly_income, 0.0);
        assert_eq!(settlement.total_annual_withdrawal, None);
    }

    #[test]
    fn test_annuity_boundary_uses_low_rate() {
        // 400 + 200 + 450 + 150 = 1200 per year
        let fv = balances(12_000.0, 6_000.0, 13_500.0, 4_500.0);
        let settlement =
            WithdrawalPhase::AnnuityWithdrawal.settle(&fv, 30, &WithdrawalRules::default());

        assert_eq!(settlement.total_annual_withdrawal, Some(1200.0));
        assert_eq!(settlement.rates.pension, 0.033);
        assert_eq!(settlement.rates.irp, 0.033);
        assert_relative_eq!(settlement.pension, 12_000.0 * 0.967, max_relative = 1e-12);
        assert_eq!(settlement.isa, 13_500.0);
        assert_relative_eq!(
            settlement.monthly_income,
            settlement.total / 30.0 / 12.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_annuity_above_bracket_uses_high_rate() {
        let fv = balances(12_000.0, 6_000.0, 13_530.0, 4_500.0);
        let settlement =
            WithdrawalPhase::AnnuityWithdrawal.settle(&fv, 30, &WithdrawalRules::default());

        assert_eq!(settlement.rates.pension, 0.055);
        assert_relative_eq!(settlement.irp, 6_000.0 * 0.945, max_relative = 1e-12);
        assert_relative_eq!(settlement.tax_benefit, 4_500.0 * 0.846, max_relative = 1e-12);
    }

    #[test]
    fn test_accumulating_withdraws_nothing() {
        let fv = balances(1000.0, 1000.0, 1000.0, 1000.0);
        let settlement = WithdrawalPhase::Accumulating.settle(&fv, 30, &WithdrawalRules::default());
        assert_eq!(settlement.total, 0.0);
        assert_eq!(settlement.monthly_income, 0.0);
    }
}
