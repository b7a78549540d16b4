//! Yearly benefit and long-term projection engine

use super::contribution::ContributionBenefits;
use super::future_value::{compute_future_value, inflation_discount_factor};
use super::results::{AccountTotals, LongTermProjection, StreamValues};
use super::withdrawal::WithdrawalPhase;
use super::yearly::{self, YearlyBenefit};
use crate::error::InvalidInputError;
use crate::inputs::PlanInputs;
use crate::rules::TaxRules;

/// Main calculation engine
///
/// Holds only the tax rules; every call is a pure function of its inputs.
#[derive(Debug, Clone, Default)]
pub struct BenefitEngine {
    rules: TaxRules,
}

impl BenefitEngine {
    /// Create a new engine with the given rules
    pub fn new(rules: TaxRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Current-year tax benefit. Inputs are not validated.
    pub fn yearly_benefit(&self, inputs: &PlanInputs) -> YearlyBenefit {
        yearly::yearly_benefit(inputs, &self.rules)
    }

    /// Long-term projection. Inputs are not validated; out-of-domain values
    /// surface as NaN or infinite fields.
    pub fn long_term_projection(&self, inputs: &PlanInputs) -> LongTermProjection {
        // Same per-year rules as the yearly calculator
        let benefits = ContributionBenefits::evaluate(inputs, &self.rules);
        let contribution_years = f64::from(inputs.contribution_years);

        let total_contribution =
            AccountTotals::new(inputs.pension_saving, inputs.irp_deposit, inputs.isa_deposit)
                .times(contribution_years);
        let total_tax_benefit = AccountTotals::new(
            benefits.pension_benefit,
            benefits.irp_benefit,
            benefits.isa_benefit,
        )
        .times(contribution_years);

        // Growth stops at retirement or when deposits stop, whichever is first
        let years_to_retirement = inputs.years_to_retirement();
        let accumulation_years = inputs.accumulation_years();

        let general_rate = inputs.general_return_rate / 100.0;
        let isa_rate = inputs.isa_return_rate / 100.0;
        let reinvest_rate = inputs.reinvest_rate / 100.0;

        let pension_fv =
            compute_future_value(0.0, inputs.pension_saving, general_rate, accumulation_years);
        let irp_fv =
            compute_future_value(0.0, inputs.irp_deposit, general_rate, accumulation_years);
        let isa_fv = compute_future_value(0.0, inputs.isa_deposit, isa_rate, accumulation_years);
        let tax_benefit_fv =
            compute_future_value(0.0, benefits.total(), reinvest_rate, accumulation_years);

        let discount_factor = inflation_discount_factor(inputs.inflation_rate, years_to_retirement);
        let future_value =
            StreamValues::new(pension_fv, irp_fv, isa_fv, tax_benefit_fv, discount_factor);

        let phase = WithdrawalPhase::Accumulating.retire(inputs.withdrawal_type);
        let settlement =
            phase.settle(&future_value, inputs.withdrawal_period, &self.rules.withdrawal);
        let after_tax_withdrawal = StreamValues::from_settlement(&settlement, discount_factor);

        let monthly_income_real = match phase {
            WithdrawalPhase::AnnuityWithdrawal => {
                after_tax_withdrawal.total_real / f64::from(inputs.withdrawal_period) / 12.0
            }
            WithdrawalPhase::LumpsumWithdrawal | WithdrawalPhase::Accumulating => 0.0,
        };

        LongTermProjection {
            tax_deduction_rate: benefits.tax_deduction_rate,
            years_to_retirement,
            accumulation_years,
            discount_factor,
            total_contribution,
            total_tax_benefit,
            future_value,
            after_tax_withdrawal,
            withdrawal_phase: phase,
            withdrawal_tax_rates: settlement.rates,
            total_annual_withdrawal: settlement.total_annual_withdrawal,
            monthly_income: settlement.monthly_income,
            monthly_income_real,
        }
    }

    /// Validate, then compute the yearly benefit
    pub fn try_yearly_benefit(
        &self,
        inputs: &PlanInputs,
    ) -> Result<YearlyBenefit, InvalidInputError> {
        self.check(inputs, inputs.validate_yearly())?;
        Ok(self.yearly_benefit(inputs))
    }

    /// Validate, then compute the long-term projection
    pub fn try_long_term_projection(
        &self,
        inputs: &PlanInputs,
    ) -> Result<LongTermProjection, InvalidInputError> {
        self.check(inputs, inputs.validate())?;
        Ok(self.long_term_projection(inputs))
    }

    fn check(
        &self,
        inputs: &PlanInputs,
        validation: Result<(), InvalidInputError>,
    ) -> Result<(), InvalidInputError> {
        if let Err(err) = validation {
            log::warn!("rejected plan inputs: {}", err);
            return Err(err);
        }

        let pension_amount = self.rules.deduction.pension_amount(inputs.pension_saving);
        if self.rules.deduction.irp_limit(pension_amount) < 0.0 {
            log::warn!(
                "pension amount {} exceeds the combined limit {}; IRP credit will be negative",
                pension_amount,
                self.rules.deduction.combined_limit
            );
        }
        Ok(())
    }
}

/// Current-year tax benefit under the default rules
pub fn compute_yearly_benefit(inputs: &PlanInputs) -> YearlyBenefit {
    BenefitEngine::default().yearly_benefit(inputs)
}

/// Long-term projection under the default rules
pub fn compute_long_term_projection(inputs: &PlanInputs) -> LongTermProjection {
    BenefitEngine::default().long_term_projection(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{IsaType, WithdrawalType};
    use approx::assert_relative_eq;

    fn engine() -> BenefitEngine {
        BenefitEngine::new(TaxRules::default())
    }

    #[test]
    fn test_default_plan_projection() {
        let inputs = PlanInputs::default();
        let result = engine().long_term_projection(&inputs);

        assert_eq!(result.years_to_retirement, 20);
        assert_eq!(result.accumulation_years, 20);
        assert_eq!(result.total_contribution.total, 38_000.0);
        assert_relative_eq!(result.total_tax_benefit.total, 156.2 * 20.0, max_relative = 1e-12);

        let growth = (1.05_f64.powi(20) - 1.0) / 0.05;
        assert_relative_eq!(result.future_value.pension, 600.0 * growth, max_relative = 1e-12);
        assert_relative_eq!(result.future_value.irp, 300.0 * growth, max_relative = 1e-12);
        assert_relative_eq!(result.future_value.isa, 1000.0 * growth, max_relative = 1e-12);

        let reinvest_growth = (1.04_f64.powi(20) - 1.0) / 0.04;
        assert_relative_eq!(
            result.future_value.tax_benefit,
            156.2 * reinvest_growth,
            max_relative = 1e-12
        );

        let fv = &result.future_value;
        let stream_sum = fv.pension + fv.irp + fv.isa + fv.tax_benefit;
        assert_relative_eq!(fv.total, stream_sum, max_relative = 1e-12);
        assert_relative_eq!(fv.total_real, fv.total / 1.02_f64.powi(20), max_relative = 1e-12);

        // ~2250/year combined, above the 1200 bracket
        assert_eq!(result.withdrawal_phase, WithdrawalPhase::AnnuityWithdrawal);
        assert_eq!(result.withdrawal_tax_rates.pension, 0.055);
        assert!(result.total_annual_withdrawal.unwrap() > 1200.0);

        let after = &result.after_tax_withdrawal;
        assert_relative_eq!(after.pension, fv.pension * 0.945, max_relative = 1e-12);
        assert_relative_eq!(after.irp, fv.irp * 0.945, max_relative = 1e-12);
        assert_eq!(after.isa, fv.isa);
        assert_relative_eq!(after.tax_benefit, fv.tax_benefit * 0.846, max_relative = 1e-12);
        assert_relative_eq!(result.monthly_income, after.total / 30.0 / 12.0, max_relative = 1e-12);
        assert_relative_eq!(
            result.monthly_income_real,
            after.total_real / 30.0 / 12.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_lumpsum_projection() {
        let inputs = PlanInputs {
            withdrawal_type: WithdrawalType::Lumpsum,
            ..Default::default()
        };
        let result = engine().long_term_projection(&inputs);
        let fv = &result.future_value;
        let after = &result.after_tax_withdrawal;

        assert_eq!(result.withdrawal_phase, WithdrawalPhase::LumpsumWithdrawal);
        assert_relative_eq!(after.pension, fv.pension * 0.835, max_relative = 1e-12);
        assert_relative_eq!(after.irp, fv.irp * 0.80, max_relative = 1e-12);
        assert_eq!(after.isa, fv.isa);
        assert_relative_eq!(after.tax_benefit, fv.tax_benefit * 0.846, max_relative = 1e-12);
        assert_eq!(result.monthly_income, 0.0);
        assert_eq!(result.monthly_income_real, 0.0);
        assert_eq!(result.total_annual_withdrawal, None);
    }

    #[test]
    fn test_annuity_bracket_boundary_end_to_end() {
        // Exact binary credit rate keeps every stream exact:
        // pension 600*20, irp 300*20, isa 675*20, benefit (150+75)*20 -> 1200/year over 30 years
        let mut rules = TaxRules::default();
        rules.deduction.preferential_rate = 0.25;
        let engine = BenefitEngine::new(rules);

        let inputs = PlanInputs {
            annual_income: 5000.0,
            pension_saving: 600.0,
            irp_deposit: 300.0,
            isa_deposit: 675.0,
            general_return_rate: 0.0,
            isa_return_rate: 0.0,
            reinvest_rate: 0.0,
            contribution_years: 20,
            withdrawal_period: 30,
            withdrawal_type: WithdrawalType::Annuity,
            ..Default::default()
        };
        let result = engine.long_term_projection(&inputs);

        assert_eq!(result.future_value.tax_benefit, 4500.0);
        assert_eq!(result.total_annual_withdrawal, Some(1200.0));
        assert_eq!(result.withdrawal_tax_rates.pension, 0.033);

        let above = engine.long_term_projection(&PlanInputs { isa_deposit: 676.5, ..inputs });
        assert_eq!(above.withdrawal_tax_rates.pension, 0.055);
    }

    #[test]
    fn test_zero_contribution_years() {
        let inputs = PlanInputs {
            contribution_years: 0,
            ..Default::default()
        };
        let result = engine().long_term_projection(&inputs);

        assert_eq!(result.accumulation_years, 0);
        assert_eq!(result.total_contribution.total, 0.0);
        assert_eq!(result.total_tax_benefit.total, 0.0);
        assert_eq!(result.future_value.tax_benefit, 0.0);
        assert_eq!(result.future_value.total, 0.0);
        assert_eq!(result.after_tax_withdrawal.total, 0.0);
        assert_eq!(result.monthly_income, 0.0);
    }

    #[test]
    fn test_contributions_past_retirement_stop_compounding() {
        let inputs = PlanInputs {
            age: 50,
            retirement_age: 55,
            contribution_years: 20,
            ..Default::default()
        };
        let result = engine().long_term_projection(&inputs);

        // Totals count every contribution year; growth only runs to retirement
        assert_eq!(result.total_contribution.pension, 12_000.0);
        assert_eq!(result.accumulation_years, 5);
        assert_relative_eq!(
            result.future_value.pension,
            compute_future_value(0.0, 600.0, 0.05, 5),
            max_relative = 1e-12
        );
        assert_relative_eq!(result.discount_factor, 1.02_f64.powi(5), max_relative = 1e-12);
    }

    #[test]
    fn test_lumpsum_and_annuity_diverge() {
        let annuity = engine().long_term_projection(&PlanInputs::default());
        let lumpsum = engine().long_term_projection(
            &PlanInputs::default().with_withdrawal_type(WithdrawalType::Lumpsum),
        );

        assert_eq!(annuity.future_value, lumpsum.future_value);
        assert_ne!(annuity.after_tax_withdrawal.total, lumpsum.after_tax_withdrawal.total);
        assert!(annuity.after_tax_withdrawal.total > lumpsum.after_tax_withdrawal.total);
    }

    #[test]
    fn test_projection_reuses_yearly_benefit() {
        let inputs = PlanInputs {
            annual_income: 9000.0,
            age: 44,
            pension_saving: 500.0,
            irp_deposit: 700.0,
            isa_type: IsaType::Special,
            ..Default::default()
        };
        let yearly = engine().yearly_benefit(&inputs);
        let projection = engine().long_term_projection(&inputs);
        let years = f64::from(inputs.contribution_years);

        assert_eq!(projection.tax_deduction_rate, yearly.tax_deduction_rate);
        assert_eq!(projection.total_tax_benefit.pension, yearly.pension * years);
        assert_eq!(projection.total_tax_benefit.irp, yearly.irp * years);
        assert_eq!(projection.total_tax_benefit.isa, yearly.isa * years);
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let inputs = PlanInputs {
            inflation_rate: 3.1,
            reinvest_rate: 2.7,
            ..Default::default()
        };
        assert_eq!(compute_yearly_benefit(&inputs), compute_yearly_benefit(&inputs));
        assert_eq!(compute_long_term_projection(&inputs), compute_long_term_projection(&inputs));
    }

    #[test]
    fn test_checked_entry_points_reject_bad_inputs() {
        let inputs = PlanInputs {
            retirement_age: 30,
            withdrawal_period: 0,
            ..Default::default()
        };

        let err = engine().try_long_term_projection(&inputs).unwrap_err();
        assert!(err.has_field("retirement_age"));
        assert!(err.has_field("withdrawal_period"));
        assert!(engine().try_long_term_projection(&PlanInputs::default()).is_ok());

        let negative = PlanInputs {
            irp_deposit: -1.0,
            ..Default::default()
        };
        assert!(engine().try_yearly_benefit(&negative).unwrap_err().has_field("irp_deposit"));
    }

    #[test]
    fn test_checked_yearly_ignores_long_term_fields() {
        let inputs = PlanInputs {
            retirement_age: 30,
            withdrawal_period: 0,
            inflation_rate: -150.0,
            ..Default::default()
        };

        let checked = engine().try_yearly_benefit(&inputs).unwrap();
        assert_eq!(checked, engine().yearly_benefit(&inputs));
        assert_relative_eq!(checked.total, 156.2, max_relative = 1e-12);

        let err = engine().try_long_term_projection(&inputs).unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_unchecked_zero_withdrawal_period_is_not_finite() {
        let inputs = PlanInputs {
            withdrawal_period: 0,
            ..Default::default()
        };
        let result = engine().long_term_projection(&inputs);
        assert!(!result.monthly_income.is_finite());
    }
}
