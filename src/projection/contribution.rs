//! Per-year creditable amounts and tax benefits, shared by both calculators

use crate::inputs::PlanInputs;
use crate::rules::TaxRules;
use serde::{Deserialize, Serialize};

/// One year's creditable contributions and the benefit each earns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionBenefits {
    pub tax_deduction_rate: f64,

    /// Pension savings contribution counted toward the credit
    pub pension_amount: f64,

    /// Remaining room under the combined limit (may be negative)
    pub irp_limit: f64,

    /// IRP contribution counted toward the credit
    pub irp_amount: f64,

    /// Expected ISA interest for the year
    pub isa_interest: f64,

    pub pension_benefit: f64,
    pub irp_benefit: f64,
    pub isa_benefit: f64,
}

impl ContributionBenefits {
    pub fn evaluate(inputs: &PlanInputs, rules: &TaxRules) -> Self {
        let deduction = &rules.deduction;
        let tax_deduction_rate = deduction.tax_deduction_rate(inputs.annual_income, inputs.age);

        let pension_amount = deduction.pension_amount(inputs.pension_saving);
        let pension_benefit = pension_amount * tax_deduction_rate;

        let irp_limit = deduction.irp_limit(pension_amount);
        let irp_amount = inputs.irp_deposit.min(irp_limit);
        let irp_benefit = irp_amount * tax_deduction_rate;

        let isa_interest = inputs.isa_deposit * (inputs.isa_return_rate / 100.0);
        let isa_benefit = rules.isa.tax_saving(isa_interest, inputs.isa_type);

        Self {
            tax_deduction_rate,
            pension_amount,
            irp_limit,
            irp_amount,
            isa_interest,
            pension_benefit,
            irp_benefit,
            isa_benefit,
        }
    }

    /// Total benefit for the year
    pub fn total(&self) -> f64 {
        self.pension_benefit + self.irp_benefit + self.isa_benefit
    }

    /// Pension savings above the combined limit pushed the IRP amount below zero
    pub fn irp_limit_exceeded(&self) -> bool {
        self.irp_limit < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_irp_limited_by_pension_amount() {
        let inputs = PlanInputs {
            pension_saving: 400.0,
            irp_deposit: 800.0,
            ..Default::default()
        };
        let benefits = ContributionBenefits::evaluate(&inputs, &TaxRules::default());

        assert_eq!(benefits.pension_amount, 400.0);
        assert_eq!(benefits.irp_limit, 500.0);
        assert_eq!(benefits.irp_amount, 500.0);
        assert_relative_eq!(benefits.irp_benefit, 500.0 * 0.165, max_relative = 1e-12);
        assert!(!benefits.irp_limit_exceeded());
    }

    #[test]
    fn test_negative_irp_limit_is_preserved() {
        let mut rules = TaxRules::default();
        rules.deduction.pension_limit = 1200.0;

        let inputs = PlanInputs {
            pension_saving: 1000.0,
            irp_deposit: 300.0,
            ..Default::default()
        };
        let benefits = ContributionBenefits::evaluate(&inputs, &rules);

        assert_eq!(benefits.irp_limit, -100.0);
        assert_eq!(benefits.irp_amount, -100.0);
        assert!(benefits.irp_benefit < 0.0);
        assert!(benefits.irp_limit_exceeded());

        rules.deduction.clamp_irp_limit = true;
        let clamped = ContributionBenefits::evaluate(&inputs, &rules);
        assert_eq!(clamped.irp_amount, 0.0);
        assert_eq!(clamped.irp_benefit, 0.0);
    }
}
