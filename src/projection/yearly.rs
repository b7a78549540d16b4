//! Current-year tax benefit and optimization suggestions

use super::contribution::ContributionBenefits;
use crate::inputs::PlanInputs;
use crate::rules::TaxRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Advisory suggestion attached to a yearly result
///
/// Benefit figures are pre-rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// Pension savings below the creditable limit
    RaisePensionSaving {
        current: f64,
        limit: f64,
        extra_benefit: i64,
    },
    /// IRP contributions below the remaining combined limit
    RaiseIrpDeposit { extra_benefit: i64 },
    /// ISA maturity money can be rolled into a pension account for an extra credit
    IsaRollover { credit_rate: f64, credit_cap: f64 },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::RaisePensionSaving { current, limit, extra_benefit } => write!(
                f,
                "Raising pension savings from {} to {} adds about {} in tax credit.",
                current, limit, extra_benefit
            ),
            Recommendation::RaiseIrpDeposit { extra_benefit } => write!(
                f,
                "Raising IRP contributions adds another {} in tax credit.",
                extra_benefit
            ),
            Recommendation::IsaRollover { credit_rate, credit_cap } => write!(
                f,
                "Moving ISA maturity money into a pension account earns an extra credit of \
                 {:.0}% of the transfer (up to {}).",
                credit_rate * 100.0,
                credit_cap
            ),
        }
    }
}

/// Tax benefit for a single contribution year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyBenefit {
    pub tax_deduction_rate: f64,

    /// Pension savings tax credit
    pub pension: f64,

    /// IRP tax credit
    pub irp: f64,

    /// Interest income tax saved inside the ISA
    pub isa: f64,

    /// pension + irp + isa
    pub total: f64,

    /// Expected ISA interest the saving is based on
    pub isa_expected_interest: f64,

    pub recommendations: Vec<Recommendation>,
}

impl YearlyBenefit {
    /// Recommendation messages in display order
    pub fn recommendation_messages(&self) -> Vec<String> {
        self.recommendations.iter().map(ToString::to_string).collect()
    }
}

pub(crate) fn yearly_benefit(inputs: &PlanInputs, rules: &TaxRules) -> YearlyBenefit {
    let benefits = ContributionBenefits::evaluate(inputs, rules);

    YearlyBenefit {
        tax_deduction_rate: benefits.tax_deduction_rate,
        pension: benefits.pension_benefit,
        irp: benefits.irp_benefit,
        isa: benefits.isa_benefit,
        total: benefits.total(),
        isa_expected_interest: benefits.isa_interest,
        recommendations: recommendations(&benefits, rules),
    }
}

fn recommendations(benefits: &ContributionBenefits, rules: &TaxRules) -> Vec<Recommendation> {
    let pension_limit = rules.deduction.pension_limit;
    let rate = benefits.tax_deduction_rate;
    let mut recommendations = Vec::new();

    if benefits.pension_amount < pension_limit {
        recommendations.push(Recommendation::RaisePensionSaving {
            current: benefits.pension_amount,
            limit: pension_limit,
            extra_benefit: ((pension_limit - benefits.pension_amount) * rate).round() as i64,
        });
    }

    if benefits.irp_amount < benefits.irp_limit {
        recommendations.push(Recommendation::RaiseIrpDeposit {
            extra_benefit: ((benefits.irp_limit - benefits.irp_amount) * rate).round() as i64,
        });
    }

    recommendations.push(Recommendation::IsaRollover {
        credit_rate: rules.isa.rollover_credit_rate,
        credit_cap: rules.isa.rollover_credit_cap,
    });

    recommendations
}
