//! Tax rule parameters: deduction tiers, contribution limits, ISA ceilings and withdrawal taxes

mod deduction;
mod isa;
mod withdrawal;
pub mod loader;

pub use deduction::DeductionRules;
pub use isa::IsaRules;
pub use withdrawal::WithdrawalRules;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for all tax rule parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxRules {
    pub deduction: DeductionRules,
    pub isa: IsaRules,
    pub withdrawal: WithdrawalRules,
}

impl TaxRules {
    /// Load rules from the default location (data/tax_rules.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RULES_PATH))
    }

    /// Load rules from a `parameter,value` CSV file
    ///
    /// Parameters missing from the file keep their default value.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let overrides = loader::load_rule_overrides(path)?;
        let mut rules = Self::default();
        for (parameter, value) in overrides {
            rules.set(&parameter, value)?;
        }
        log::debug!("loaded tax rules from {}", path.display());
        Ok(rules)
    }

    /// Override a single parameter by its CSV name
    pub fn set(&mut self, parameter: &str, value: f64) -> Result<()> {
        let slot = match parameter {
            "low_income_threshold" => &mut self.deduction.low_income_threshold,
            "senior_age" => {
                self.deduction.senior_age = loader::whole_number(parameter, value)?;
                return Ok(());
            }
            "preferential_rate" => &mut self.deduction.preferential_rate,
            "standard_rate" => &mut self.deduction.standard_rate,
            "pension_limit" => &mut self.deduction.pension_limit,
            "combined_limit" => &mut self.deduction.combined_limit,
            "clamp_irp_limit" => {
                self.deduction.clamp_irp_limit = loader::flag(parameter, value)?;
                return Ok(());
            }
            "isa_normal_tax_free_limit" => &mut self.isa.normal_tax_free_limit,
            "isa_special_tax_free_limit" => &mut self.isa.special_tax_free_limit,
            "interest_income_tax_rate" => &mut self.isa.interest_income_tax_rate,
            "rollover_credit_rate" => &mut self.isa.rollover_credit_rate,
            "rollover_credit_cap" => &mut self.isa.rollover_credit_cap,
            "lumpsum_pension_tax_rate" => &mut self.withdrawal.lumpsum_pension_tax_rate,
            "lumpsum_irp_tax_rate" => &mut self.withdrawal.lumpsum_irp_tax_rate,
            "financial_income_tax_rate" => &mut self.withdrawal.financial_income_tax_rate,
            "annuity_bracket_threshold" => &mut self.withdrawal.annuity_bracket_threshold,
            "annuity_low_rate" => &mut self.withdrawal.annuity_low_rate,
            "annuity_high_rate" => &mut self.withdrawal.annuity_high_rate,
            "annuity_saving_estimate_rate" => &mut self.withdrawal.annuity_saving_estimate_rate,
            other => return Err(crate::error::CalculatorError::UnknownParameter(other.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalculatorError;

    #[test]
    fn test_set_overrides_single_parameter() {
        let mut rules = TaxRules::default();
        rules.set("pension_limit", 700.0).unwrap();
        rules.set("clamp_irp_limit", 1.0).unwrap();

        assert_eq!(rules.deduction.pension_limit, 700.0);
        assert!(rules.deduction.clamp_irp_limit);
        assert_eq!(rules.deduction.combined_limit, 900.0);
    }

    #[test]
    fn test_set_rejects_unknown_parameter() {
        let mut rules = TaxRules::default();
        let err = rules.set("pension_limitt", 700.0).unwrap_err();
        assert!(matches!(err, CalculatorError::UnknownParameter(p) if p == "pension_limitt"));
    }

    #[test]
    fn test_default_rules_file_matches_defaults() {
        let rules = TaxRules::from_csv().expect("Failed to load data/tax_rules.csv");
        assert_eq!(rules, TaxRules::default());
    }
}
