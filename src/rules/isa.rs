//! ISA tax-free interest ceilings and rollover credit

use crate::inputs::IsaType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsaRules {
    /// Tax-free interest ceiling for a normal ISA
    pub normal_tax_free_limit: f64,

    /// Tax-free interest ceiling for low-income / farmer-fisher ISAs
    pub special_tax_free_limit: f64,

    /// Interest income tax the ISA shelters (15.4%)
    pub interest_income_tax_rate: f64,

    /// Extra credit on ISA maturity money moved to a pension account
    pub rollover_credit_rate: f64,

    /// Cap on the rollover credit base
    pub rollover_credit_cap: f64,
}

impl IsaRules {
    pub fn tax_free_limit(&self, isa_type: IsaType) -> f64 {
        match isa_type {
            IsaType::Normal => self.normal_tax_free_limit,
            IsaType::Special => self.special_tax_free_limit,
        }
    }

    /// Tax saved on one year of ISA interest
    pub fn tax_saving(&self, isa_interest: f64, isa_type: IsaType) -> f64 {
        isa_interest.min(self.tax_free_limit(isa_type)) * self.interest_income_tax_rate
    }
}

impl Default for IsaRules {
    fn default() -> Self {
        Self {
            normal_tax_free_limit: 200.0,
            special_tax_free_limit: 400.0,
            interest_income_tax_rate: 0.154,
            rollover_credit_rate: 0.10,
            rollover_credit_cap: 300.0,
        }
    }
}
