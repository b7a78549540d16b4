//! Plan input record shared by the yearly and long-term calculators

use crate::error::{FieldViolation, InvalidInputError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ISA subtype, which sets the tax-free interest ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsaType {
    /// General ISA
    Normal,
    /// Low-income / farmer-fisher ISA with the higher ceiling
    Special,
}

impl IsaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IsaType::Normal => "normal",
            IsaType::Special => "special",
        }
    }
}

impl FromStr for IsaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(IsaType::Normal),
            "special" => Ok(IsaType::Special),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for IsaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the accumulated balance is taken at retirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalType {
    /// Spread evenly over the withdrawal period
    Annuity,
    /// Whole balance at once
    Lumpsum,
}

impl WithdrawalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalType::Annuity => "annuity",
            WithdrawalType::Lumpsum => "lumpsum",
        }
    }
}

impl FromStr for WithdrawalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "annuity" => Ok(WithdrawalType::Annuity),
            "lumpsum" => Ok(WithdrawalType::Lumpsum),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for WithdrawalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One saver's plan
///
/// Amounts are in a caller-chosen unit (10,000 KRW in the reference domain).
/// Rates are percentages: `5.0` means 5%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInputs {
    /// Gross annual income
    pub annual_income: f64,

    /// Current age
    pub age: u32,

    /// Annual pension savings contribution
    pub pension_saving: f64,

    /// Annual IRP contribution
    pub irp_deposit: f64,

    /// Annual ISA contribution
    pub isa_deposit: f64,

    pub isa_type: IsaType,

    /// Expected return on pension savings and IRP (%)
    pub general_return_rate: f64,

    /// Expected return inside the ISA (%)
    pub isa_return_rate: f64,

    /// Annual inflation (%)
    pub inflation_rate: f64,

    /// Return earned by reinvesting each year's tax benefit (%)
    pub reinvest_rate: f64,

    /// Number of years contributions are made
    pub contribution_years: u32,

    /// Age at which accumulation stops and withdrawal begins
    pub retirement_age: u32,

    /// Years an annuity withdrawal is spread over
    pub withdrawal_period: u32,

    pub withdrawal_type: WithdrawalType,
}

impl PlanInputs {
    /// Years between now and retirement; negative when retirement_age < age
    pub fn years_to_retirement(&self) -> i64 {
        i64::from(self.retirement_age) - i64::from(self.age)
    }

    /// Years over which deposits compound before retirement
    pub fn accumulation_years(&self) -> u32 {
        let horizon = self.years_to_retirement().min(i64::from(self.contribution_years));
        horizon.max(0) as u32
    }

    /// Same plan with a different withdrawal mode
    pub fn with_withdrawal_type(&self, withdrawal_type: WithdrawalType) -> Self {
        Self {
            withdrawal_type,
            ..self.clone()
        }
    }

    /// Check the fields the yearly calculation reads
    ///
    /// Horizon and withdrawal fields are ignored here.
    pub fn validate_yearly(&self) -> Result<(), InvalidInputError> {
        let mut violations = Vec::new();
        self.check_amounts(&mut violations);
        check_rate("isa_return_rate", self.isa_return_rate, &mut violations);
        into_result(violations)
    }

    /// Check every field against its domain and report all violations at once
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let mut violations = Vec::new();
        self.check_amounts(&mut violations);

        let rates = [
            ("general_return_rate", self.general_return_rate),
            ("isa_return_rate", self.isa_return_rate),
            ("inflation_rate", self.inflation_rate),
            ("reinvest_rate", self.reinvest_rate),
        ];
        for (field, value) in rates {
            check_rate(field, value, &mut violations);
        }

        if self.retirement_age < self.age {
            violations.push(FieldViolation {
                field: "retirement_age",
                constraint: ">= age",
                value: f64::from(self.retirement_age),
            });
        }

        if self.withdrawal_period == 0 {
            violations.push(FieldViolation {
                field: "withdrawal_period",
                constraint: "> 0",
                value: 0.0,
            });
        }

        into_result(violations)
    }

    fn check_amounts(&self, violations: &mut Vec<FieldViolation>) {
        let amounts = [
            ("annual_income", self.annual_income),
            ("pension_saving", self.pension_saving),
            ("irp_deposit", self.irp_deposit),
            ("isa_deposit", self.isa_deposit),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                violations.push(FieldViolation {
                    field,
                    constraint: "a finite amount >= 0",
                    value,
                });
            }
        }
    }
}

fn check_rate(field: &'static str, value: f64, violations: &mut Vec<FieldViolation>) {
    if !value.is_finite() || value <= -100.0 {
        violations.push(FieldViolation { field, constraint: "a finite rate > -100%", value });
    }
}

fn into_result(violations: Vec<FieldViolation>) -> Result<(), InvalidInputError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(InvalidInputError { violations })
    }
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            annual_income: 5000.0,
            age: 35,
            pension_saving: 600.0,
            irp_deposit: 300.0,
            isa_deposit: 1000.0,
            isa_type: IsaType::Normal,
            general_return_rate: 5.0,
            isa_return_rate: 5.0,
            inflation_rate: 2.0,
            reinvest_rate: 4.0,
            contribution_years: 20,
            retirement_age: 55,
            withdrawal_period: 30,
            withdrawal_type: WithdrawalType::Annuity,
        }
    }
}
