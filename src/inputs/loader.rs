//! Load plan scenarios from CSV
//!
//! One row per scenario, one snake_case column per `PlanInputs` field, plus an
//! optional `scenario_id` column.

use super::{IsaType, PlanInputs, WithdrawalType};
use crate::error::{CalculatorError, Result};
use csv::Reader;
use std::fs::File;
use std::path::Path;

/// Default path to the sample scenario file
pub const DEFAULT_SCENARIOS_PATH: &str = "data/scenarios.csv";

/// Raw CSV row; enum columns are parsed separately for clearer errors
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    scenario_id: Option<u32>,
    annual_income: f64,
    age: u32,
    pension_saving: f64,
    irp_deposit: f64,
    isa_deposit: f64,
    isa_type: String,
    general_return_rate: f64,
    isa_return_rate: f64,
    inflation_rate: f64,
    reinvest_rate: f64,
    contribution_years: u32,
    retirement_age: u32,
    withdrawal_period: u32,
    withdrawal_type: String,
}

/// A plan tagged with the id it was loaded under
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub scenario_id: u32,
    pub inputs: PlanInputs,
}

impl CsvRow {
    fn into_scenario(self, row_number: u32) -> Result<Scenario> {
        let isa_type: IsaType = self
            .isa_type
            .parse()
            .map_err(|value| CalculatorError::UnknownVariant { field: "isa_type", value })?;

        let withdrawal_type: WithdrawalType = self
            .withdrawal_type
            .parse()
            .map_err(|value| CalculatorError::UnknownVariant { field: "withdrawal_type", value })?;

        Ok(Scenario {
            scenario_id: self.scenario_id.unwrap_or(row_number),
            inputs: PlanInputs {
                annual_income: self.annual_income,
                age: self.age,
                pension_saving: self.pension_saving,
                irp_deposit: self.irp_deposit,
                isa_deposit: self.isa_deposit,
                isa_type,
                general_return_rate: self.general_return_rate,
                isa_return_rate: self.isa_return_rate,
                inflation_rate: self.inflation_rate,
                reinvest_rate: self.reinvest_rate,
                contribution_years: self.contribution_years,
                retirement_age: self.retirement_age,
                withdrawal_period: self.withdrawal_period,
                withdrawal_type,
            },
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CalculatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scenarios = load_scenarios_from_reader(file)?;
    log::debug!("loaded {} scenarios from {}", scenarios.len(), path.display());
    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (index, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario(index as u32 + 1)?);
    }

    Ok(scenarios)
}

/// Load the bundled sample scenarios
pub fn load_default_scenarios() -> Result<Vec<Scenario>> {
    load_scenarios(DEFAULT_SCENARIOS_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "annual_income,age,pension_saving,irp_deposit,isa_deposit,isa_type,\
general_return_rate,isa_return_rate,inflation_rate,reinvest_rate,contribution_years,\
retirement_age,withdrawal_period,withdrawal_type\n";

    #[test]
    fn test_load_from_reader_numbers_rows() {
        let data = format!(
            "{HEADER}5000,35,600,300,1000,normal,5,5,2,4,20,55,30,annuity\n\
             8000,45,400,200,2000,special,6,4,2.5,3,10,60,20,lumpsum\n"
        );
        let scenarios = load_scenarios_from_reader(data.as_bytes()).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].scenario_id, 1);
        assert_eq!(scenarios[0].inputs, PlanInputs::default());
        assert_eq!(scenarios[1].scenario_id, 2);
        assert_eq!(scenarios[1].inputs.isa_type, IsaType::Special);
        assert_eq!(scenarios[1].inputs.withdrawal_type, WithdrawalType::Lumpsum);
    }

    #[test]
    fn test_unknown_withdrawal_type() {
        let data = format!("{HEADER}5000,35,600,300,1000,normal,5,5,2,4,20,55,30,monthly\n");
        let err = load_scenarios_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            CalculatorError::UnknownVariant { field: "withdrawal_type", ref value }
                if value == "monthly"
        ));
    }

    #[test]
    fn test_load_default_scenarios() {
        let scenarios = load_default_scenarios().expect("Failed to load scenarios");
        assert!(!scenarios.is_empty());
        assert!(scenarios.iter().all(|s| s.inputs.validate().is_ok()));
    }
}
