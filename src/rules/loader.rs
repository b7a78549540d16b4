//! CSV-based tax rule loader
//!
//! Reads `parameter,value` rows. Blank parameter names and rows starting with
//! `#` are skipped.

use crate::error::{CalculatorError, Result};
use std::fs::File;
use std::path::Path;

/// Default path to the tax rules file
pub const DEFAULT_RULES_PATH: &str = "data/tax_rules.csv";

/// Load raw parameter overrides in file order
pub fn load_rule_overrides(path: &Path) -> Result<Vec<(String, f64)>> {
    let file = File::open(path).map_err(|source| CalculatorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_rule_overrides_from_reader(file)
}

/// Load raw parameter overrides from any reader
pub fn load_rule_overrides_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, f64)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut overrides = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let parameter = record.get(0).unwrap_or_default();
        if parameter.is_empty() {
            continue;
        }
        let raw = record.get(1).unwrap_or_default();
        let value: f64 = raw.parse().map_err(|_| CalculatorError::InvalidParameter {
            parameter: parameter.to_string(),
            value: raw.to_string(),
        })?;
        overrides.push((parameter.to_string(), value));
    }

    Ok(overrides)
}

/// Parse a 0/1 switch
pub(crate) fn flag(parameter: &str, value: f64) -> Result<bool> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(CalculatorError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parse a non-negative whole number (ages)
pub(crate) fn whole_number(parameter: &str, value: f64) -> Result<u32> {
    if value >= 0.0 && value.fract() == 0.0 && value <= u32::MAX as f64 {
        Ok(value as u32)
    } else {
        Err(CalculatorError::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_overrides_skips_comments() {
        let data = "parameter,value\n# limits\npension_limit, 700\ncombined_limit,1000\n";
        let overrides = load_rule_overrides_from_reader(data.as_bytes()).unwrap();

        assert_eq!(
            overrides,
            vec![
                ("pension_limit".to_string(), 700.0),
                ("combined_limit".to_string(), 1000.0),
            ]
        );
    }

    #[test]
    fn test_load_overrides_rejects_non_numeric() {
        let data = "parameter,value\npension_limit,lots\n";
        let err = load_rule_overrides_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidParameter { .. }));
    }

    #[test]
    fn test_flag_and_whole_number() {
        assert!(flag("clamp_irp_limit", 1.0).unwrap());
        assert!(!flag("clamp_irp_limit", 0.0).unwrap());
        assert!(flag("clamp_irp_limit", 0.5).is_err());

        assert_eq!(whole_number("senior_age", 50.0).unwrap(), 50);
        assert!(whole_number("senior_age", 49.5).is_err());
        assert!(whole_number("senior_age", -1.0).is_err());
    }
}
