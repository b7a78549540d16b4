//! Scenario runner for batches of plans
//!
//! Holds one rule set and evaluates many independent plans against it.
//! Plans share no state, so batches run in parallel.

use crate::inputs::{PlanInputs, Scenario, WithdrawalType};
use crate::projection::{BenefitEngine, LongTermProjection, YearlyBenefit};
use crate::error::{InvalidInputError, Result};
use crate::rules::TaxRules;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// Yearly and long-term results for one plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub scenario_id: u32,
    pub yearly: YearlyBenefit,
    pub projection: LongTermProjection,
}

/// Same plan projected under both withdrawal modes
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalComparison {
    pub annuity: LongTermProjection,
    pub lumpsum: LongTermProjection,

    /// annuity after-tax total minus lumpsum after-tax total
    pub after_tax_difference: f64,
}

/// Balances summed over a batch of results
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BatchTotals {
    pub scenarios: usize,
    pub future_value: f64,
    pub after_tax: f64,
}

impl BatchTotals {
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a PlanResult>,
    {
        results.into_iter().fold(Self::default(), |acc, r| Self {
            scenarios: acc.scenarios + 1,
            future_value: acc.future_value + r.projection.future_value.total,
            after_tax: acc.after_tax + r.projection.after_tax_withdrawal.total,
        })
    }

    /// Share of the combined balance received after tax; None when nothing accumulated
    pub fn after_tax_ratio(&self) -> Option<f64> {
        if self.future_value != 0.0 {
            Some(self.after_tax / self.future_value)
        } else {
            None
        }
    }
}

/// Pre-loaded runner for batch evaluation
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
/// let results = runner.run_batch(&load_default_scenarios()?);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: BenefitEngine,
}

impl ScenarioRunner {
    /// Create runner with the default in-memory rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner by loading rules from data/tax_rules.csv
    pub fn from_csv() -> Result<Self> {
        Ok(Self::with_rules(TaxRules::from_csv()?))
    }

    /// Create runner from a specific rules file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_rules(TaxRules::from_csv_path(path)?))
    }

    pub fn with_rules(rules: TaxRules) -> Self {
        Self {
            engine: BenefitEngine::new(rules),
        }
    }

    pub fn engine(&self) -> &BenefitEngine {
        &self.engine
    }

    pub fn rules(&self) -> &TaxRules {
        self.engine.rules()
    }

    /// Validate and evaluate a single plan
    pub fn run(
        &self,
        scenario_id: u32,
        inputs: &PlanInputs,
    ) -> std::result::Result<PlanResult, InvalidInputError> {
        let projection = self.engine.try_long_term_projection(inputs)?;
        Ok(PlanResult {
            scenario_id,
            yearly: self.engine.yearly_benefit(inputs),
            projection,
        })
    }

    /// Evaluate many scenarios in parallel, preserving input order
    pub fn run_batch(
        &self,
        scenarios: &[Scenario],
    ) -> Vec<std::result::Result<PlanResult, InvalidInputError>> {
        log::debug!("running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|s| self.run(s.scenario_id, &s.inputs))
            .collect()
    }

    /// Project the same plan as an annuity and as a lumpsum
    pub fn compare_withdrawal_types(
        &self,
        inputs: &PlanInputs,
    ) -> std::result::Result<WithdrawalComparison, InvalidInputError> {
        let annuity = self
            .engine
            .try_long_term_projection(&inputs.with_withdrawal_type(WithdrawalType::Annuity))?;
        let lumpsum = self
            .engine
            .try_long_term_projection(&inputs.with_withdrawal_type(WithdrawalType::Lumpsum))?;

        let after_tax_difference =
            annuity.after_tax_withdrawal.total - lumpsum.after_tax_withdrawal.total;
        Ok(WithdrawalComparison {
            after_tax_difference,
            annuity,
            lumpsum,
        })
    }
}
