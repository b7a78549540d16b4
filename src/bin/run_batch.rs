//! Run projections for every scenario in a CSV file
//!
//! Outputs one row of headline figures per valid scenario

use anyhow::{Context, Result};
use clap::Parser;
use pension_planner::inputs::{load_scenarios, DEFAULT_SCENARIOS_PATH};
use pension_planner::scenario::{BatchTotals, PlanResult};
use pension_planner::{ScenarioRunner, TaxRules};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Project a CSV of plans in parallel")]
struct Args {
    /// Scenario CSV, one column per plan input
    #[arg(long, default_value = DEFAULT_SCENARIOS_PATH)]
    input: PathBuf,

    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Tax rules CSV overriding the built-in rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

/// Headline figures for one scenario
#[derive(Debug, Serialize)]
struct OutputRow {
    scenario_id: u32,
    withdrawal_type: &'static str,
    tax_deduction_rate: f64,
    yearly_total_benefit: f64,
    years_to_retirement: i64,
    total_contribution: f64,
    total_tax_benefit: f64,
    future_value_total: f64,
    future_value_real: f64,
    after_tax_total: f64,
    after_tax_real: f64,
    pension_tax_rate: f64,
    monthly_income: f64,
    monthly_income_real: f64,
}

impl OutputRow {
    fn from_result(result: &PlanResult, withdrawal_type: &'static str) -> Self {
        let p = &result.projection;
        Self {
            scenario_id: result.scenario_id,
            withdrawal_type,
            tax_deduction_rate: p.tax_deduction_rate,
            yearly_total_benefit: result.yearly.total,
            years_to_retirement: p.years_to_retirement,
            total_contribution: p.total_contribution.total,
            total_tax_benefit: p.total_tax_benefit.total,
            future_value_total: p.future_value.total,
            future_value_real: p.future_value.total_real,
            after_tax_total: p.after_tax_withdrawal.total,
            after_tax_real: p.after_tax_withdrawal.total_real,
            pension_tax_rate: p.withdrawal_tax_rates.pension,
            monthly_income: p.monthly_income,
            monthly_income_real: p.monthly_income_real,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let runner = match &args.rules {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("loading tax rules from {}", path.display()))?,
        None => ScenarioRunner::with_rules(TaxRules::default()),
    };

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("loading scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    println!("Running projections...");
    let proj_start = Instant::now();
    let results = runner.run_batch(&scenarios);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut written = 0usize;
    let mut rejected = 0usize;
    for (scenario, result) in scenarios.iter().zip(&results) {
        match result {
            Ok(result) => {
                writer.serialize(OutputRow::from_result(
                    result,
                    scenario.inputs.withdrawal_type.as_str(),
                ))?;
                written += 1;
            }
            Err(err) => {
                log::error!("scenario {} skipped: {}", scenario.scenario_id, err);
                rejected += 1;
            }
        }
    }
    writer.flush()?;

    println!("\nWrote {} rows to {}", written, args.output.display());
    if rejected > 0 {
        println!("Skipped {} invalid scenarios", rejected);
    }

    // Totals across the block
    let totals = BatchTotals::from_results(results.iter().filter_map(|r| r.as_ref().ok()));
    if totals.scenarios > 0 {
        println!("\nSummary:");
        println!("  Scenarios: {}", totals.scenarios);
        println!("  Total balance at retirement: {:.2}", totals.future_value);
        println!("  Total after tax: {:.2}", totals.after_tax);
        match totals.after_tax_ratio() {
            Some(ratio) => println!("  Average after-tax ratio: {:.4}", ratio),
            None => println!("  Average after-tax ratio: n/a (no balance accumulated)"),
        }
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
