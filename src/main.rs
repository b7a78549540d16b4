//! Pension Planner CLI
//!
//! Command-line interface for yearly tax benefits and long-term projections

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use pension_planner::report::{CompareReport, ProjectionReport, YearlyReport, NOTES};
use pension_planner::{IsaType, PlanInputs, ScenarioRunner, TaxRules, WithdrawalType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pension_planner",
    version,
    about = "Pension savings / IRP / ISA tax benefit calculator"
)]
struct Cli {
    /// Tax rules CSV (parameter,value) overriding the built-in rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Tax benefit for the current year
    Yearly(PlanArgs),
    /// Balances and after-tax withdrawal at retirement
    Projection(PlanArgs),
    /// Same plan taken as an annuity and as a lumpsum
    Compare(PlanArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliIsaType {
    Normal,
    Special,
}

impl From<CliIsaType> for IsaType {
    fn from(value: CliIsaType) -> Self {
        match value {
            CliIsaType::Normal => IsaType::Normal,
            CliIsaType::Special => IsaType::Special,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliWithdrawalType {
    Annuity,
    Lumpsum,
}

impl From<CliWithdrawalType> for WithdrawalType {
    fn from(value: CliWithdrawalType) -> Self {
        match value {
            CliWithdrawalType::Annuity => WithdrawalType::Annuity,
            CliWithdrawalType::Lumpsum => WithdrawalType::Lumpsum,
        }
    }
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long, default_value_t = 5000.0)]
    annual_income: f64,
    #[arg(long, default_value_t = 35)]
    age: u32,
    #[arg(long, default_value_t = 600.0)]
    pension_saving: f64,
    #[arg(long, default_value_t = 300.0)]
    irp_deposit: f64,
    #[arg(long, default_value_t = 1000.0)]
    isa_deposit: f64,
    #[arg(long, value_enum, default_value_t = CliIsaType::Normal)]
    isa_type: CliIsaType,
    /// Pension savings / IRP return (%)
    #[arg(long, default_value_t = 5.0)]
    general_return_rate: f64,
    /// ISA return (%)
    #[arg(long, default_value_t = 5.0)]
    isa_return_rate: f64,
    /// Inflation (%)
    #[arg(long, default_value_t = 2.0)]
    inflation_rate: f64,
    /// Return on reinvested tax benefits (%)
    #[arg(long, default_value_t = 4.0)]
    reinvest_rate: f64,
    #[arg(long, default_value_t = 20)]
    contribution_years: u32,
    #[arg(long, default_value_t = 55)]
    retirement_age: u32,
    /// Years an annuity is paid over
    #[arg(long, default_value_t = 30)]
    withdrawal_period: u32,
    #[arg(long, value_enum, default_value_t = CliWithdrawalType::Annuity)]
    withdrawal_type: CliWithdrawalType,
}

impl From<PlanArgs> for PlanInputs {
    fn from(args: PlanArgs) -> Self {
        PlanInputs {
            annual_income: args.annual_income,
            age: args.age,
            pension_saving: args.pension_saving,
            irp_deposit: args.irp_deposit,
            isa_deposit: args.isa_deposit,
            isa_type: args.isa_type.into(),
            general_return_rate: args.general_return_rate,
            isa_return_rate: args.isa_return_rate,
            inflation_rate: args.inflation_rate,
            reinvest_rate: args.reinvest_rate,
            contribution_years: args.contribution_years,
            retirement_age: args.retirement_age,
            withdrawal_period: args.withdrawal_period,
            withdrawal_type: args.withdrawal_type.into(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let runner = match &cli.rules {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("loading tax rules from {}", path.display()))?,
        None => ScenarioRunner::with_rules(TaxRules::default()),
    };

    match cli.command {
        Command::Yearly(args) => {
            let inputs = PlanInputs::from(args);
            let yearly = runner.engine().try_yearly_benefit(&inputs)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&yearly)?);
                return Ok(());
            }
            print!("{}", YearlyReport(&yearly));
        }
        Command::Projection(args) => {
            let inputs = PlanInputs::from(args);
            let projection = runner.engine().try_long_term_projection(&inputs)?;
            let summary = projection.summary(&runner.rules().withdrawal);
            if cli.json {
                let output = serde_json::json!({
                    "projection": projection,
                    "summary": summary,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }
            print!("{}", ProjectionReport::new(&inputs, &projection, &summary));
        }
        Command::Compare(args) => {
            let inputs = PlanInputs::from(args);
            let comparison = runner.compare_withdrawal_types(&inputs)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
                return Ok(());
            }
            print!("{}", CompareReport(&comparison));
        }
    }

    println!("\nGood to know:");
    for note in NOTES {
        println!("  * {}", note);
    }

    Ok(())
}
