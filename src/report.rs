//! Text rendering of engine results
//!
//! The engine returns full precision; everything here rounds to whole units.

use crate::inputs::PlanInputs;
use crate::projection::{LongTermProjection, ProjectionSummary, WithdrawalPhase, YearlyBenefit};
use crate::scenario::WithdrawalComparison;
use std::fmt;

/// Fixed guidance printed after results
pub const NOTES: [&str; 10] = [
    "Pension savings contributions earn a tax credit on up to 600 per year.",
    "Pension savings and IRP together earn a tax credit on up to 900 per year.",
    "The credit rate is 16.5% for income up to 5,500 or age 50 and over, 13.2% otherwise.",
    "ISA interest is tax-free up to 200 (normal) or 400 (low-income / farmer-fisher).",
    "Annuity withdrawals are taxed at 3.3% up to 1,200 per year and 5.5% above (simplified).",
    "Lumpsum withdrawals are taxed at 16.5% (pension savings) and about 20% (IRP).",
    "ISA balances are untaxed whichever way they are withdrawn.",
    "Reinvested tax benefits are treated as ordinary savings and taxed at 15.4%.",
    "Inflation erodes future purchasing power; compare nominal and real amounts.",
    "These figures are estimates for guidance only, not tax advice.",
];

/// Round to a whole unit and group thousands, e.g. `12,345`
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Decimal rate as a percentage, e.g. `0.165` -> `16.5%`
pub fn format_rate(rate: f64) -> String {
    let pct = rate * 100.0;
    let text = format!("{:.2}", pct);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}%", text)
}

/// Current-year benefit table with recommendations
pub struct YearlyReport<'a>(pub &'a YearlyBenefit);

impl fmt::Display for YearlyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let benefit = self.0;
        writeln!(
            f,
            "Current-year tax benefit (credit rate {})",
            format_rate(benefit.tax_deduction_rate)
        )?;
        writeln!(f, "{}", "-".repeat(48))?;

        let rows = [
            ("Pension savings credit", benefit.pension),
            ("IRP credit", benefit.irp),
            ("ISA interest tax saved", benefit.isa),
            ("Total", benefit.total),
        ];
        for (label, amount) in rows {
            writeln!(f, "  {:<32} {:>12}", label, format_amount(amount))?;
        }
        writeln!(
            f,
            "  (ISA expected interest {} x 15.4%)",
            format_amount(benefit.isa_expected_interest)
        )?;

        writeln!(f, "\nRecommendations:")?;
        for message in benefit.recommendation_messages() {
            writeln!(f, "  - {}", message)?;
        }
        Ok(())
    }
}

/// Balances at retirement, withdrawal taxes and headline figures
pub struct ProjectionReport<'a> {
    inputs: &'a PlanInputs,
    projection: &'a LongTermProjection,
    summary: &'a ProjectionSummary,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(
        inputs: &'a PlanInputs,
        projection: &'a LongTermProjection,
        summary: &'a ProjectionSummary,
    ) -> Self {
        Self { inputs, projection, summary }
    }
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (inputs, projection, summary) = (self.inputs, self.projection, self.summary);
        let fv = &projection.future_value;
        let after = &projection.after_tax_withdrawal;

        writeln!(
            f,
            "Projection to age {} ({} years, {} of compounding)",
            inputs.retirement_age, projection.years_to_retirement, projection.accumulation_years
        )?;
        writeln!(f, "{}", "-".repeat(64))?;
        writeln!(
            f,
            "  {:<20} {:>12} {:>12} {:>14}",
            "", "Contributed", "Balance", "After tax"
        )?;

        let contributed = &projection.total_contribution;
        let rows = [
            ("Pension savings", contributed.pension, fv.pension, after.pension),
            ("IRP", contributed.irp, fv.irp, after.irp),
            ("ISA", contributed.isa, fv.isa, after.isa),
            (
                "Reinvested benefit",
                projection.total_tax_benefit.total,
                fv.tax_benefit,
                after.tax_benefit,
            ),
            ("Total", contributed.total, fv.total, after.total),
        ];
        for (label, paid_in, balance, after_tax) in rows {
            writeln!(
                f,
                "  {:<20} {:>12} {:>12} {:>14}",
                label,
                format_amount(paid_in),
                format_amount(balance),
                format_amount(after_tax)
            )?;
        }
        writeln!(
            f,
            "  {:<20} {:>12} {:>12} {:>14}",
            "In today's money",
            "",
            format_amount(fv.total_real),
            format_amount(after.total_real)
        )?;

        writeln!(f)?;
        match projection.withdrawal_phase {
            WithdrawalPhase::AnnuityWithdrawal => {
                writeln!(
                    f,
                    "Annuity over {} years at pension income tax {}",
                    inputs.withdrawal_period,
                    format_rate(projection.withdrawal_tax_rates.pension)
                )?;
                writeln!(
                    f,
                    "  Monthly income: {} (today's money: {})",
                    format_amount(projection.monthly_income),
                    format_amount(projection.monthly_income_real)
                )?;
                if let Some(saving) = summary.annuity_tax_saving_estimate {
                    writeln!(
                        f,
                        "  Estimated tax saved by taking an annuity: about {}",
                        format_amount(saving)
                    )?;
                }
            }
            WithdrawalPhase::LumpsumWithdrawal => {
                writeln!(f, "Lumpsum at retirement")?;
                writeln!(
                    f,
                    "  Tax paid on withdrawal: about {}",
                    format_amount(summary.withdrawal_tax)
                )?;
            }
            WithdrawalPhase::Accumulating => {}
        }

        if let Some(ratio) = summary.after_tax_ratio {
            writeln!(f, "  Received {}% of the pre-tax balance", (ratio * 100.0).round())?;
        }

        let growth = &summary.tax_benefit_growth;
        writeln!(
            f,
            "  Tax benefits of {} grow to {} over {} years (reinvested at {}%)",
            format_amount(growth.accumulated),
            format_amount(growth.future_value),
            growth.years,
            inputs.reinvest_rate
        )
    }
}

/// Annuity and lumpsum side by side
pub struct CompareReport<'a>(pub &'a WithdrawalComparison);

impl fmt::Display for CompareReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (annuity, lumpsum) = (&self.0.annuity, &self.0.lumpsum);

        writeln!(f, "{:<24} {:>14} {:>14}", "", "Annuity", "Lumpsum")?;
        writeln!(f, "{}", "-".repeat(54))?;
        let rows = [
            ("Balance at retirement", annuity.future_value.total, lumpsum.future_value.total),
            ("After tax", annuity.after_tax_withdrawal.total, lumpsum.after_tax_withdrawal.total),
            (
                "After tax (today)",
                annuity.after_tax_withdrawal.total_real,
                lumpsum.after_tax_withdrawal.total_real,
            ),
            ("Monthly income", annuity.monthly_income, lumpsum.monthly_income),
        ];
        for (label, a, l) in rows {
            writeln!(f, "{:<24} {:>14} {:>14}", label, format_amount(a), format_amount(l))?;
        }
        writeln!(
            f,
            "\nAnnuity leaves {} more after tax",
            format_amount(self.0.after_tax_difference)
        )
    }
}
