//! Compound growth helpers
//!
//! Deposits are made once per year and compound at a fixed annual rate.

/// Future value of an initial balance plus a level yearly deposit
///
/// `rate` is a decimal fraction (0.05 for 5%). A zero rate falls back to
/// simple summation; `years == 0` returns `initial_amount` unchanged.
pub fn compute_future_value(
    initial_amount: f64,
    yearly_deposit: f64,
    rate: f64,
    years: u32,
) -> f64 {
    let n = f64::from(years);

    if rate == 0.0 {
        return initial_amount + yearly_deposit * n;
    }

    let growth = (1.0 + rate).powf(n);
    initial_amount * growth + yearly_deposit * ((growth - 1.0) / rate)
}

/// Cumulative inflation factor over `years`, with `inflation_rate` in percent
///
/// Negative `years` give a factor below 1 rather than an error.
pub fn inflation_discount_factor(inflation_rate: f64, years: i64) -> f64 {
    (1.0 + inflation_rate / 100.0).powf(years as f64)
}

/// Express a nominal amount in today's purchasing power
pub fn real_value(nominal: f64, discount_factor: f64) -> f64 {
    nominal / discount_factor
}
