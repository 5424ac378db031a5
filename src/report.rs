use rust_decimal::Decimal;

use crate::{
    depth::{DepthPoint, DepthSnapshot},
    instrument::Instrument,
    scenario::{ScenarioRow, ScenarioTable},
    side::{BookSide, Side},
};

/// Human-readable statement of one scenario row.
///
/// Buy impact is expressed in the major currency, sell impact in the minor currency, following
/// the units of [`crate::execution::ExecutionResult::impact_value`].
#[must_use]
pub fn slippage_statement(row: &ScenarioRow, side: Side, instrument: &Instrument) -> String {
    let major = instrument.major().to_ascii_uppercase();
    let minor = instrument.minor().to_ascii_uppercase();
    let head = format!(
        "For an order of {} {major}, the average price would be {} {minor}; with slippage of {}%, you would have received",
        grouped(row.order_size, 0),
        fixed(row.average_price, 4),
        fixed(row.slippage_pct, 2),
    );
    match side {
        Side::Buy => format!("{head} {} {major} less for that order size.", grouped(row.impact_value, 2)),
        Side::Sell => format!("{head} an extra {} {minor} for that order size.", grouped(row.impact_value, 2)),
    }
}

/// One statement per successful row, followed by one line per skipped size.
#[must_use]
pub fn slippage_report(table: &ScenarioTable, instrument: &Instrument) -> Vec<String> {
    let major = instrument.major().to_ascii_uppercase();
    table
        .rows
        .iter()
        .map(|row| slippage_statement(row, table.side, instrument))
        .chain(table.failures.iter().map(|failure| {
            format!("An order of {} {major} could not be simulated: {}.", grouped(failure.order_size, 0), failure.error)
        }))
        .collect()
}

/// Title line for a depth chart over the snapshot's band.
#[must_use]
pub fn spread_summary(snapshot: &DepthSnapshot, instrument: &Instrument) -> String {
    format!(
        "Order Book Depth for {} (±{}% around top levels) Spread: {}% / {}bp",
        instrument.to_string().to_ascii_uppercase(),
        snapshot.band_pct.normalize(),
        fixed(snapshot.spread_pct, 4),
        fixed(snapshot.spread_bps(), 2),
    )
}

/// The bounded ladders as CSV for an external plotting tool.
#[must_use]
pub fn depth_csv(snapshot: &DepthSnapshot) -> String {
    let mut out = String::from("side,price,amount,cumulative_amount\n");
    for side in [BookSide::Bid, BookSide::Ask] {
        for DepthPoint { price, amount, cumulative_amount, .. } in snapshot.bounded(side) {
            out.push_str(&format!("{side},{price},{amount},{cumulative_amount}\n"));
        }
    }
    out
}

/// Round to `dp` places and pad with trailing zeros.
fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp(dp);
    // Avoid printing "-0.00"
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.*}", dp as usize, rounded)
}

/// [`fixed`] with comma thousands separators in the integer part.
fn grouped(value: Decimal, dp: u32) -> String {
    let text = fixed(value, dp);
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
