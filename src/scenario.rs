use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    book::OrderBook,
    error::{BookError, BookResult},
    execution::{simulate, ExecutionResult},
    side::Side,
};

/// What to do when one order size in a batch cannot be simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPolicy {
    /// Stop at the first failure and return it
    #[default]
    Abort,
    /// Record recoverable failures and keep going
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioRow {
    pub order_size: Decimal,
    pub average_price: Decimal,
    pub slippage_pct: Decimal,
    pub no_slippage_notional: Decimal,
    pub top_price: Decimal,
    pub impact_value: Decimal,
}

impl From<&ExecutionResult> for ScenarioRow {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            order_size: result.requested_size,
            average_price: result.average_price,
            slippage_pct: result.slippage_pct,
            no_slippage_notional: result.no_slippage_notional,
            top_price: result.top_price,
            impact_value: result.impact_value,
        }
    }
}

#[derive(Debug)]
pub struct ScenarioFailure {
    pub order_size: Decimal,
    pub error: BookError,
}

#[derive(Debug)]
pub struct ScenarioTable {
    pub side: Side,
    /// Successful rows, in input order
    pub rows: Vec<ScenarioRow>,
    /// Skipped sizes, in input order. Always empty under [`BatchPolicy::Abort`].
    pub failures: Vec<ScenarioFailure>,
}

impl ScenarioTable {
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Simulate `raw * multiplier` for each raw size, preserving input order.
///
/// Under [`BatchPolicy::Skip`] only [`BookError::InsufficientDepth`] is skipped; any other error still aborts.
pub fn run_scenarios(
    book: &OrderBook,
    side: Side,
    multiplier: Decimal,
    sizes: &[Decimal],
    policy: BatchPolicy,
) -> BookResult<ScenarioTable> {
    let mut table = ScenarioTable { side, rows: Vec::with_capacity(sizes.len()), failures: Vec::new() };

    for &raw in sizes {
        let order_size = raw.checked_mul(multiplier).ok_or(BookError::Overflow("order size"))?;
        match simulate(book, side, order_size) {
            Ok(result) => {
                debug!(%order_size, average_price = %result.average_price, "simulated scenario");
                table.rows.push(ScenarioRow::from(&result));
            }
            Err(error) if policy == BatchPolicy::Skip && error.is_recoverable() => {
                warn!(%order_size, %error, "skipping scenario");
                table.failures.push(ScenarioFailure { order_size, error });
            }
            Err(error) => return Err(error),
        }
    }

    Ok(table)
}
