//! Order book depth and market-order slippage analysis.
//!
//! Raw quotes are normalized into an [`OrderBook`], which is then either summarized around the top of book
//! with [`depth_snapshot`] or walked by [`simulate`] to estimate the cost of a market order. [`run_scenarios`]
//! drives the simulator over a list of sizes.

pub mod book;
pub mod config;
pub mod depth;
pub mod error;
pub mod execution;
pub mod instrument;
pub mod level;
pub mod quote;
pub mod report;
pub mod scenario;
pub mod side;

pub use book::OrderBook;
pub use config::AnalysisConfig;
pub use depth::{depth_snapshot, DepthPoint, DepthSnapshot};
pub use error::{BookError, BookResult};
pub use execution::{simulate, ExecutionResult};
pub use instrument::Instrument;
pub use level::PriceLevel;
pub use quote::{QuotePayload, QuoteRequest, QuoteResponse, RawQuote, RawValue};
pub use scenario::{run_scenarios, BatchPolicy, ScenarioFailure, ScenarioRow, ScenarioTable};
pub use side::{BookSide, Side};
