//! Linear-regression price channel.
//!
//! Fits an ordinary least-squares trend line to the price window and
//! derives symmetric tolerance bands in multiples of the residual
//! standard deviation. The outermost band pair on each side forms the
//! alert "zone" consumed by the evaluator.

mod channel;
mod trend;

pub use channel::{RegressionChannel, RegressionResult};
pub use trend::TrendDirection;
