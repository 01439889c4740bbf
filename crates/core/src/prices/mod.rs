//! Prices module - interpolated price curves and the oracle trait.

mod price_errors;
mod price_oracle;
mod price_spline;

pub use price_errors::PriceError;
pub use price_oracle::{PriceOracle, SplinePriceOracle};
pub use price_spline::PriceSpline;
