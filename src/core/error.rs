use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignalError {
    /// A trend is undefined for fewer than two readings.
    #[error("insufficient data: {got} reading(s), need at least {need} for a trend")]
    InsufficientData { got: usize, need: usize },
}
