//! Error types for the ueex-core library.

use thiserror::Error;

/// Errors raised while building a schedule document.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// The document carries no time series at all.
    #[error("schedule document must contain at least one time series")]
    EmptyTimeSeries,

    /// A series does not hold exactly one value per hour of the delivery day.
    #[error("time series #{position} has {actual} hourly values, expected {expected}")]
    HourlyValueCount {
        position: usize,
        expected: usize,
        actual: usize,
    },

    /// The delivery interval cannot be represented (date out of range).
    #[error("delivery date {0} is out of the supported range")]
    DeliveryDate(String),
}

/// Boundary validation errors for incoming calculator requests.
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("hoursCount must be within [{min}, {max}] (got {value})")]
    HoursOutOfRange { min: u32, max: u32, value: u32 },

    /// Volume times hours times `field` is not finite or exceeds `max`.
    #[error("trade value for {field} is too large (got {value}, max {max})")]
    AmountTooLarge { field: &'static str, value: f64, max: f64 },
}

/// Errors from the price-history collaborator.
#[derive(Debug, Error)]
pub enum PriceError {
    /// The quotation page answered with a non-success status.
    #[error("quotation source returned status {0}")]
    Status(u16),

    /// Transport or body read failure.
    #[error("quotation fetch failed: {0}")]
    Fetch(String),

    /// The page was retrieved but no price rows could be recognised.
    #[error("no prices found in quotation page ({0} bytes)")]
    NoPrices(usize),
}

/// Convenience Result type for schedule building.
pub type Result<T> = std::result::Result<T, ScheduleError>;
