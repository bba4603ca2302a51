//! ueex-core -- calculation core of the UEEX electricity-market calculator.
//!
//! Two independent, side-effect-free components plus the data they need:
//!
//! ## Modules
//!
//! - [`fees`] -- Exchange fee calculator (commission, guarantee, tariffs, taxes)
//! - [`schedule`] -- ENTSO-E Schedule_MarketDocument XML generator
//! - [`models`] -- Request/result structures and code enums
//! - [`reference`] -- Static rate tables, bidding zones and form defaults
//! - [`prices`] -- Quotation parsing, synthetic price series and statistics
//! - [`document_id`] -- Random identifiers for new schedule documents
//! - [`errors`] -- Error types for the library

pub mod document_id;
pub mod errors;
pub mod fees;
pub mod models;
pub mod prices;
pub mod reference;
pub mod schedule;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use errors::{PriceError, RequestError, ScheduleError};

// Calculator
pub use fees::compute_fees;
pub use models::fees::{FeeBreakdown, FeeRequest, RoundedFeeBreakdown};

// Schedule documents
pub use models::schedule::{MarketParticipant, ScheduleDocument, TimeSeriesEntry};
pub use schedule::{build_schedule_xml, build_schedule_xml_at};

// Price history
pub use models::prices::{PriceDataPoint, PriceHistory, PriceSource, PriceStats};

// Enums
pub use models::enums::*;

// Reference data
pub use reference::{AuctionRates, Domain, AUCTION_RATES, DOMAINS};

pub use document_id::generate_document_id;
