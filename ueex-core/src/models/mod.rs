//! Calculator, schedule document and price-history data structures.

pub mod enums;
pub mod fees;
pub mod prices;
pub mod schedule;
