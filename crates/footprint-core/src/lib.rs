//! footprint-core - Carbon footprint calculation
//!
//! Turns electricity use, travel distance and waste mass into a breakdown of
//! kg CO2 emissions using fixed emission factors.
//!
//! # Example
//!
//! ```
//! use footprint_core::{compute, format_kg};
//!
//! let breakdown = compute(100.0, 50.0, 10.0);
//! assert_eq!(format_kg(breakdown.energy_emission), "23.30");
//! assert_eq!(format_kg(breakdown.total_emission), "33.90");
//! ```

pub mod breakdown;
pub mod calculator;
pub mod error;

// Re-export main types and functions
pub use breakdown::{
    format_kg, format_percent, CategoryShare, EmissionBreakdown, EmissionCategory, ReportRow,
    PARAM_ENERGY, PARAM_TOTAL, PARAM_TRANSPORT, PARAM_WASTE,
};
pub use calculator::{
    compute, compute_from_form, parse_number, FootprintInput, ELECTRICITY_FACTOR,
    FIELD_DISTANCE, FIELD_ELECTRICITY, FIELD_WASTE, TRANSPORT_FACTOR, WASTE_FACTOR,
};
pub use error::{FootprintError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
