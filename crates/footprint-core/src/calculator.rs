//! Footprint calculator
//!
//! Applies fixed linear emission factors to electricity use, travel distance
//! and waste mass. Rounding is left to presentation.

use crate::breakdown::EmissionBreakdown;
use crate::error::{FootprintError, Result};

/// kg CO2 per kWh of electricity
pub const ELECTRICITY_FACTOR: f64 = 0.233;

/// kg CO2 per km travelled
pub const TRANSPORT_FACTOR: f64 = 0.192;

/// kg CO2 per kg of waste
pub const WASTE_FACTOR: f64 = 0.1;

/// Form field carrying electricity use in kWh
pub const FIELD_ELECTRICITY: &str = "electricity";
/// Form field carrying travel distance in km
pub const FIELD_DISTANCE: &str = "distance";
/// Form field carrying waste mass in kg
pub const FIELD_WASTE: &str = "waste";

/// Compute the emission breakdown for the given activity amounts
///
/// Negative amounts are not rejected.
pub fn compute(energy_kwh: f64, distance_km: f64, waste_kg: f64) -> EmissionBreakdown {
    let energy = energy_kwh * ELECTRICITY_FACTOR;
    let transport = distance_km * TRANSPORT_FACTOR;
    let waste = waste_kg * WASTE_FACTOR;

    EmissionBreakdown {
        energy_emission: energy,
        transport_emission: transport,
        waste_emission: waste,
        total_emission: energy + transport + waste,
    }
}

/// Parse a decimal string into a finite number
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text, NaN and
/// infinities are rejected as [`FootprintError::InvalidInput`].
pub fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    let invalid = || FootprintError::InvalidInput {
        field,
        value: raw.to_string(),
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid())?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid())
    }
}

/// Raw calculator inputs as submitted by the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintInput {
    /// Electricity use in kWh
    pub energy_kwh: f64,
    /// Travel distance in km
    pub distance_km: f64,
    /// Waste mass in kg
    pub waste_kg: f64,
}

impl FootprintInput {
    /// Read the three calculator fields from decoded form pairs
    ///
    /// The first occurrence of a field wins. A missing field is reported the
    /// same way as an unparseable one.
    pub fn from_form<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut electricity = None;
        let mut distance = None;
        let mut waste = None;

        for (key, value) in pairs {
            let slot = match key {
                FIELD_ELECTRICITY => &mut electricity,
                FIELD_DISTANCE => &mut distance,
                FIELD_WASTE => &mut waste,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Ok(Self {
            energy_kwh: required(FIELD_ELECTRICITY, electricity)?,
            distance_km: required(FIELD_DISTANCE, distance)?,
            waste_kg: required(FIELD_WASTE, waste)?,
        })
    }

    /// Check that every amount is a finite number
    ///
    /// Inputs built directly rather than through [`parse_number`] can carry
    /// NaN or infinities; those are rejected as [`FootprintError::InvalidInput`].
    pub fn validate(self) -> Result<Self> {
        let fields = [
            (FIELD_ELECTRICITY, self.energy_kwh),
            (FIELD_DISTANCE, self.distance_km),
            (FIELD_WASTE, self.waste_kg),
        ];
        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some(&(field, value)) => Err(FootprintError::InvalidInput {
                field,
                value: value.to_string(),
            }),
            None => Ok(self),
        }
    }

    /// Apply the emission factors to these inputs
    pub fn compute(&self) -> EmissionBreakdown {
        compute(self.energy_kwh, self.distance_km, self.waste_kg)
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<f64> {
    match value {
        Some(raw) => parse_number(field, raw),
        None => Err(FootprintError::InvalidInput {
            field,
            value: String::new(),
        }),
    }
}

/// Parse form pairs and compute the breakdown in one step
pub fn compute_from_form<'a, I>(pairs: I) -> Result<EmissionBreakdown>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    FootprintInput::from_form(pairs).map(|input| input.compute())
}
