//! Emission breakdown and its presentation helpers

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculator::parse_number;
use crate::error::{FootprintError, Result};

/// Tolerance used when comparing a supplied total against its components.
///
/// Values travel through the report link rounded to two decimals at worst,
/// so anything within one cent of a kilogram is treated as consistent.
pub const CONSISTENCY_TOLERANCE: f64 = 0.01;

/// Query parameter carrying the energy emission
pub const PARAM_ENERGY: &str = "energy";
/// Query parameter carrying the transport emission
pub const PARAM_TRANSPORT: &str = "transport";
/// Query parameter carrying the waste emission
pub const PARAM_WASTE: &str = "waste";
/// Query parameter carrying the total emission
pub const PARAM_TOTAL: &str = "total";

/// Emission source categories, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionCategory {
    /// Electricity use
    Energy,
    /// Travel distance
    Transport,
    /// Waste mass
    Waste,
}

impl EmissionCategory {
    /// All categories in report order
    pub const ALL: [EmissionCategory; 3] = [
        EmissionCategory::Energy,
        EmissionCategory::Transport,
        EmissionCategory::Waste,
    ];

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            EmissionCategory::Energy => "Energy",
            EmissionCategory::Transport => "Transport",
            EmissionCategory::Waste => "Waste",
        }
    }
}

impl fmt::Display for EmissionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Carbon emissions in kg CO2, split by source
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionBreakdown {
    /// Emissions attributable to electricity use
    pub energy_emission: f64,
    /// Emissions attributable to travel distance
    pub transport_emission: f64,
    /// Emissions attributable to waste mass
    pub waste_emission: f64,
    /// Sum of the three components
    pub total_emission: f64,
}

/// A labelled value as it appears in the report summary and table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: f64,
}

impl ReportRow {
    /// Value rounded to two decimals
    pub fn formatted(&self) -> String {
        format_kg(self.value)
    }
}

/// Proportion of the emissions contributed by one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryShare {
    pub category: EmissionCategory,
    /// Emission value used for the share (negative values count as zero)
    pub value: f64,
    /// Share of the summed components, 0..=100
    pub percent: f64,
}

impl EmissionBreakdown {
    /// Rebuild a breakdown from the four report parameters
    ///
    /// Absent or empty parameters are collected into
    /// [`FootprintError::MissingParameters`]. Present parameters that are not
    /// finite numbers yield [`FootprintError::InvalidParameters`].
    pub fn from_report_params(
        energy: Option<&str>,
        transport: Option<&str>,
        waste: Option<&str>,
        total: Option<&str>,
    ) -> Result<Self> {
        let params = [
            (PARAM_ENERGY, energy),
            (PARAM_TRANSPORT, transport),
            (PARAM_WASTE, waste),
            (PARAM_TOTAL, total),
        ];

        let missing: Vec<&'static str> = params
            .iter()
            .filter(|(_, value)| value.map_or(true, str::is_empty))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(FootprintError::MissingParameters(missing));
        }

        let mut values = [0.0; 4];
        for (slot, (name, raw)) in values.iter_mut().zip(params) {
            let raw = raw.unwrap_or_default();
            *slot = parse_number(name, raw).map_err(|_| FootprintError::InvalidParameters {
                field: name,
                value: raw.to_string(),
            })?;
        }

        let [energy_emission, transport_emission, waste_emission, total_emission] = values;
        Ok(Self {
            energy_emission,
            transport_emission,
            waste_emission,
            total_emission,
        })
    }

    /// Emission value for a single category
    pub fn get(&self, category: EmissionCategory) -> f64 {
        match category {
            EmissionCategory::Energy => self.energy_emission,
            EmissionCategory::Transport => self.transport_emission,
            EmissionCategory::Waste => self.waste_emission,
        }
    }

    /// Sum of the three components, independent of `total_emission`
    pub fn component_sum(&self) -> f64 {
        self.energy_emission + self.transport_emission + self.waste_emission
    }

    /// Whether `total_emission` matches the component sum
    pub fn is_consistent(&self) -> bool {
        (self.total_emission - self.component_sum()).abs() <= CONSISTENCY_TOLERANCE
    }

    /// Summary rows in report order: Energy, Transport, Waste, Total
    pub fn rows(&self) -> [ReportRow; 4] {
        [
            ReportRow {
                label: EmissionCategory::Energy.label(),
                value: self.energy_emission,
            },
            ReportRow {
                label: EmissionCategory::Transport.label(),
                value: self.transport_emission,
            },
            ReportRow {
                label: EmissionCategory::Waste.label(),
                value: self.waste_emission,
            },
            ReportRow {
                label: "Total",
                value: self.total_emission,
            },
        ]
    }

    /// Per-category share of the emissions
    ///
    /// Returns an empty list when no category has a positive finite value.
    /// Components are scaled by the largest one before summing, which keeps
    /// the sum finite for any finite input.
    pub fn shares(&self) -> Vec<CategoryShare> {
        let values: Vec<(EmissionCategory, f64)> = EmissionCategory::ALL
            .iter()
            .map(|&category| (category, self.get(category).max(0.0)))
            .collect();

        let largest = values.iter().map(|(_, value)| *value).fold(0.0, f64::max);
        if largest <= 0.0 || !largest.is_finite() {
            return Vec::new();
        }

        let scaled_sum: f64 = values.iter().map(|(_, value)| value / largest).sum();

        values
            .into_iter()
            .map(|(category, value)| CategoryShare {
                category,
                value,
                percent: value / largest / scaled_sum * 100.0,
            })
            .collect()
    }
}

/// Format a kg CO2 value to two decimal places
pub fn format_kg(value: f64) -> String {
    format!("{:.2}", value)
}

/// Format a percentage to one decimal place with a `%` suffix
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;

    #[test]
    fn test_from_report_params() {
        let breakdown = EmissionBreakdown::from_report_params(
            Some("23.30"),
            Some("9.60"),
            Some("1.00"),
            Some("33.90"),
        )
        .unwrap();

        assert_eq!(breakdown.energy_emission, 23.3);
        assert_eq!(breakdown.transport_emission, 9.6);
        assert_eq!(breakdown.waste_emission, 1.0);
        assert_eq!(breakdown.total_emission, 33.9);
        assert!(breakdown.is_consistent());
    }

    #[test]
    fn test_from_report_params_missing() {
        let err = EmissionBreakdown::from_report_params(Some("1"), Some("2"), None, Some(""))
            .unwrap_err();
        assert_eq!(err, FootprintError::MissingParameters(vec!["waste", "total"]));
    }

    #[test]
    fn test_missing_takes_precedence_over_invalid() {
        let err = EmissionBreakdown::from_report_params(Some("abc"), None, Some("1"), Some("1"))
            .unwrap_err();
        assert_eq!(err, FootprintError::MissingParameters(vec!["transport"]));
    }

    #[test]
    fn test_from_report_params_invalid() {
        let err =
            EmissionBreakdown::from_report_params(Some("1"), Some("two"), Some("3"), Some("6"))
                .unwrap_err();
        assert_eq!(
            err,
            FootprintError::InvalidParameters {
                field: "transport",
                value: "two".to_string(),
            }
        );
    }

    #[test]
    fn test_from_report_params_rejects_non_finite() {
        let err = EmissionBreakdown::from_report_params(Some("1"), Some("2"), Some("3"), Some("inf"))
            .unwrap_err();
        assert!(matches!(
            err,
            FootprintError::InvalidParameters { field: "total", .. }
        ));
    }

    #[test]
    fn test_inconsistent_total_is_detected() {
        let breakdown = EmissionBreakdown {
            energy_emission: 1.0,
            transport_emission: 1.0,
            waste_emission: 1.0,
            total_emission: 10.0,
        };
        assert!(!breakdown.is_consistent());
        assert_eq!(breakdown.component_sum(), 3.0);
    }

    #[test]
    fn test_rows_order_and_formatting() {
        let rows = compute(100.0, 50.0, 10.0).rows();
        let labels: Vec<_> = rows.iter().map(|row| row.label).collect();
        let values: Vec<_> = rows.iter().map(ReportRow::formatted).collect();

        assert_eq!(labels, ["Energy", "Transport", "Waste", "Total"]);
        assert_eq!(values, ["23.30", "9.60", "1.00", "33.90"]);
    }

    #[test]
    fn test_shares() {
        let shares = compute(100.0, 50.0, 10.0).shares();
        assert_eq!(shares.len(), 3);

        let percents: Vec<_> = shares.iter().map(|s| format_percent(s.percent)).collect();
        assert_eq!(percents, ["68.7%", "28.3%", "2.9%"]);

        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_empty_when_nothing_emitted() {
        assert!(EmissionBreakdown::default().shares().is_empty());
        assert!(compute(-5.0, 0.0, 0.0).shares().is_empty());
    }

    #[test]
    fn test_shares_ignore_negative_components() {
        let shares = compute(-100.0, 10.0, 10.0).shares();
        assert_eq!(shares[0].value, 0.0);
        assert_eq!(shares[0].percent, 0.0);
        assert!(shares[1].percent > shares[2].percent);
    }

    #[test]
    fn test_shares_of_huge_values() {
        let huge = Some("1e308");
        let breakdown = EmissionBreakdown::from_report_params(huge, huge, huge, huge).unwrap();
        let percents: Vec<_> = breakdown
            .shares()
            .iter()
            .map(|s| format_percent(s.percent))
            .collect();
        assert_eq!(percents, ["33.3%", "33.3%", "33.3%"]);
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_kg(33.899999), "33.90");
        assert_eq!(format_kg(0.0), "0.00");
        assert_eq!(format_percent(68.731), "68.7%");
    }

    #[test]
    fn test_serde_roundtrip_field_names() {
        let json = serde_json::to_value(compute(1.0, 0.0, 0.0)).unwrap();
        assert!(json.get("energy_emission").is_some());
        assert!(json.get("total_emission").is_some());
    }
}
