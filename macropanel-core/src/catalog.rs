//! Series catalog — topic-organized FRED series identifiers.
//!
//! The catalog is stored as a TOML config with topic groups and their member
//! series. The built-in default covers the Treasury yield curve, recession
//! indicators, the major price indices, unemployment (including demographic
//! cuts), and inflation expectations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One catalog entry: a series identifier and its human-readable description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesEntry {
    pub id: String,
    pub description: String,
}

/// The complete series catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: BTreeMap<String, Vec<SeriesEntry>>,
}

impl Catalog {
    /// Load a catalog from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read catalog file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse catalog TOML: {e}"))
    }

    /// Serialize the catalog to TOML.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("serialize catalog: {e}"))
    }

    /// All series identifiers across all groups.
    pub fn all_ids(&self) -> Vec<&str> {
        self.groups
            .values()
            .flat_map(|entries| entries.iter().map(|e| e.id.as_str()))
            .collect()
    }

    /// Entries for a specific group.
    pub fn group_entries(&self, group: &str) -> Option<&[SeriesEntry]> {
        self.groups.get(group).map(|v| v.as_slice())
    }

    /// The list of group names.
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(|s| s.as_str()).collect()
    }

    /// Total number of series.
    pub fn series_count(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    /// The built-in FRED macro catalog.
    pub fn default_fred() -> Self {
        fn entries(pairs: &[(&str, &str)]) -> Vec<SeriesEntry> {
            pairs
                .iter()
                .map(|(id, description)| SeriesEntry {
                    id: (*id).into(),
                    description: (*description).into(),
                })
                .collect()
        }

        let mut groups = BTreeMap::new();

        groups.insert(
            "Yield Curve".into(),
            entries(&[
                ("DGS3MO", "3-Month Treasury Constant Maturity Rate"),
                ("DGS1", "1-Year Treasury Constant Maturity Rate"),
                ("DGS2", "2-Year Treasury Constant Maturity Rate"),
                ("DGS5", "5-Year Treasury Constant Maturity Rate"),
                ("DGS7", "7-Year Treasury Constant Maturity Rate"),
                ("DGS10", "10-Year Treasury Constant Maturity Rate"),
                ("DGS20", "20-Year Treasury Constant Maturity Rate"),
                ("DGS30", "30-Year Treasury Constant Maturity Rate"),
            ]),
        );

        groups.insert(
            "Recession".into(),
            entries(&[
                ("USREC", "US Recession Indicator (monthly)"),
                ("USRECM", "US Recession Indicator (alt monthly series)"),
            ]),
        );

        groups.insert(
            "CPI".into(),
            entries(&[
                ("CPIAUCSL", "CPI All Urban Consumers (Headline)"),
                ("CPILFESL", "CPI All Urban Consumers: Core (Ex Food & Energy)"),
                ("CPIENGSL", "CPI Energy"),
                ("CPIFABSL", "CPI Food and Beverages"),
                ("CPIGODSL", "CPI Commodities (Goods)"),
                ("CPISRVSL", "CPI Services"),
            ]),
        );

        groups.insert(
            "PCE".into(),
            entries(&[
                ("PCEPI", "PCE Price Index (Headline)"),
                ("PCEPILFE", "PCE Price Index (Core, Ex Food & Energy)"),
                ("PCEPIS", "PCE Services"),
                ("PCEPISDG", "PCE Durable Goods"),
            ]),
        );

        groups.insert(
            "PPI".into(),
            entries(&[
                ("PPIFGS", "PPI: Final Demand"),
                ("PPIENG", "PPI: Energy"),
                ("PPICMM", "PPI: Commodities"),
            ]),
        );

        groups.insert(
            "Supply Shocks".into(),
            entries(&[
                ("DCOILWTICO", "WTI Crude Oil Spot Price"),
                ("PALLFNFINDEX", "Global Price Index of All Commodities"),
                ("GSCPI", "Global Supply Chain Pressure Index"),
            ]),
        );

        groups.insert(
            "Unemployment".into(),
            entries(&[
                ("UNRATE", "Unemployment Rate (Total, 16+)"),
                ("LNS14000001", "Unemployment Rate - Men, 16+"),
                ("LNS14000002", "Unemployment Rate - Women, 16+"),
                ("LNS14000003", "Unemployment Rate - White, 16+"),
                ("LNS14000006", "Unemployment Rate - Black or African American, 16+"),
                ("LNS14000009", "Unemployment Rate - Hispanic or Latino, 16+"),
                ("LNS14000012", "Unemployment Rate - 16 to 19 years"),
                ("LNS14000089", "Unemployment Rate - 20 to 24 years"),
                ("LNS14000025", "Unemployment Rate - 25 to 54 years"),
                ("LNS14000036", "Unemployment Rate - 55 years and over"),
            ]),
        );

        groups.insert(
            "Inflation Expectations".into(),
            entries(&[
                ("T5YIE", "5-Year Breakeven Inflation Rate"),
                ("T10YIE", "10-Year Breakeven Inflation Rate"),
                ("T5YIFR", "5-Year, 5-Year Forward Inflation Expectation Rate"),
                ("MICH", "University of Michigan: Inflation Expectation (12-month)"),
                ("MICH5YMV", "University of Michigan: Inflation Expectation (5-year)"),
            ]),
        );

        groups.insert(
            "Wages".into(),
            entries(&[(
                "ECIALLCIV",
                "Employment Cost Index: Total Compensation for Civilians",
            )]),
        );

        Self { groups }
    }
}
