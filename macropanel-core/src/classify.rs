//! Column classification — decides which fill policy a panel column gets.

use serde::{Deserialize, Serialize};

/// Fill-policy class of a panel column.
///
/// Derived from the identifier on demand, never stored in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnClass {
    /// Constant-maturity Treasury rate series (identifier prefix match).
    YieldCurve,
    /// The single reserved recession flag series.
    RecessionIndicator,
    /// Everything else.
    Macro,
}

/// Identifier rules mapping a series id to its class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRules {
    /// Identifier prefix marking constant-maturity rate series.
    pub yield_prefix: String,
    /// Reserved identifier of the recession flag series.
    pub recession_id: String,
}

impl Default for ClassRules {
    fn default() -> Self {
        Self {
            yield_prefix: "DGS".into(),
            recession_id: "USREC".into(),
        }
    }
}

impl ClassRules {
    /// The reserved identifier wins over the prefix rule: exactly one series
    /// can be the recession indicator.
    pub fn classify(&self, id: &str) -> ColumnClass {
        if id == self.recession_id {
            ColumnClass::RecessionIndicator
        } else if id.starts_with(&self.yield_prefix) {
            ColumnClass::YieldCurve
        } else {
            ColumnClass::Macro
        }
    }
}
