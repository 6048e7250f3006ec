//! Score ledger.
//!
//! Every gate encounter appends one delta. The breakdown is derived from the
//! ledger at session end and always sums back to the total.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scoring component. Names are frozen once shipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreComponentId {
    /// Gate pass score, or a zero-amount miss.
    GateScore,
    /// Reserved for combo multipliers.
    ComboBonus,
    /// Reserved for explicit miss penalties.
    MissPenalty,
}

impl ScoreComponentId {
    /// Stable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreComponentId::GateScore => "GateScore",
            ScoreComponentId::ComboBonus => "ComboBonus",
            ScoreComponentId::MissPenalty => "MissPenalty",
        }
    }
}

impl fmt::Display for ScoreComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ledger entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    /// Component credited.
    pub component: ScoreComponentId,
    /// Points (may be zero).
    pub amount: i32,
    /// Gate that produced the delta.
    pub gate_index: i32,
    /// Combo streak after this gate.
    pub combo_after: i32,
}

/// Aggregated ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sum of every delta.
    pub total: i32,
    /// Sum per component, in component order.
    pub totals_by_component: BTreeMap<ScoreComponentId, i32>,
    /// Ledger length.
    pub delta_count: usize,
}

impl ScoreBreakdown {
    /// Aggregate a ledger.
    pub fn from_deltas(deltas: &[ScoreDelta]) -> Self {
        let mut breakdown = Self {
            delta_count: deltas.len(),
            ..Self::default()
        };
        for delta in deltas {
            breakdown.total += delta.amount;
            *breakdown.totals_by_component.entry(delta.component).or_insert(0) += delta.amount;
        }
        breakdown
    }

    /// Total for one component, zero if absent.
    pub fn component(&self, id: ScoreComponentId) -> i32 {
        self.totals_by_component.get(&id).copied().unwrap_or(0)
    }
}
