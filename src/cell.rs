//! Structural keys and fixed-shape records for table cells.

use std::{collections::HashMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reserved field name for the read counter in persisted documents and exports.
pub(crate) const READS_FIELD: &str = "reads";
/// Reserved field name for the write counter in persisted documents and exports.
pub(crate) const WRITES_FIELD: &str = "writes";

/// Identifier of one discretized region of the state space.
///
/// Wraps the per-dimension quantized index tuple. Identical index tuples
/// always produce equal ids, across process runs, which is what makes the
/// persisted table resumable. The `Display` form joins the indices with `#`
/// (`"3#7#0"`) and is the key used in the persisted document; [`FromStr`]
/// parses it back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(Vec<usize>);

impl CellId {
    pub fn new(indices: Vec<usize>) -> Self {
        CellId(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "#")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for CellId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::ParseCellId {
                input: s.to_string(),
                reason: "empty string".to_string(),
            });
        }

        let indices = s
            .split('#')
            .map(|segment| {
                segment.parse::<usize>().map_err(|_| Error::ParseCellId {
                    input: s.to_string(),
                    reason: format!("'{segment}' is not a non-negative integer"),
                })
            })
            .collect::<Result<Vec<usize>, Error>>()?;

        Ok(CellId(indices))
    }
}

/// Access statistics for a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCounters {
    pub reads: u64,
    pub writes: u64,
}

/// Per-cell record: the snapped state values the cell represents, exactly
/// one value per configured action, and access counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    pub state_values: Vec<f64>,
    pub action_values: Vec<f64>,
    pub counters: AccessCounters,
}

impl CellEntry {
    /// Default-initialized entry: zero action values, zero counters.
    pub fn zeroed(state_values: Vec<f64>, n_actions: usize) -> Self {
        Self {
            state_values,
            action_values: vec![0.0; n_actions],
            counters: AccessCounters::default(),
        }
    }
}

/// The in-memory table body: one entry per visited cell.
pub type CellMap = HashMap<CellId, CellEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_indices() {
        assert_eq!(CellId::new(vec![3, 7, 0]).to_string(), "3#7#0");
        assert_eq!(CellId::new(vec![12]).to_string(), "12");
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = CellId::new(vec![0, 19, 4, 4]);
        let parsed: CellId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!("".parse::<CellId>().is_err());
        assert!("1##2".parse::<CellId>().is_err());
        assert!("1#-2".parse::<CellId>().is_err());
        assert!("a#b".parse::<CellId>().is_err());
    }

    #[test]
    fn test_identical_indices_yield_equal_ids() {
        let a = CellId::new(vec![2, 5]);
        let b = CellId::new(vec![2, 5]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_zeroed_entry_shape() {
        let entry = CellEntry::zeroed(vec![0.5, -0.5], 4);
        assert_eq!(entry.state_values, vec![0.5, -0.5]);
        assert_eq!(entry.action_values, vec![0.0; 4]);
        assert_eq!(entry.counters, AccessCounters::default());
    }
}
