//! Function usage counts.

use std::collections::HashMap;

/// How often each function name was called across the scanned formulas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionStats {
    counts: HashMap<String, usize>,
}

impl FunctionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, function: &str) {
        *self.counts.entry(function.to_string()).or_insert(0) += 1;
    }

    pub fn count(&self, function: &str) -> usize {
        self.counts.get(function).copied().unwrap_or(0)
    }

    /// Number of distinct functions seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Functions by descending count; equal counts are ordered by name.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .counts
            .iter()
            .map(|(name, &count)| (name.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::FunctionStats;

    #[test]
    fn test_sorted_by_count_then_name() {
        let mut stats = FunctionStats::new();
        for name in ["SUM", "IF", "SUM", "AVERAGE", "IF", "SUM", "MAX"] {
            stats.record(name);
        }
        assert_eq!(
            stats.sorted(),
            vec![("SUM", 3), ("IF", 2), ("AVERAGE", 1), ("MAX", 1)]
        );
        assert_eq!(stats.count("MIN"), 0);
        assert_eq!(stats.len(), 4);
    }
}
