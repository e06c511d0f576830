//! Code statistics
//!
//! pᵢ = occurrencesᵢ / total
//! average length L = Σ pᵢ · lenᵢ
//! entropy        H = Σ pᵢ · log2(1 / pᵢ)
//! H ≤ L < H + 1 for any optimal prefix code

use crate::codes::CodeTable;

/// Summary of one code table
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CodeStatistics {
    /// Total occurrences
    pub total: u64,
    /// Distinct symbols
    pub symbols: usize,
    /// Expected codeword length in bits
    pub average_code_length: f64,
    /// Shannon entropy of the observed distribution, in bits
    pub entropy: f64,
}

impl CodeStatistics {
    /// Compute statistics; an empty table yields all zeros.
    pub fn from_table(table: &CodeTable) -> Self {
        let total = table.total_weight();
        if total == 0 {
            return Self::default();
        }

        let mut average_code_length = 0.0;
        let mut entropy = 0.0;
        for entry in table {
            let p = entry.weight as f64 / total as f64;
            average_code_length += p * entry.code.len() as f64;
            if p > 0.0 {
                entropy += p * (1.0 / p).log2();
            }
        }

        Self {
            total,
            symbols: table.len(),
            average_code_length,
            entropy,
        }
    }

    /// L - H: bits per symbol lost to integer code lengths (and the sentinel)
    pub fn redundancy(&self) -> f64 {
        self.average_code_length - self.entropy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::AdaptiveTree;

    fn stats_for(input: &str) -> CodeStatistics {
        let mut tree = AdaptiveTree::new();
        for symbol in input.chars() {
            tree.observe(symbol).unwrap();
        }
        CodeStatistics::from_table(&CodeTable::derive(&tree))
    }

    #[test]
    fn test_empty_table_is_zero() {
        let stats = stats_for("");
        assert_eq!(stats, CodeStatistics::default());
        assert_eq!(stats.redundancy(), 0.0);
    }

    #[test]
    fn test_single_symbol_has_zero_entropy() {
        let stats = stats_for("aaaa");
        assert_eq!(stats.total, 4);
        assert_eq!(stats.entropy, 0.0);
        // one-bit code next to the sentinel
        assert!((stats.average_code_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_abracadabra_figures() {
        let stats = stats_for("abracadabra");
        assert_eq!(stats.symbols, 5);
        // a:5×1, b:2×3, r:2×3, c:1×3, d:1×4 = 24 bits
        assert!((stats.average_code_length - 24.0 / 11.0).abs() < 1e-12);
        assert!(stats.entropy > 2.0 && stats.entropy < 2.1);
        assert!(stats.redundancy() >= 0.0);
    }
}
