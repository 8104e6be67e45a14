use std::collections::HashMap;

use log::{debug, trace};

/// Character counts of a single input line, kept in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreqTable {
    entries: Vec<(char, u64)>,
    index: HashMap<char, usize>,
}

impl FreqTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_line(line: &str) -> Self {
        let mut table = Self::new();
        for ch in line.chars() {
            table.add(ch);
        }
        debug!(
            "Counted {} characters, {} distinct",
            table.total(),
            table.len()
        );
        table
    }

    pub fn add(&mut self, ch: char) {
        match self.index.get(&ch) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                trace!("New character {:?} at slot {}", ch, self.entries.len());
                self.index.insert(ch, self.entries.len());
                self.entries.push((ch, 1));
            }
        }
    }

    pub fn get(&self, ch: char) -> Option<u64> {
        self.index.get(&ch).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Shannon entropy of the counted characters, in bits per symbol.
    pub fn entropy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let total_f = total as f64;

        self.entries
            .iter()
            .map(|&(_, count)| {
                let p = count as f64 / total_f;
                -p * p.log2()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_in_first_occurrence_order() {
        let table = FreqTable::from_line("aaabbc");
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![('a', 3), ('b', 2), ('c', 1)]);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn order_follows_first_sighting_not_count() {
        let table = FreqTable::from_line("cbbaaa");
        let chars: Vec<char> = table.iter().map(|(c, _)| c).collect();
        assert_eq!(chars, vec!['c', 'b', 'a']);
        assert_eq!(table.get('a'), Some(3));
        assert_eq!(table.get('z'), None);
    }

    #[test]
    fn empty_line_gives_empty_table() {
        let table = FreqTable::from_line("");
        assert!(table.is_empty());
        assert_eq!(table.entropy(), 0.0);
    }

    #[test]
    fn handles_non_ascii_characters() {
        let table = FreqTable::from_line("żółw żółw");
        assert_eq!(table.get('ż'), Some(2));
        assert_eq!(table.get(' '), Some(1));
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn entropy_of_two_equal_symbols_is_one_bit() {
        let table = FreqTable::from_line("abab");
        assert!((table.entropy() - 1.0).abs() < 1e-12);
    }
}
