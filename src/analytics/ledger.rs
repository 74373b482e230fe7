use std::collections::HashMap;

/// Per-key accumulator that remembers first-seen order.
///
/// Rows are created zero-valued the first time a key is referenced. Keeping
/// insertion order means rows that stay tied after sorting come out in the
/// order their team or player first appeared in the match data.
#[derive(Debug)]
pub struct Ledger<T> {
    index: HashMap<String, usize>,
    rows: Vec<(String, T)>,
}

impl<T: Default> Ledger<T> {
    pub fn new() -> Self {
        Ledger {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, key: &str) -> &mut T {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.rows.len();
                self.rows.push((key.to_string(), T::default()));
                self.index.insert(key.to_string(), position);
                position
            }
        };
        &mut self.rows[position].1
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    pub fn into_rows(self) -> Vec<(String, T)> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_start_at_default_and_keep_first_seen_order() {
        let mut ledger: Ledger<u32> = Ledger::new();
        assert!(ledger.is_empty());

        *ledger.row("b") += 1;
        *ledger.row("a") += 2;
        *ledger.row("b") += 1;

        assert_eq!(ledger.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(
            ledger.into_rows(),
            vec![("b".to_string(), 2), ("a".to_string(), 2)]
        );
    }
}
