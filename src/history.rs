//! Recent searches
//!
//! Most-recent-first list of past snapshots, deduplicated by place name and
//! capped at [`HISTORY_CAPACITY`] entries.

use crate::data::WeatherSnapshot;

/// Maximum number of remembered searches
pub const HISTORY_CAPACITY: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHistory {
    entries: Vec<WeatherSnapshot>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `snapshot` at the front, dropping any older entry with the same name
    /// and anything beyond capacity.
    pub fn record(&mut self, snapshot: WeatherSnapshot) {
        self.entries.retain(|entry| entry.name != snapshot.name);
        self.entries.insert(0, snapshot);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn entries(&self) -> &[WeatherSnapshot] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&WeatherSnapshot> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&WeatherSnapshot> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Place names, most recent first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn names(history: &SearchHistory) -> Vec<&str> {
        history.names().collect()
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = SearchHistory::new();
        assert!(history.is_empty());
        assert!(history.first().is_none());
    }

    #[test]
    fn test_record_prepends() {
        let mut history = SearchHistory::new();
        history.record(fixtures::current("London"));
        history.record(fixtures::current("Paris"));

        assert_eq!(names(&history), vec!["Paris", "London"]);
    }

    #[test]
    fn test_record_existing_moves_to_front_without_growing() {
        let mut history = SearchHistory::new();
        history.record(fixtures::current("London"));
        history.record(fixtures::current("Paris"));
        history.record(fixtures::current("Tokyo"));

        history.record(fixtures::current("London"));

        assert_eq!(history.len(), 3);
        assert_eq!(names(&history), vec!["London", "Tokyo", "Paris"]);
    }

    #[test]
    fn test_record_replaces_stale_snapshot() {
        let mut history = SearchHistory::new();
        history.record(fixtures::current("London"));

        let mut newer = fixtures::current("London");
        newer.main.temp = 30.0;
        history.record(newer);

        assert_eq!(history.len(), 1);
        assert_eq!(history.first().unwrap().main.temp, 30.0);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut history = SearchHistory::new();
        for city in ["A", "B", "C", "D", "E", "F", "G"] {
            history.record(fixtures::current(city));
            assert!(history.len() <= HISTORY_CAPACITY);
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(names(&history), vec!["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_no_duplicate_names() {
        let mut history = SearchHistory::new();
        for city in ["A", "B", "A", "C", "B", "A", "D"] {
            history.record(fixtures::current(city));
        }

        let mut seen = names(&history);
        let total = seen.len();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), total);
        assert_eq!(history.first().unwrap().name, "D");
    }
}
