use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    pub filename: String,
    pub prompt: String,
}

impl CatalogEntry {
    pub fn new(filename: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            prompt: prompt.into(),
        }
    }
}

/// Terminal state of a catalog entry within one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Skipped,
    Generated,
    Failed,
}

impl EntryOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, EntryOutcome::Skipped | EntryOutcome::Generated)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryReport {
    pub filename: String,
    pub outcome: EntryOutcome,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub entries: Vec<EntryReport>,
}

impl BatchReport {
    pub fn record(&mut self, filename: impl Into<String>, outcome: EntryOutcome) {
        self.entries.push(EntryReport {
            filename: filename.into(),
            outcome,
        });
    }

    pub fn success_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome.is_success())
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    pub fn count(&self, outcome: EntryOutcome) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == outcome)
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == EntryOutcome::Failed)
            .map(|entry| entry.filename.as_str())
    }

    pub fn is_complete(&self) -> bool {
        self.success_count() == self.total_count()
    }
}
