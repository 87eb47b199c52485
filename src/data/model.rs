use std::collections::{BTreeMap, HashSet};

// ---------------------------------------------------------------------------
// Record – one row of the CSV
// ---------------------------------------------------------------------------

/// A single parsed row. Immutable once the dataset is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Grouping key (country name). May be empty; such rows are kept but
    /// never offered for selection.
    pub category: String,
    /// Year coerced to a number; `None` when the cell is not numeric.
    pub year: Option<f64>,
    /// Metric rounded half-up at load time; `None` when absent.
    pub value: Option<f64>,
    /// Every raw cell of the row keyed by header name.
    pub fields: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All records plus the header row and the selectable categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Header names in file order.
    pub headers: Vec<String>,
    /// Distinct non-empty categories in order of first appearance.
    pub categories: Vec<String>,
}

impl Dataset {
    /// Build the category index from the loaded records.
    pub fn from_records(headers: Vec<String>, records: Vec<Record>) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut categories = Vec::new();
        for rec in &records {
            if !rec.category.is_empty() && seen.insert(rec.category.as_str()) {
                categories.push(rec.category.clone());
            }
        }
        Dataset {
            records,
            headers,
            categories,
        }
    }

    /// Category of the first record, if there is one and it is non-empty.
    pub fn default_category(&self) -> Option<&str> {
        self.records
            .first()
            .map(|r| r.category.as_str())
            .filter(|c| !c.is_empty())
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
