/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///   remote .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, categories in first-seen order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  records of the selected category
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
