/// Data layer: core table types, CSV loading, and the wide→long reshape.
///
/// Architecture:
/// ```text
///  group_iqm.csv / in-memory records        descriptors.csv
///        │                                        │
///        ▼                                        ▼
///   ┌──────────┐                            ┌──────────┐
///   │  loader   │  parse file → IqmTable    │  loader   │ → Descriptors
///   └──────────┘                            └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ IqmTable  │  Vec<IqmRecord>, ordered metric columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ reshape   │  melt → LongTable, one row per scan × metric
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod reshape;
