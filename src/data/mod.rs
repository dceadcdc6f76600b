/// Data layer: core types, loading, and chart computation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site/booster indices
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  charts   │  apply Selection → PieSpec / ScatterSpec
///   └──────────┘
/// ```

pub mod charts;
pub mod loader;
pub mod model;
