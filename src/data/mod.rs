/// Data layer: core types, loading, and the row-level pipeline stages.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, check schema → InventoryTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows of one product line
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  derive   │  PropOrder + numeric coercion
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sums per category (buckets from `columns`)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod columns;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
