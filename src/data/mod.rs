//! Data layer: typed telemetry records, loading, and reshaping.
//!
//! ```text
//!  log.csv / data.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  probe search path, parse CSV → Vec<Sample>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  model   │  EngineSample / NavSample
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ reshape  │  melt / count / group-aggregate → chart series
//!   └──────────┘
//! ```

pub mod loader;
pub mod model;
pub mod reshape;
