/// Data layer: core types, loading, layout and series helpers.
///
/// Architecture:
/// ```text
///  files/validation/<group>/<run>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  list groups, skip empty logs → Vec<ExperimentGroup>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  layout   │  partition groups over figures → Grid<group index>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  clamp to last epoch, optional mean curve
///   └──────────┘
/// ```

pub mod layout;
pub mod loader;
pub mod model;
pub mod series;
