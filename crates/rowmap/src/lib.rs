//! ## Crate layout
//! - `cursor`: the forward-only row source trait and an in-memory cursor.
//! - `value` / `types`: cell values, coercion rules, date and timestamp.
//! - `model`: per-type field tables, derived or registered by hand.
//! - `plan` / `materialize`: binding planner and row materializer.
//! - `mapper`: eager and lazy mapping entry points.
//! - `obs`: per-thread mapping counters and the metrics sink.
//!
//! `#[derive(FromRow)]` generates the field table for a struct; the
//! `prelude` brings the mapping vocabulary and the `CursorExt` methods into
//! scope.

pub use rowmap_core as core;
pub use rowmap_core::{
    cursor, error, mapper, materialize, model, obs, options, plan, traits, types, value,
};

// export so generated code resolves inside this crate's own tests
extern crate self as rowmap;

pub use rowmap_core::{
    error::{ConversionError, ErrorClass, MapError},
    mapper::{CursorExt, LazyRows, Mapper, map, map_lazy},
    options::MapOptions,
    traits::FromRow,
};
pub use rowmap_derive::FromRow;
pub use tokio_util::sync::CancellationToken;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{CancellationToken, FromRow};
    pub use rowmap_core::prelude::*;
}

///
/// TESTS
///
