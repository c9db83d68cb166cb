//! Core runtime for rowmap: cursor abstraction, values and coercion, row
//! models, the binding planner, the row materializer, and the eager/lazy
//! mapping entry points exposed via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cursor;
pub mod error;
pub mod mapper;
pub mod materialize;
pub mod model;
pub mod obs;
pub mod options;
pub mod plan;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Vocabulary needed to describe a target type and run a mapping call.
///

pub mod prelude {
    pub use crate::{
        cursor::{Cursor, MemoryCursor},
        error::MapError,
        mapper::{CursorExt as _, LazyRows, Mapper},
        model::{FieldModel, RowModel},
        options::MapOptions,
        traits::{FieldValue, FromRow},
        types::{Date, Timestamp},
        value::Value,
    };
}
