//! Mapping entry points.
//!
//! `Mapper` runs one mapping call: it captures the cursor's columns, builds
//! the binding plan, then materializes rows either eagerly into a `Vec` or
//! lazily through [`LazyRows`].

mod lazy;

#[cfg(test)]
mod tests;

use crate::{
    cursor::Cursor,
    error::MapError,
    materialize::RowMaterializer,
    model::RowModel,
    obs::{MapMode, sink::Span},
    options::MapOptions,
    plan::{BindingPlan, ColumnSet},
    traits::FromRow,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

// re-exports
pub use lazy::LazyRows;

///
/// Mapper
///

#[derive(Clone, Debug, Default)]
pub struct Mapper {
    options: MapOptions,
}

impl Mapper {
    #[must_use]
    pub const fn new(options: MapOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub const fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Capture the cursor's columns and compile `model` against them.
    pub fn plan<T, C>(&self, model: RowModel<T>, cursor: &C) -> Result<BindingPlan<T>, MapError>
    where
        C: Cursor + ?Sized,
    {
        let columns = ColumnSet::capture(cursor, self.options.case_insensitive)?;
        let plan = BindingPlan::build(model, columns, &self.options)?;

        Ok(plan)
    }

    /// Map every remaining row into `T`.
    ///
    /// All-or-nothing: the first failing row aborts the call and rows
    /// already materialized are dropped.
    pub fn map<T, C>(&self, cursor: &mut C) -> Result<Vec<T>, MapError>
    where
        T: FromRow,
        C: Cursor + ?Sized,
    {
        self.map_model(T::row_model(), cursor)
    }

    /// Eager mapping against an explicit model.
    pub fn map_model<T, C>(&self, model: RowModel<T>, cursor: &mut C) -> Result<Vec<T>, MapError>
    where
        T: Default,
        C: Cursor + ?Sized,
    {
        let target = model.name();
        let mut span = Span::new(MapMode::Eager, target);
        let plan = self.plan(model, &*cursor)?;
        let materializer = RowMaterializer::new(&plan);

        let mut rows = Vec::new();
        while cursor.advance()? {
            rows.push(materializer.materialize(&*cursor, span.rows())?);
            span.add_row();
        }

        debug!(target, rows = rows.len(), "eager mapping finished");

        Ok(rows)
    }

    /// Start a lazy mapping session.
    ///
    /// The plan is built before this returns, so configuration errors
    /// surface here rather than on the first pull.
    pub fn map_lazy<'c, T, C>(
        &self,
        cursor: &'c mut C,
        token: CancellationToken,
    ) -> Result<LazyRows<'c, T, C>, MapError>
    where
        T: FromRow,
        C: Cursor + ?Sized,
    {
        self.map_model_lazy(T::row_model(), cursor, token)
    }

    /// Lazy mapping against an explicit model.
    pub fn map_model_lazy<'c, T, C>(
        &self,
        model: RowModel<T>,
        cursor: &'c mut C,
        token: CancellationToken,
    ) -> Result<LazyRows<'c, T, C>, MapError>
    where
        T: Default,
        C: Cursor + ?Sized,
    {
        let span = Span::new(MapMode::Lazy, model.name());
        let plan = self.plan(model, &*cursor)?;

        debug!(target = plan.target(), "cursor acquired, streaming rows");

        Ok(LazyRows::new(cursor, plan, token, span))
    }
}

/// Map every remaining row with default options.
pub fn map<T, C>(cursor: &mut C) -> Result<Vec<T>, MapError>
where
    T: FromRow,
    C: Cursor + ?Sized,
{
    Mapper::default().map(cursor)
}

/// Start a lazy mapping session with default options.
pub fn map_lazy<T, C>(
    cursor: &mut C,
    token: CancellationToken,
) -> Result<LazyRows<'_, T, C>, MapError>
where
    T: FromRow,
    C: Cursor + ?Sized,
{
    Mapper::default().map_lazy(cursor, token)
}

///
/// CursorExt
///
/// Method-call sugar for mapping straight off a cursor.
///

pub trait CursorExt: Cursor {
    fn map_rows<T: FromRow>(&mut self) -> Result<Vec<T>, MapError> {
        map(self)
    }

    fn map_rows_lazy<T: FromRow>(
        &mut self,
        token: CancellationToken,
    ) -> Result<LazyRows<'_, T, Self>, MapError> {
        map_lazy(self, token)
    }
}

impl<C: Cursor + ?Sized> CursorExt for C {}
