use crate::{
    cursor::Cursor,
    error::MapError,
    materialize::RowMaterializer,
    obs::sink::{MetricsEvent, Span, record},
    plan::BindingPlan,
};
use std::{fmt, iter::FusedIterator};
use tokio_util::sync::CancellationToken;
use tracing::debug;

///
/// LazyRows
///
/// Pull-based mapping session over a borrowed cursor.
///
/// Each `next` checks the cancellation token before advancing. Once the
/// cursor is exhausted, a row fails, or cancellation is observed, the
/// iterator stays finished.
///

pub struct LazyRows<'c, T, C: ?Sized> {
    cursor: &'c mut C,
    plan: BindingPlan<T>,
    token: CancellationToken,
    span: Span,
    done: bool,
}

impl<'c, T, C: ?Sized> LazyRows<'c, T, C> {
    pub(crate) fn new(
        cursor: &'c mut C,
        plan: BindingPlan<T>,
        token: CancellationToken,
        span: Span,
    ) -> Self {
        Self {
            cursor,
            plan,
            token,
            span,
            done: false,
        }
    }

    #[must_use]
    pub const fn plan(&self) -> &BindingPlan<T> {
        &self.plan
    }

    /// Rows yielded so far.
    #[must_use]
    pub const fn rows(&self) -> u64 {
        self.span.rows()
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.done
    }

    fn finish(&mut self) {
        self.done = true;
    }
}

impl<T, C> Iterator for LazyRows<'_, T, C>
where
    T: Default,
    C: Cursor + ?Sized,
{
    type Item = Result<T, MapError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let target = self.plan.target();

        if self.token.is_cancelled() {
            self.finish();
            debug!(target, rows = self.span.rows(), "mapping cancelled");
            record(MetricsEvent::Cancelled { target });

            return Some(Err(MapError::Cancelled));
        }

        match self.cursor.advance() {
            Ok(true) => {}
            Ok(false) => {
                self.finish();
                debug!(target, rows = self.span.rows(), "lazy mapping finished");

                return None;
            }
            Err(err) => {
                self.finish();

                return Some(Err(err.into()));
            }
        }

        let row = RowMaterializer::new(&self.plan).materialize(&*self.cursor, self.span.rows());
        match row {
            Ok(value) => {
                self.span.add_row();
                Some(Ok(value))
            }
            Err(err) => {
                self.finish();
                Some(Err(err))
            }
        }
    }
}

impl<T, C> FusedIterator for LazyRows<'_, T, C>
where
    T: Default,
    C: Cursor + ?Sized,
{
}

impl<T, C: ?Sized> fmt::Debug for LazyRows<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyRows")
            .field("target", &self.plan.target())
            .field("rows", &self.span.rows())
            .field("cancelled", &self.token.is_cancelled())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
