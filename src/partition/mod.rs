//! Partition cursors over aliasing views.
//!
//! A cursor owns a [`View`](laff_view::View) and, on every
//! [`advance`](Partition::advance), hands back aliasing sub-views of the
//! "already processed" and "not yet processed" regions. Nothing is copied:
//! kernels run on the returned regions and write straight into the source.
//!
//! - [`DirectionalPartition`]: head/tail split along rows or columns
//! - [`SixWayPartition`]: corner, strips and trailing block at a moving diagonal
//! - [`SyncPartition`]: two cursors advanced in lockstep
//! - [`Filter`]: which regions a step returns
//!
//! Running out of regions is not an error: cursors report
//! [`Advance::Exhausted`], and [`Advance::into_result`] converts it to
//! [`LaffError::Exhausted`] for callers that want `?`.

mod directional;
mod filter;
mod six_way;
mod sync;

pub use directional::{
    part_by_column_lr, part_by_column_rl, part_by_row_bt, part_by_row_tb, Direction,
    DirectionalPartition, Halves,
};
pub use filter::{Filter, Regions};
pub use six_way::{SixWay, SixWayPartition};
pub use sync::SyncPartition;

use laff_view::{LaffError, Result};

/// Outcome of one cursor step.
#[derive(Debug)]
pub enum Advance<R> {
    /// The regions of this step.
    Step(R),
    /// The cursor has no unprocessed extent left.
    Exhausted,
}

impl<R> Advance<R> {
    /// The step's regions, or [`LaffError::Exhausted`].
    pub fn into_result(self) -> Result<R> {
        match self {
            Advance::Step(regions) => Ok(regions),
            Advance::Exhausted => Err(LaffError::Exhausted),
        }
    }

    pub fn step(self) -> Option<R> {
        match self {
            Advance::Step(regions) => Some(regions),
            Advance::Exhausted => None,
        }
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Advance::Exhausted)
    }

    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> Advance<U> {
        match self {
            Advance::Step(regions) => Advance::Step(f(regions)),
            Advance::Exhausted => Advance::Exhausted,
        }
    }
}

/// A stateful cursor yielding filtered regions.
pub trait Partition {
    type Elem;

    /// Unprocessed extent along the cursor's governing axis.
    fn remaining(&self) -> usize;

    /// Mask applied to every step.
    fn filter(&self) -> Filter;

    /// Move forward by `size` and return the selected regions.
    fn advance(&mut self, size: usize) -> Result<Advance<Regions<Self::Elem>>>;
}
