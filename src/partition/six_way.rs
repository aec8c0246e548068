//! Diagonal cursor splitting a matrix around a moving corner block.

use laff_view::{LaffError, Result, View};

use super::filter::{Filter, Regions};
use super::{Advance, Partition};

/// All six regions of one diagonal step at `k` with step `b` (`e = k + b`).
///
/// ```text
///        0..k      k..e          e..n
///      +--------+-------------------------+
/// 0..k | done   |          above          |
///      +--------+--------+----------------+
/// k..e |        | corner |   row_strip    |
///      |  left  +--------+----------------+
/// e..m |        | column |   trailing     |
///      |        | strip  |                |
///      +--------+--------+----------------+
/// ```
///
/// Together with the processed block `[0..k, 0..k]` the six regions tile
/// the matrix exactly.
#[derive(Debug, Clone)]
pub struct SixWay<T> {
    /// `[0..k, k..n]`
    pub above: View<T>,
    /// `[k..m, 0..k]`
    pub left: View<T>,
    /// `[k..e, k..e]`
    pub corner: View<T>,
    /// `[e..m, k..e]`
    pub column_strip: View<T>,
    /// `[k..e, e..n]`
    pub row_strip: View<T>,
    /// `[e..m, e..n]`
    pub trailing: View<T>,
}

impl<T> SixWay<T> {
    pub fn select(self, filter: Filter) -> Regions<T> {
        filter.select([
            self.above,
            self.left,
            self.corner,
            self.column_strip,
            self.row_strip,
            self.trailing,
        ])
    }
}

/// Stateful diagonal cursor over a 2-D view.
///
/// The default filter returns corner, column strip, row strip and trailing
/// block, in that order. `remaining` counts diagonal positions left out of
/// `min(rows, cols)`.
///
/// ```rust
/// use laff::{Partition, SixWayPartition, View};
///
/// let a = View::from_vec((1..=9).map(f64::from).collect(), &[3, 3]).unwrap();
/// let mut part = SixWayPartition::new(a).unwrap();
///
/// let regions = part.advance(1).unwrap().into_result().unwrap();
/// let [corner, col, row, trailing] = regions.into_array().unwrap();
/// assert_eq!(corner.to_vec(), vec![1.0]);
/// assert_eq!(col.to_vec(), vec![4.0, 7.0]);
/// assert_eq!(row.to_vec(), vec![2.0, 3.0]);
/// assert_eq!(trailing.to_vec(), vec![5.0, 6.0, 8.0, 9.0]);
/// assert_eq!(part.remaining(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SixWayPartition<T> {
    view: View<T>,
    k: usize,
    extent: usize,
    filter: Filter,
}

impl<T> SixWayPartition<T> {
    /// Mask the cursor uses unless told otherwise.
    pub const DEFAULT_MASK: u8 =
        Filter::CORNER | Filter::COLUMN_STRIP | Filter::ROW_STRIP | Filter::TRAILING;

    pub fn new(view: View<T>) -> Result<Self> {
        if view.ndim() != 2 {
            return Err(LaffError::RankMismatch(view.ndim(), 2));
        }
        let extent = view.nrows().min(view.ncols());
        Ok(Self {
            view,
            k: 0,
            extent,
            filter: Filter::new(Self::DEFAULT_MASK, Filter::SIX_WAY)?,
        })
    }

    /// Replace the region mask (six bits: above, left, corner, column strip,
    /// row strip, trailing).
    pub fn with_filter(mut self, mask: u8) -> Result<Self> {
        self.filter = Filter::new(mask, Filter::SIX_WAY)?;
        Ok(self)
    }

    /// Current diagonal position `k`.
    #[inline]
    pub fn diagonal_index(&self) -> usize {
        self.k
    }

    /// `min(rows, cols)` of the underlying view.
    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn view(&self) -> &View<T> {
        &self.view
    }

    /// Regions at the current diagonal position, then move it by `step`.
    ///
    /// `step` must be in `1..=remaining`; otherwise the cursor is left
    /// unchanged and `PartitionOutOfRange` is returned.
    pub fn advance_named(&mut self, step: usize) -> Result<Advance<SixWay<T>>> {
        let remaining = self.extent - self.k;
        if remaining == 0 {
            tracing::trace!(extent = self.extent, "six-way partition exhausted");
            return Ok(Advance::Exhausted);
        }
        if step == 0 || step > remaining {
            return Err(LaffError::PartitionOutOfRange {
                requested: step,
                remaining,
            });
        }

        let (m, n) = (self.view.nrows(), self.view.ncols());
        let k = self.k;
        let e = k + step;
        let regions = SixWay {
            above: self.view.slice(&[0..k, k..n])?,
            left: self.view.slice(&[k..m, 0..k])?,
            corner: self.view.slice(&[k..e, k..e])?,
            column_strip: self.view.slice(&[e..m, k..e])?,
            row_strip: self.view.slice(&[k..e, e..n])?,
            trailing: self.view.slice(&[e..m, e..n])?,
        };
        self.k = e;
        tracing::trace!(k, step, extent = self.extent, "six-way partition step");
        Ok(Advance::Step(regions))
    }
}

impl<T> Partition for SixWayPartition<T> {
    type Elem = T;

    fn remaining(&self) -> usize {
        self.extent - self.k
    }

    fn filter(&self) -> Filter {
        self.filter
    }

    fn advance(&mut self, step: usize) -> Result<Advance<Regions<T>>> {
        let filter = self.filter;
        Ok(self.advance_named(step)?.map(|six| six.select(filter)))
    }
}
