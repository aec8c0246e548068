//! Two-way partitions along rows or columns.

use laff_view::{LaffError, Result, View};

use super::filter::{Filter, Regions};
use super::{Advance, Partition};

/// Which axis a two-way cursor walks and from which end it consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Rows, consumed from index 0 upward.
    TopToBottom,
    /// Rows, consumed from the last index downward.
    BottomToTop,
    /// Columns, consumed from index 0 upward.
    LeftToRight,
    /// Columns, consumed from the last index downward.
    RightToLeft,
}

impl Direction {
    /// Axis the cursor splits: 0 for rows, 1 for columns.
    #[inline]
    pub fn axis(self) -> usize {
        match self {
            Direction::TopToBottom | Direction::BottomToTop => 0,
            Direction::LeftToRight | Direction::RightToLeft => 1,
        }
    }

    /// True when growth starts at index 0.
    #[inline]
    pub fn is_forward(self) -> bool {
        matches!(self, Direction::TopToBottom | Direction::LeftToRight)
    }
}

/// Both halves of a two-way step.
///
/// Named by index side, not by consumption order: `head` is always the
/// top/left (lower-index) region, for backward directions too.
#[derive(Debug, Clone)]
pub struct Halves<T> {
    pub head: View<T>,
    pub tail: View<T>,
}

impl<T> Halves<T> {
    pub fn select(self, filter: Filter) -> Regions<T> {
        filter.select([self.head, self.tail])
    }
}

/// Stateful head/tail cursor over one axis of a view.
///
/// ```rust
/// use laff::{Direction, DirectionalPartition, Partition, View};
///
/// let v = View::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[1, 4]).unwrap();
/// let mut part = DirectionalPartition::new(v, Direction::RightToLeft).unwrap();
///
/// let halves = part.advance_named(1).unwrap().into_result().unwrap();
/// assert_eq!(halves.head.to_vec(), vec![1.0, 2.0, 3.0]);
/// assert_eq!(halves.tail.to_vec(), vec![4.0]);
/// assert_eq!(part.remaining(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DirectionalPartition<T> {
    view: View<T>,
    direction: Direction,
    boundary: usize,
    extent: usize,
    filter: Filter,
}

impl<T> DirectionalPartition<T> {
    /// Start a cursor at the end `direction` consumes from.
    pub fn new(view: View<T>, direction: Direction) -> Result<Self> {
        let axis = direction.axis();
        let rank = view.ndim();
        if axis >= rank {
            return Err(LaffError::InvalidAxis { axis, rank });
        }
        let extent = view.dims()[axis];
        let boundary = if direction.is_forward() { 0 } else { extent };
        Ok(Self {
            view,
            direction,
            boundary,
            extent,
            filter: Filter::all(Filter::TWO_WAY),
        })
    }

    /// Restrict steps to the regions in `mask` (`0b10` head, `0b01` tail).
    pub fn with_filter(mut self, mask: u8) -> Result<Self> {
        self.filter = Filter::new(mask, Filter::TWO_WAY)?;
        Ok(self)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Split position on the active axis: head is `[0, boundary)`.
    #[inline]
    pub fn boundary(&self) -> usize {
        self.boundary
    }

    #[inline]
    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn view(&self) -> &View<T> {
        &self.view
    }

    /// Move the boundary by `part_size` and return both halves.
    ///
    /// `part_size == 0` re-splits at the current boundary. Asking for more
    /// than [`remaining`](Partition::remaining) fails with
    /// `PartitionOutOfRange` and leaves the cursor untouched.
    pub fn advance_named(&mut self, part_size: usize) -> Result<Advance<Halves<T>>> {
        let remaining = self.remaining_extent();
        if remaining == 0 {
            tracing::trace!(direction = ?self.direction, "directional partition exhausted");
            return Ok(Advance::Exhausted);
        }
        if part_size > remaining {
            return Err(LaffError::PartitionOutOfRange {
                requested: part_size,
                remaining,
            });
        }

        if self.direction.is_forward() {
            self.boundary += part_size;
        } else {
            self.boundary -= part_size;
        }
        let axis = self.direction.axis();
        let head = self.view.slice_axis(axis, 0..self.boundary)?;
        let tail = self.view.slice_axis(axis, self.boundary..self.extent)?;
        tracing::trace!(
            direction = ?self.direction,
            boundary = self.boundary,
            extent = self.extent,
            "directional partition step"
        );
        Ok(Advance::Step(Halves { head, tail }))
    }

    fn remaining_extent(&self) -> usize {
        if self.direction.is_forward() {
            self.extent - self.boundary
        } else {
            self.boundary
        }
    }
}

impl<T> Partition for DirectionalPartition<T> {
    type Elem = T;

    fn remaining(&self) -> usize {
        self.remaining_extent()
    }

    fn filter(&self) -> Filter {
        self.filter
    }

    fn advance(&mut self, part_size: usize) -> Result<Advance<Regions<T>>> {
        let filter = self.filter;
        Ok(self
            .advance_named(part_size)?
            .map(|halves| halves.select(filter)))
    }
}

fn split_once<T>(
    view: &View<T>,
    direction: Direction,
    part_size: usize,
    mask: u8,
) -> Result<Regions<T>> {
    DirectionalPartition::new(view.clone(), direction)?
        .with_filter(mask)?
        .advance(part_size)?
        .into_result()
}

/// One-shot split: top `part_size` rows and the rest.
pub fn part_by_row_tb<T>(view: &View<T>, part_size: usize, mask: u8) -> Result<Regions<T>> {
    split_once(view, Direction::TopToBottom, part_size, mask)
}

/// One-shot split: bottom `part_size` rows (tail) and the rest (head).
pub fn part_by_row_bt<T>(view: &View<T>, part_size: usize, mask: u8) -> Result<Regions<T>> {
    split_once(view, Direction::BottomToTop, part_size, mask)
}

/// One-shot split: left `part_size` columns and the rest.
pub fn part_by_column_lr<T>(view: &View<T>, part_size: usize, mask: u8) -> Result<Regions<T>> {
    split_once(view, Direction::LeftToRight, part_size, mask)
}

/// One-shot split: right `part_size` columns (tail) and the rest (head).
pub fn part_by_column_rl<T>(view: &View<T>, part_size: usize, mask: u8) -> Result<Regions<T>> {
    split_once(view, Direction::RightToLeft, part_size, mask)
}
