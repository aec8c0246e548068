//! Lockstep driver for two cursors.

use laff_view::{LaffError, Result};

use super::filter::Regions;
use super::{Advance, Partition};

/// Advances two cursors together and hands each step's regions to a closure.
///
/// The closure receives the first cursor's selected regions followed by the
/// second's. The run ends, without a further call, as soon as either cursor
/// has nothing left or the iteration limit is hit.
///
/// ```rust
/// use laff::{Direction, DirectionalPartition, Filter, SyncPartition, View};
///
/// let row = View::from_vec(vec![1.0, 2.0, 3.0], &[1, 3]).unwrap();
/// let col = View::from_vec(vec![4.0, 5.0, 6.0], &[3, 1]).unwrap();
/// let x = DirectionalPartition::new(row, Direction::LeftToRight)
///     .and_then(|p| p.with_filter(Filter::TAIL))
///     .unwrap();
/// let y = DirectionalPartition::new(col, Direction::TopToBottom)
///     .and_then(|p| p.with_filter(Filter::TAIL))
///     .unwrap();
///
/// let mut firsts = Vec::new();
/// let calls = SyncPartition::new(x, y)
///     .run(|regions| {
///         firsts.push(regions[0].to_vec());
///         Ok(())
///     })
///     .unwrap();
/// assert_eq!(calls, 3);
/// assert_eq!(firsts, vec![vec![2.0, 3.0], vec![3.0], vec![]]);
/// ```
#[derive(Debug, Clone)]
pub struct SyncPartition<P1, P2> {
    first: P1,
    second: P2,
    step: usize,
    limit: Option<usize>,
}

impl<P1, P2> SyncPartition<P1, P2>
where
    P1: Partition,
    P2: Partition<Elem = P1::Elem>,
{
    pub fn new(first: P1, second: P2) -> Self {
        Self {
            first,
            second,
            step: 1,
            limit: None,
        }
    }

    /// Part size passed to both cursors on every advance (default 1).
    ///
    /// A step of 0 makes [`run`](Self::run) fail before the first call.
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    /// Stop after at most `limit` closure calls.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn first(&self) -> &P1 {
        &self.first
    }

    pub fn second(&self) -> &P2 {
        &self.second
    }

    pub fn into_parts(self) -> (P1, P2) {
        (self.first, self.second)
    }

    /// Drive both cursors until one runs out; returns the number of calls.
    ///
    /// Errors from either cursor or from `f` end the run and are returned
    /// as is. Regions already written by earlier calls stay written.
    pub fn run<F>(&mut self, mut f: F) -> Result<usize>
    where
        F: FnMut(Regions<P1::Elem>) -> Result<()>,
    {
        // A zero step never moves either boundary.
        if self.step == 0 {
            return Err(LaffError::PartitionOutOfRange {
                requested: 0,
                remaining: self.first.remaining().min(self.second.remaining()),
            });
        }
        let mut calls = 0usize;
        loop {
            if self.limit.is_some_and(|limit| calls >= limit) {
                break;
            }
            if self.first.remaining() == 0 || self.second.remaining() == 0 {
                break;
            }
            let first = match self.first.advance(self.step)? {
                Advance::Step(regions) => regions,
                Advance::Exhausted => break,
            };
            let second = match self.second.advance(self.step)? {
                Advance::Step(regions) => regions,
                Advance::Exhausted => break,
            };
            f(first.concat(second))?;
            calls += 1;
        }
        tracing::debug!(
            calls,
            step = self.step,
            first_remaining = self.first.remaining(),
            second_remaining = self.second.remaining(),
            "sync partition finished"
        );
        Ok(calls)
    }
}
