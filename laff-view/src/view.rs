//! Dynamic-rank aliasing views.
//!
//! A [`View`] is a window into a shared backing buffer described by dims,
//! strides and an offset. Every metadata transformation (slice, row, column,
//! transpose) is O(1) and yields a view over the same buffer:
//!
//! - Cloning a view clones the window, not the data
//! - Elements live in `Cell`s, so writes through `&View` are visible through
//!   every other view that covers the same cells
//! - The buffer is reference counted and freed with the last view
//!
//! Views are `!Send` and `!Sync`. Concurrent use needs external locking per
//! buffer.

use std::cell::Cell;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use num_traits::Zero;

use crate::{LaffError, Result};

// ============================================================================
// Validation helpers
// ============================================================================

/// Validate that all accessed offsets stay within `[0, len)`.
fn validate_bounds(len: usize, dims: &[usize], strides: &[isize], offset: isize) -> Result<()> {
    if dims.len() != strides.len() {
        return Err(LaffError::StrideLengthMismatch);
    }
    if dims.iter().any(|&d| d == 0) {
        return Ok(());
    }
    let mut min_offset = offset;
    let mut max_offset = offset;
    for (&dim, &stride) in dims.iter().zip(strides.iter()) {
        if dim > 1 {
            let end = stride
                .checked_mul(dim as isize - 1)
                .ok_or(LaffError::OffsetOverflow)?;
            if end >= 0 {
                max_offset = max_offset
                    .checked_add(end)
                    .ok_or(LaffError::OffsetOverflow)?;
            } else {
                min_offset = min_offset
                    .checked_add(end)
                    .ok_or(LaffError::OffsetOverflow)?;
            }
        }
    }
    if min_offset < 0 || max_offset < 0 || max_offset as usize >= len {
        return Err(LaffError::OffsetOverflow);
    }
    Ok(())
}

/// Compute row-major strides (last index varies fastest).
pub fn row_major_strides(dims: &[usize]) -> Vec<isize> {
    let rank = dims.len();
    if rank == 0 {
        return vec![];
    }
    let mut strides = vec![1isize; rank];
    for i in (0..rank - 1).rev() {
        strides[i] = strides[i + 1] * dims[i + 1] as isize;
    }
    strides
}

// ============================================================================
// View
// ============================================================================

/// Aliasing strided view over a shared, reference-counted buffer.
pub struct View<T> {
    buffer: Rc<[Cell<T>]>,
    dims: Rc<[usize]>,
    strides: Rc<[isize]>,
    offset: isize,
}

impl<T> Clone for View<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            dims: self.dims.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
        }
    }
}

impl<T> fmt::Debug for View<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("dims", &self.dims)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<T: Copy> View<T> {
    fn wrap(data: Vec<T>, dims: &[usize], strides: &[isize], offset: isize) -> Self {
        let buffer: Rc<[Cell<T>]> = data.into_iter().map(Cell::new).collect();
        Self {
            buffer,
            dims: Rc::from(dims),
            strides: Rc::from(strides),
            offset,
        }
    }

    /// Wrap `data` as a row-major array of shape `dims`.
    pub fn from_vec(data: Vec<T>, dims: &[usize]) -> Result<Self> {
        let total: usize = dims.iter().product();
        if data.len() != total {
            return Err(LaffError::ShapeMismatch(vec![data.len()], dims.to_vec()));
        }
        let strides = row_major_strides(dims);
        Ok(Self::wrap(data, dims, &strides, 0))
    }

    /// Wrap `data` with explicit strides and offset.
    pub fn from_parts(data: Vec<T>, dims: &[usize], strides: &[isize], offset: isize) -> Result<Self> {
        validate_bounds(data.len(), dims, strides, offset)?;
        Ok(Self::wrap(data, dims, strides, offset))
    }

    /// Create a row-major array with values produced by a function.
    ///
    /// The function is called with indices in row-major iteration order.
    pub fn from_fn(dims: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Self {
        let total: usize = dims.iter().product();
        let rank = dims.len();
        let mut data = Vec::with_capacity(total);
        let mut idx = vec![0usize; rank];
        for _ in 0..total {
            data.push(f(&idx));
            for d in (0..rank).rev() {
                idx[d] += 1;
                if idx[d] < dims[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        let strides = row_major_strides(dims);
        Self::wrap(data, dims, &strides, 0)
    }
}

impl<T: Copy + Zero> View<T> {
    /// Create a row-major array filled with zeros.
    pub fn zeros(dims: &[usize]) -> Self {
        let total: usize = dims.iter().product();
        let strides = row_major_strides(dims);
        Self::wrap(vec![T::zero(); total], dims, &strides, 0)
    }
}

impl<T> View<T> {
    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Offset of element `[0, .., 0]` in the backing buffer.
    #[inline]
    pub fn offset(&self) -> isize {
        self.offset
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dims.iter().product()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(|&d| d == 0)
    }

    /// Extent of axis 0 (1 for rank-0 views).
    #[inline]
    pub fn nrows(&self) -> usize {
        self.dims.first().copied().unwrap_or(1)
    }

    /// Extent of axis 1 (1 for views of rank below 2).
    #[inline]
    pub fn ncols(&self) -> usize {
        self.dims.get(1).copied().unwrap_or(1)
    }

    /// True for rank-1 views and for matrices with a unit dimension.
    pub fn is_vector(&self) -> bool {
        match self.dims.len() {
            1 => true,
            2 => self.dims[0] == 1 || self.dims[1] == 1,
            _ => false,
        }
    }

    /// Whether both views read and write the same backing buffer.
    #[inline]
    pub fn shares_buffer(&self, other: &View<T>) -> bool {
        Rc::ptr_eq(&self.buffer, &other.buffer)
    }

    fn element_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.dims.len()
            || indices.iter().zip(self.dims.iter()).any(|(&i, &d)| i >= d)
        {
            return Err(LaffError::IndexOutOfBounds {
                index: indices.to_vec(),
                dims: self.dims.to_vec(),
            });
        }
        let mut pos = self.offset;
        for (&index, &stride) in indices.iter().zip(self.strides.iter()) {
            pos += index as isize * stride;
        }
        Ok(pos as usize)
    }

    /// Visit the buffer offset of every element in row-major index order.
    fn for_each_offset(&self, mut f: impl FnMut(usize)) {
        if self.is_empty() {
            return;
        }
        let rank = self.dims.len();
        let mut idx = vec![0usize; rank];
        let mut pos = self.offset;
        loop {
            f(pos as usize);
            let mut d = rank;
            loop {
                if d == 0 {
                    return;
                }
                d -= 1;
                idx[d] += 1;
                pos += self.strides[d];
                if idx[d] < self.dims[d] {
                    break;
                }
                pos -= self.strides[d] * self.dims[d] as isize;
                idx[d] = 0;
            }
        }
    }

    /// Backing-buffer offset of every element, in row-major index order.
    ///
    /// Two views overlap exactly when these sets intersect and they
    /// [share a buffer](View::shares_buffer).
    pub fn offsets(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_offset(|pos| out.push(pos));
        out
    }

    fn vector_stride(&self) -> Result<isize> {
        match self.dims.len() {
            1 => Ok(self.strides[0]),
            2 if self.dims[0] == 1 => Ok(self.strides[1]),
            2 if self.dims[1] == 1 => Ok(self.strides[0]),
            _ => Err(LaffError::NotAVector(self.dims.to_vec())),
        }
    }

    /// Number of elements of a vector view, whatever its orientation.
    pub fn vector_len(&self) -> Result<usize> {
        if !self.is_vector() {
            return Err(LaffError::NotAVector(self.dims.to_vec()));
        }
        Ok(self.len())
    }

    fn vector_offset(&self, i: usize) -> Result<usize> {
        let stride = self.vector_stride()?;
        let n = self.len();
        if i >= n {
            return Err(LaffError::IndexOutOfBounds {
                index: vec![i],
                dims: vec![n],
            });
        }
        Ok((self.offset + i as isize * stride) as usize)
    }
}

// Element access
impl<T: Copy> View<T> {
    /// Read the element at `indices`.
    pub fn get(&self, indices: &[usize]) -> Result<T> {
        Ok(self.buffer[self.element_offset(indices)?].get())
    }

    /// Write the element at `indices`.
    ///
    /// Takes `&self`: the write is visible through every aliasing view.
    pub fn set(&self, indices: &[usize], value: T) -> Result<()> {
        self.buffer[self.element_offset(indices)?].set(value);
        Ok(())
    }

    /// Read element `i` of a vector view (row or column).
    pub fn vget(&self, i: usize) -> Result<T> {
        Ok(self.buffer[self.vector_offset(i)?].get())
    }

    /// Write element `i` of a vector view (row or column).
    pub fn vset(&self, i: usize, value: T) -> Result<()> {
        self.buffer[self.vector_offset(i)?].set(value);
        Ok(())
    }

    /// Set every element to `value`.
    pub fn fill(&self, value: T) {
        self.for_each_offset(|pos| self.buffer[pos].set(value));
    }

    /// Materialize the elements in row-major order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_offset(|pos| out.push(self.buffer[pos].get()));
        out
    }

    /// Deep copy into a fresh row-major buffer.
    pub fn to_owned_view(&self) -> View<T> {
        let strides = row_major_strides(&self.dims);
        View::wrap(self.to_vec(), &self.dims, &strides, 0)
    }
}

impl<T: Copy + PartialEq> View<T> {
    /// Deep value equality: same dims and same elements.
    ///
    /// This compares contents, not identity; see [`View::shares_buffer`].
    pub fn identical(&self, other: &View<T>) -> bool {
        self.dims == other.dims && self.to_vec() == other.to_vec()
    }
}

// Metadata transformations
impl<T> View<T> {
    /// Aliasing sub-view with one range per dimension.
    pub fn slice(&self, ranges: &[Range<usize>]) -> Result<View<T>> {
        let rank = self.dims.len();
        if ranges.len() != rank {
            return Err(LaffError::RankMismatch(ranges.len(), rank));
        }
        let mut dims = Vec::with_capacity(rank);
        let mut offset = self.offset;
        for (axis, range) in ranges.iter().enumerate() {
            let extent = self.dims[axis];
            if range.start > range.end || range.end > extent {
                return Err(LaffError::SliceOutOfBounds {
                    axis,
                    start: range.start,
                    end: range.end,
                    extent,
                });
            }
            dims.push(range.end - range.start);
            if range.start < range.end {
                offset += range.start as isize * self.strides[axis];
            }
        }
        Ok(View {
            buffer: self.buffer.clone(),
            dims: Rc::from(dims),
            strides: self.strides.clone(),
            offset,
        })
    }

    /// Slice a single axis, keeping the others whole.
    pub fn slice_axis(&self, axis: usize, range: Range<usize>) -> Result<View<T>> {
        let rank = self.dims.len();
        if axis >= rank {
            return Err(LaffError::InvalidAxis { axis, rank });
        }
        let ranges: Vec<Range<usize>> = (0..rank)
            .map(|d| if d == axis { range.clone() } else { 0..self.dims[d] })
            .collect();
        self.slice(&ranges)
    }

    /// Row `i` of a matrix as a 1×n view.
    pub fn row(&self, i: usize) -> Result<View<T>> {
        self.require_matrix()?;
        self.slice_axis(0, i..i + 1)
    }

    /// Column `j` of a matrix as an m×1 view.
    pub fn col(&self, j: usize) -> Result<View<T>> {
        self.require_matrix()?;
        self.slice_axis(1, j..j + 1)
    }

    /// Zero-copy transpose of a matrix (swaps dims and strides).
    pub fn transpose(&self) -> Result<View<T>> {
        self.require_matrix()?;
        Ok(View {
            buffer: self.buffer.clone(),
            dims: Rc::new([self.dims[1], self.dims[0]]),
            strides: Rc::new([self.strides[1], self.strides[0]]),
            offset: self.offset,
        })
    }

    fn require_matrix(&self) -> Result<()> {
        if self.dims.len() != 2 {
            return Err(LaffError::RankMismatch(self.dims.len(), 2));
        }
        Ok(())
    }
}

impl<T: Copy + fmt::Display> fmt::Display for View<T> {
    /// Nested-bracket rendering in row-major order, e.g. `[[1, 2], [3, 4]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level<T: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            dims: &[usize],
            values: &[T],
        ) -> fmt::Result {
            let Some((&first, rest)) = dims.split_first() else {
                return match values.first() {
                    Some(v) => write!(f, "{v}"),
                    None => Ok(()),
                };
            };
            let chunk: usize = rest.iter().product();
            write!(f, "[")?;
            for i in 0..first {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_level(f, rest, &values[i * chunk..(i + 1) * chunk])?;
            }
            write!(f, "]")
        }
        write_level(f, &self.dims, &self.to_vec())
    }
}

// ============================================================================
// Tests
// ============================================================================
