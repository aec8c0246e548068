//! Aliasing strided views over shared buffers.
//!
//! This crate provides the [`View`] type the partition engine in `laff` is
//! built on: a window (offset, dims, strides) into a reference-counted backing
//! buffer. Partitioning a view never copies element data, and every view cut
//! from the same source observes writes made through any other one.
//!
//! # Core Types
//!
//! - [`View`]: dynamic-rank aliasing view with interior-mutable elements
//! - [`LaffError`] / [`Result`]: the error type shared by every laff crate
//!
//! # Example
//!
//! ```rust
//! use laff_view::View;
//!
//! let a = View::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
//! let right = a.slice(&[0..2, 1..3]).unwrap();
//! right.set(&[0, 0], 20.0).unwrap();
//!
//! // Writes through the sub-view are visible through the source.
//! assert_eq!(a.get(&[0, 1]).unwrap(), 20.0);
//! assert!(a.shares_buffer(&right));
//! ```

pub mod view;

pub use laff_traits::Scalar;
pub use view::{row_major_strides, View};

// ============================================================================
// Error types
// ============================================================================

/// Errors that can occur while building, indexing or partitioning views and
/// while running kernels over them.
#[derive(Debug, thiserror::Error)]
pub enum LaffError {
    /// Array ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Array shapes are incompatible for the operation.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// A vector operand was required.
    #[error("not a vector: dims {0:?}")]
    NotAVector(Vec<usize>),

    /// Matrix is not square when a square matrix was required.
    #[error("non-square matrix: rows={rows}, cols={cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Invalid axis index for the given array rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Stride array length doesn't match dimensions.
    #[error("stride and dims length mismatch")]
    StrideLengthMismatch,

    /// Integer overflow or out-of-buffer access while computing an offset.
    #[error("offset overflow while computing element position")]
    OffsetOverflow,

    /// Element index outside the view.
    #[error("index {index:?} out of bounds for dims {dims:?}")]
    IndexOutOfBounds { index: Vec<usize>, dims: Vec<usize> },

    /// Slice range outside the view along `axis`.
    #[error("slice {start}..{end} out of bounds for axis {axis} of extent {extent}")]
    SliceOutOfBounds {
        axis: usize,
        start: usize,
        end: usize,
        extent: usize,
    },

    /// A partition step asked for more than the unprocessed extent.
    #[error("partition step of {requested} exceeds remaining extent {remaining}")]
    PartitionOutOfRange { requested: usize, remaining: usize },

    /// A partition cursor was advanced past its terminal state.
    #[error("partition exhausted")]
    Exhausted,

    /// Filter mask has bits beyond the regions a cursor exposes.
    #[error("filter {mask:#b} selects beyond {width} regions")]
    InvalidFilter { mask: u8, width: u32 },

    /// Pivot at `index` is zero or below the configured tolerance.
    #[error("degenerate pivot at diagonal index {index} (magnitude {magnitude})")]
    NumericDegeneracy { index: usize, magnitude: f64 },
}

/// Result type for view, kernel and partition operations.
pub type Result<T> = std::result::Result<T, LaffError>;
