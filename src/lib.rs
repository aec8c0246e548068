//! Partition-driven dense linear algebra over aliasing views.
//!
//! Algorithms are written the way they are drawn on paper: a cursor splits a
//! matrix into the part already processed and the part still to go, a
//! kernel updates the regions of the current step, and the cursor moves on.
//! Every region is an aliasing [`View`] into the same buffer, so kernel
//! writes land directly in the source matrix.
//!
//! # Core Types
//!
//! - [`View`]: reference-counted strided view, interior-mutable through `&self`
//! - [`DirectionalPartition`]: two-way split along rows or columns
//! - [`SixWayPartition`]: diagonal split into corner, strips and trailing block
//! - [`SyncPartition`]: drives two cursors in lockstep
//! - [`Filter`] / [`Regions`]: choose and unpack the regions of a step
//!
//! # Kernels
//!
//! Level 1/2/3 kernels ([`scalv`], [`axpyv`], [`dotv`], [`ger`], [`gemm`], ...)
//! come from `laff-kernel` and are re-exported here.
//!
//! # Algorithms
//!
//! - [`lu`], [`lu_with`]: unpivoted LU, unblocked or blocked ([`LuOptions`])
//! - [`unpack_lu`]: split the packed factors
//! - [`solve_unit_lower`], [`solve_upper`], [`lu_solve`]: triangular solves
//! - [`dot_by_partition`]: a dot product written as a lockstep walk
//!
//! # Example
//!
//! ```rust
//! use laff::{lu, lu_solve, View};
//!
//! let a = View::from_vec(vec![2.0_f64, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0], &[3, 3]).unwrap();
//! let b = View::from_vec(vec![7.0, -8.0, 18.0], &[3, 1]).unwrap();
//!
//! lu(&a).unwrap();
//! lu_solve(&a, &b).unwrap();
//!
//! let x = b.to_vec();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 2.0).abs() < 1e-12);
//! assert!((x[2] - 3.0).abs() < 1e-12);
//! ```
//!
//! # Threading
//!
//! Views share their buffer through `Rc<[Cell<T>]>`, so they are neither
//! `Send` nor `Sync`. All work happens on the calling thread.

pub mod linalg;
pub mod partition;

pub use laff_kernel::{
    axpyv, copyv, dotv, dotv_into, dotv_oriented, dotxv, dotxv_into, gemm, ger, invertv, scal2v,
    scalv, trsm_left_lower_unit, trsm_right_upper,
};
pub use laff_traits::Scalar;
pub use laff_view::{row_major_strides, LaffError, Result, View};

pub use linalg::{
    dot_by_partition, lu, lu_solve, lu_with, solve_unit_lower, solve_upper, unpack_lu, LuOptions,
};
pub use partition::{
    part_by_column_lr, part_by_column_rl, part_by_row_bt, part_by_row_tb, Advance, Direction,
    DirectionalPartition, Filter, Halves, Partition, Regions, SixWay, SixWayPartition,
    SyncPartition,
};
