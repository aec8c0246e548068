//! Naive reference kernels over aliasing [`View`]s.
//!
//! These are the numeric primitives the partition-driven algorithms in `laff`
//! call on the sub-views a cursor hands back. Every kernel mutates its output
//! view in place, so the update lands in the buffer shared with the source
//! matrix.
//!
//! # Level 1 (vectors, any orientation)
//!
//! - [`scalv`], [`scal2v`]: `x := αx`, `y := αx`
//! - [`axpyv`]: `y := y + αx`
//! - [`copyv`], [`invertv`]: copy and element-wise reciprocal
//! - [`dotv`], [`dotv_into`], [`dotxv`], [`dotxv_into`], [`dotv_oriented`]: dot products
//!
//! # Level 2
//!
//! - [`ger`]: rank-1 update `A := A + α x yᵀ`
//!
//! # Level 3
//!
//! - [`gemm`]: `C := αAB + βC`
//! - [`trsm_left_lower_unit`], [`trsm_right_upper`]: triangular solves with
//!   multiple right-hand sides
//!
//! Operand length mismatches are reported as
//! [`LaffError::ShapeMismatch`] before anything is written.
//!
//! # Example
//!
//! ```rust
//! use laff_kernel::{dotv, scalv, View};
//!
//! let x = View::from_vec(vec![2.0, -1.0, 4.0, 2.0, 1.0], &[1, 5]).unwrap();
//! let y = View::from_vec(vec![1.0, -2.0, 2.0, 3.0, -1.0], &[5, 1]).unwrap();
//! assert_eq!(dotv(&x, &y).unwrap(), 17.0);
//!
//! scalv(5.0, &x).unwrap();
//! assert_eq!(x.to_vec(), vec![10.0, -5.0, 20.0, 10.0, 5.0]);
//! ```

mod level1;
mod level2;
mod level3;

pub use laff_traits::Scalar;
pub use laff_view::{LaffError, Result, View};

pub use level1::{
    axpyv, copyv, dotv, dotv_into, dotv_oriented, dotxv, dotxv_into, invertv, scal2v, scalv,
};
pub use level2::ger;
pub use level3::{gemm, trsm_left_lower_unit, trsm_right_upper};
