//! Partition-driven algorithms: unpivoted LU and triangular solves.
//!
//! Every routine works in place on the views it is given. None of them roll
//! back on failure: when a kernel call errors halfway, the buffer keeps the
//! updates made so far.

use laff_kernel::{gemm, ger, scalv, trsm_left_lower_unit, trsm_right_upper};
use laff_traits::Scalar;
use laff_view::{LaffError, Result, View};

use crate::partition::{
    Advance, Direction, DirectionalPartition, Filter, Partition, SixWayPartition, SyncPartition,
};

/// Options for [`lu_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LuOptions {
    /// Diagonal block size. `1` runs the unblocked variant.
    pub block_size: usize,
    /// Fail with `NumericDegeneracy` when a pivot's magnitude is at or below
    /// this value. `None` divides by whatever the pivot is.
    pub pivot_tolerance: Option<f64>,
}

impl Default for LuOptions {
    fn default() -> Self {
        Self {
            block_size: 1,
            pivot_tolerance: None,
        }
    }
}

impl LuOptions {
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = Some(tolerance);
        self
    }
}

/// In-place unpivoted LU with default options.
///
/// On return the strictly lower part of `a` holds `L` (unit diagonal
/// implied) and the upper part holds `U`. A zero pivot is not detected and
/// fills the rest of the factorization with `inf`/`NaN`; use [`lu_with`]
/// and [`LuOptions::with_pivot_tolerance`] to get an error instead.
///
/// ```rust
/// use laff::{lu, View};
///
/// let a = View::from_vec(vec![2.0, 1.0, 4.0, 5.0], &[2, 2]).unwrap();
/// lu(&a).unwrap();
/// assert_eq!(a.to_vec(), vec![2.0, 1.0, 2.0, 3.0]);
/// ```
pub fn lu<T: Scalar>(a: &View<T>) -> Result<()> {
    lu_with(a, &LuOptions::default())
}

/// In-place unpivoted LU, unblocked or blocked depending on `opts`.
#[tracing::instrument(skip_all, fields(dims = ?a.dims(), block_size = opts.block_size))]
pub fn lu_with<T: Scalar>(a: &View<T>, opts: &LuOptions) -> Result<()> {
    if opts.block_size <= 1 {
        lu_unblocked(a, opts.pivot_tolerance, 0)
    } else {
        lu_blocked(a, opts.block_size, opts.pivot_tolerance)
    }
}

fn check_pivot<T: Scalar>(pivot: T, index: usize, tolerance: Option<f64>) -> Result<()> {
    if let Some(tolerance) = tolerance {
        let magnitude = pivot.magnitude();
        if magnitude.is_nan() || magnitude <= tolerance {
            return Err(LaffError::NumericDegeneracy { index, magnitude });
        }
    }
    Ok(())
}

/// `base` shifts pivot indices reported in errors when `a` is a diagonal
/// block of a larger matrix.
fn lu_unblocked<T: Scalar>(a: &View<T>, tolerance: Option<f64>, base: usize) -> Result<()> {
    let mut part = SixWayPartition::new(a.clone())?;
    loop {
        let k = part.diagonal_index();
        let [diag, l21, a12, a22] = match part.advance(1)? {
            Advance::Step(regions) => regions.into_array()?,
            Advance::Exhausted => break,
        };
        let pivot = diag.get(&[0, 0])?;
        check_pivot(pivot, base + k, tolerance)?;

        scalv(T::one() / pivot, &l21)?;
        ger(-T::one(), &l21, &a12.transpose()?, &a22)?;
        tracing::debug!(k = base + k, "lu step");
    }
    Ok(())
}

fn lu_blocked<T: Scalar>(a: &View<T>, block_size: usize, tolerance: Option<f64>) -> Result<()> {
    let mut part = SixWayPartition::new(a.clone())?;
    loop {
        let k = part.diagonal_index();
        let step = block_size.min(part.remaining());
        let [a11, a21, a12, a22] = match part.advance(step)? {
            Advance::Step(regions) => regions.into_array()?,
            Advance::Exhausted => break,
        };

        lu_unblocked(&a11, tolerance, k)?;
        trsm_left_lower_unit(&a11, &a12)?;
        trsm_right_upper(&a11, &a21)?;
        gemm(-T::one(), &a21, &a12, T::one(), &a22)?;
        tracing::debug!(k, step, "blocked lu step");
    }
    Ok(())
}

/// Split a packed LU result into `L` (m×d, unit diagonal) and `U` (d×n),
/// with `d = min(m, n)`. Both are fresh buffers.
pub fn unpack_lu<T: Scalar>(a: &View<T>) -> Result<(View<T>, View<T>)> {
    if a.ndim() != 2 {
        return Err(LaffError::RankMismatch(a.ndim(), 2));
    }
    let (m, n) = (a.nrows(), a.ncols());
    let d = m.min(n);
    let packed = a.to_vec();

    let l = View::from_fn(&[m, d], |idx| {
        let (i, j) = (idx[0], idx[1]);
        if i == j {
            T::one()
        } else if i > j {
            packed[i * n + j]
        } else {
            T::zero()
        }
    });
    let u = View::from_fn(&[d, n], |idx| {
        let (i, j) = (idx[0], idx[1]);
        if i <= j {
            packed[i * n + j]
        } else {
            T::zero()
        }
    });
    Ok((l, u))
}

/// Row count `b` must have to pair with the square triangular matrix `t`.
fn triangular_system<T>(t: &View<T>, b: &View<T>) -> Result<usize> {
    if t.ndim() != 2 {
        return Err(LaffError::RankMismatch(t.ndim(), 2));
    }
    let (rows, cols) = (t.nrows(), t.ncols());
    if rows != cols {
        return Err(LaffError::NonSquare { rows, cols });
    }
    if b.ndim() != 2 {
        return Err(LaffError::RankMismatch(b.ndim(), 2));
    }
    if b.nrows() != rows {
        return Err(LaffError::ShapeMismatch(t.dims().to_vec(), b.dims().to_vec()));
    }
    Ok(rows)
}

/// Forward substitution `B := L⁻¹B` for unit lower triangular `L`.
///
/// Reads only the strictly lower part of `l`, so a packed LU result works
/// as is. `b` is n×r and is overwritten with the solution.
pub fn solve_unit_lower<T: Scalar>(l: &View<T>, b: &View<T>) -> Result<()> {
    triangular_system(l, b)?;
    let columns = SixWayPartition::new(l.clone())?.with_filter(Filter::COLUMN_STRIP)?;
    let rows = DirectionalPartition::new(b.clone(), Direction::TopToBottom)?
        .with_filter(Filter::HEAD | Filter::TAIL)?;

    SyncPartition::new(columns, rows).run(|regions| {
        let [l21, b_head, b_tail] = regions.into_array()?;
        let b1 = b_head.row(b_head.nrows() - 1)?;
        ger(-T::one(), &l21, &b1, &b_tail)
    })?;
    Ok(())
}

/// Backward substitution `B := U⁻¹B` for upper triangular `U`.
///
/// Reads only the upper part of `u`, diagonal included. A zero on the
/// diagonal divides by zero.
pub fn solve_upper<T: Scalar>(u: &View<T>, b: &View<T>) -> Result<()> {
    let n = triangular_system(u, b)?;
    let columns = DirectionalPartition::new(u.clone(), Direction::RightToLeft)?
        .with_filter(Filter::TAIL)?;
    let rows = DirectionalPartition::new(b.clone(), Direction::BottomToTop)?
        .with_filter(Filter::HEAD | Filter::TAIL)?;

    SyncPartition::new(columns, rows).run(|regions| {
        let [u_tail, b_head, b_tail] = regions.into_array()?;
        let k = n - u_tail.ncols();
        let u_col = u_tail.col(0)?;
        let u11 = u_col.get(&[k, 0])?;
        let u01 = u_col.slice(&[0..k, 0..1])?;
        let b1 = b_tail.row(0)?;

        scalv(T::one() / u11, &b1)?;
        ger(-T::one(), &u01, &b1, &b_head)
    })?;
    Ok(())
}

/// Solve `A X = B` in place given the packed output of [`lu`] on square `A`.
pub fn lu_solve<T: Scalar>(factored: &View<T>, b: &View<T>) -> Result<()> {
    solve_unit_lower(factored, b)?;
    solve_upper(factored, b)
}

/// Dot product of a 1×n row and an n×1 column, walking both from the end.
pub fn dot_by_partition<T: Scalar>(x: &View<T>, y: &View<T>) -> Result<T> {
    let row_ok = x.ndim() == 2 && x.nrows() == 1;
    let col_ok = y.ndim() == 2 && y.ncols() == 1;
    if !row_ok || !col_ok || x.ncols() != y.nrows() {
        return Err(LaffError::ShapeMismatch(x.dims().to_vec(), y.dims().to_vec()));
    }

    let xs = DirectionalPartition::new(x.clone(), Direction::RightToLeft)?
        .with_filter(Filter::TAIL)?;
    let ys = DirectionalPartition::new(y.clone(), Direction::BottomToTop)?
        .with_filter(Filter::TAIL)?;
    let mut sum = T::zero();
    SyncPartition::new(xs, ys).run(|regions| {
        let [x_tail, y_tail] = regions.into_array()?;
        sum = sum + x_tail.vget(0)? * y_tail.vget(0)?;
        Ok(())
    })?;
    Ok(sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use num_complex::Complex64;

    fn mat(rows: usize, cols: usize, data: &[f64]) -> View<f64> {
        View::from_vec(data.to_vec(), &[rows, cols]).unwrap()
    }

    fn product(l: &View<f64>, u: &View<f64>) -> View<f64> {
        let c = View::zeros(&[l.nrows(), u.ncols()]);
        gemm(1.0, l, u, 0.0, &c).unwrap();
        c
    }

    #[test]
    fn test_lu_two_by_two() {
        let a = mat(2, 2, &[4.0, 3.0, 6.0, 3.0]);
        lu(&a).unwrap();
        assert_eq!(a.to_vec(), vec![4.0, 3.0, 1.5, -1.5]);
    }

    #[test]
    fn test_lu_reconstructs() {
        let data = [2.0, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0];
        let a = mat(3, 3, &data);
        lu(&a).unwrap();
        let (l, u) = unpack_lu(&a).unwrap();
        let back = product(&l, &u);
        for (got, want) in back.to_vec().iter().zip(data.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_blocked_matches_unblocked() {
        let data: Vec<f64> = (0..25)
            .map(|i| if i % 6 == 0 { 20.0 } else { (i % 7) as f64 - 3.0 })
            .collect();
        let a = mat(5, 5, &data);
        let b = mat(5, 5, &data);
        lu(&a).unwrap();
        lu_with(&b, &LuOptions::default().with_block_size(2)).unwrap();
        for (x, y) in a.to_vec().iter().zip(b.to_vec().iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_lu_rectangular() {
        let data = [2.0, 1.0, 3.0, 4.0, 5.0, 6.0];
        let tall = mat(3, 2, &data);
        lu(&tall).unwrap();
        let (l, u) = unpack_lu(&tall).unwrap();
        assert_eq!(l.dims(), &[3, 2]);
        assert_eq!(u.dims(), &[2, 2]);
        for (got, want) in product(&l, &u).to_vec().iter().zip(data.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_pivot_default_is_unchecked() {
        let a = mat(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        lu(&a).unwrap();
        assert!(a.get(&[1, 0]).unwrap().is_infinite());
    }

    #[test]
    fn test_zero_pivot_with_tolerance() {
        let a = mat(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 1.0, 1.0, 1.0, 1.0]);
        let err = lu_with(&a, &LuOptions::default().with_pivot_tolerance(1e-12)).unwrap_err();
        assert!(matches!(err, LaffError::NumericDegeneracy { index: 1, .. }));

        let b = mat(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 1.0, 1.0, 1.0, 1.0]);
        let opts = LuOptions::default()
            .with_block_size(2)
            .with_pivot_tolerance(1e-12);
        assert!(matches!(
            lu_with(&b, &opts),
            Err(LaffError::NumericDegeneracy { index: 1, .. })
        ));
    }

    #[test]
    fn test_lu_requires_matrix() {
        let v = View::<f64>::zeros(&[3]);
        assert!(matches!(lu(&v), Err(LaffError::RankMismatch(1, 2))));
    }

    #[test]
    fn test_lu_complex() {
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let a = View::from_vec(vec![2.0 * one, i, 4.0 * i, one], &[2, 2]).unwrap();
        lu(&a).unwrap();
        // l21 = 4i / 2 = 2i, u22 = 1 - 2i * i = 3
        assert_eq!(a.get(&[1, 0]).unwrap(), 2.0 * i);
        assert_eq!(a.get(&[1, 1]).unwrap(), 3.0 * one);
    }

    #[test]
    fn test_solve_unit_lower() {
        // L = [[1, 0, 0], [2, 1, 0], [-1, 3, 1]], x = [1, 2, 3]
        let l = mat(3, 3, &[9.0, 9.0, 9.0, 2.0, 9.0, 9.0, -1.0, 3.0, 9.0]);
        let b = mat(3, 1, &[1.0, 4.0, 8.0]);
        solve_unit_lower(&l, &b).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_solve_upper() {
        // U = [[2, 1, -1], [0, 3, 2], [0, 0, 4]], x = [1, -1, 2]
        let u = mat(3, 3, &[2.0, 1.0, -1.0, 7.0, 3.0, 2.0, 7.0, 7.0, 4.0]);
        let b = mat(3, 1, &[-1.0, 1.0, 8.0]);
        solve_upper(&u, &b).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, -1.0, 2.0]);
    }

    #[test]
    fn test_solve_multiple_right_hand_sides() {
        let u = mat(2, 2, &[2.0, 1.0, 0.0, 4.0]);
        let b = mat(2, 2, &[3.0, 4.0, 4.0, 8.0]);
        solve_upper(&u, &b).unwrap();
        assert_eq!(b.to_vec(), vec![1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_lu_solve() {
        let a = mat(3, 3, &[2.0, 1.0, 1.0, 4.0, -6.0, 0.0, -2.0, 7.0, 2.0]);
        // A * [1, 2, 3] = [7, -8, 18]
        let b = mat(3, 1, &[7.0, -8.0, 18.0]);
        lu(&a).unwrap();
        lu_solve(&a, &b).unwrap();
        for (got, want) in b.to_vec().iter().zip([1.0, 2.0, 3.0].iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_solve_shape_errors() {
        let l = mat(2, 3, &[0.0; 6]);
        let b = mat(2, 1, &[0.0; 2]);
        assert!(matches!(
            solve_unit_lower(&l, &b),
            Err(LaffError::NonSquare { rows: 2, cols: 3 })
        ));
        let u = mat(2, 2, &[1.0; 4]);
        let b = mat(3, 1, &[0.0; 3]);
        assert!(matches!(
            solve_upper(&u, &b),
            Err(LaffError::ShapeMismatch(_, _))
        ));
    }

    #[test]
    fn test_dot_by_partition() {
        let x = mat(1, 5, &[2.0, -1.0, 4.0, 2.0, 1.0]);
        let y = mat(5, 1, &[1.0, -2.0, 2.0, 3.0, -1.0]);
        assert_eq!(dot_by_partition(&x, &y).unwrap(), 17.0);
        assert!(dot_by_partition(&y, &x).is_err());
    }
}
