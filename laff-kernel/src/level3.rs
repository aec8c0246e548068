//! Level-3 kernels: matrix-matrix operations used by blocked algorithms.

use laff_traits::Scalar;
use laff_view::{LaffError, Result, View};

fn matrix_dims<T>(a: &View<T>) -> Result<(usize, usize)> {
    if a.ndim() != 2 {
        return Err(LaffError::RankMismatch(a.ndim(), 2));
    }
    Ok((a.dims()[0], a.dims()[1]))
}

fn square_dim<T>(a: &View<T>) -> Result<usize> {
    let (rows, cols) = matrix_dims(a)?;
    if rows != cols {
        return Err(LaffError::NonSquare { rows, cols });
    }
    Ok(rows)
}

/// gemm: C = α * A * B + β * C
///
/// `C` must not overlap `A` or `B`.
pub fn gemm<T: Scalar>(alpha: T, a: &View<T>, b: &View<T>, beta: T, c: &View<T>) -> Result<()> {
    let (m, k1) = matrix_dims(a)?;
    let (k2, n) = matrix_dims(b)?;
    let (cm, cn) = matrix_dims(c)?;

    if k1 != k2 {
        return Err(LaffError::ShapeMismatch(vec![m, k1], vec![k2, n]));
    }
    if cm != m || cn != n {
        return Err(LaffError::ShapeMismatch(vec![m, n], vec![cm, cn]));
    }
    tracing::trace!(m, n, k = k1, "gemm");

    for i in 0..m {
        for j in 0..n {
            let mut sum = T::zero();
            for l in 0..k1 {
                sum = sum + a.get(&[i, l])? * b.get(&[l, j])?;
            }
            let value = if beta.is_zero() {
                alpha * sum
            } else {
                alpha * sum + beta * c.get(&[i, j])?
            };
            c.set(&[i, j], value)?;
        }
    }
    Ok(())
}

/// B = L⁻¹ * B for unit lower triangular `L` (k×k) and `B` (k×n).
///
/// Only the strictly lower part of `L` is read; the diagonal is taken as 1.
pub fn trsm_left_lower_unit<T: Scalar>(l: &View<T>, b: &View<T>) -> Result<()> {
    let k = square_dim(l)?;
    let (bk, n) = matrix_dims(b)?;
    if bk != k {
        return Err(LaffError::ShapeMismatch(vec![k, k], vec![bk, n]));
    }
    tracing::trace!(k, n, "trsm_left_lower_unit");

    for j in 0..n {
        for i in 1..k {
            let mut acc = b.get(&[i, j])?;
            for p in 0..i {
                acc = acc - l.get(&[i, p])? * b.get(&[p, j])?;
            }
            b.set(&[i, j], acc)?;
        }
    }
    Ok(())
}

/// B = B * U⁻¹ for upper triangular `U` (k×k) and `B` (m×k).
///
/// Only the upper part of `U` (diagonal included) is read. A zero on the
/// diagonal divides by zero.
pub fn trsm_right_upper<T: Scalar>(u: &View<T>, b: &View<T>) -> Result<()> {
    let k = square_dim(u)?;
    let (m, bk) = matrix_dims(b)?;
    if bk != k {
        return Err(LaffError::ShapeMismatch(vec![m, bk], vec![k, k]));
    }
    tracing::trace!(m, k, "trsm_right_upper");

    for r in 0..m {
        for j in 0..k {
            let mut acc = b.get(&[r, j])?;
            for p in 0..j {
                acc = acc - b.get(&[r, p])? * u.get(&[p, j])?;
            }
            b.set(&[r, j], acc / u.get(&[j, j])?)?;
        }
    }
    Ok(())
}
