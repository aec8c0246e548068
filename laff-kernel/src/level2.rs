//! Level-2 kernels: matrix-vector operations.

use laff_traits::Scalar;
use laff_view::{LaffError, Result, View};

/// ger: A = A + α * x * yᵀ (rank-1 update, in place)
///
/// `x` has length m and `y` length n for an m×n `A`; either may be a row or
/// column vector. `y` is usually a transposed row strip of the same matrix,
/// which is fine as long as it does not overlap `A`.
pub fn ger<T: Scalar>(alpha: T, x: &View<T>, y: &View<T>, a: &View<T>) -> Result<()> {
    if a.ndim() != 2 {
        return Err(LaffError::RankMismatch(a.ndim(), 2));
    }
    let (m, n) = (a.dims()[0], a.dims()[1]);
    if x.vector_len()? != m || y.vector_len()? != n {
        return Err(LaffError::ShapeMismatch(vec![x.len(), y.len()], a.dims().to_vec()));
    }
    if m == 0 || n == 0 || alpha.is_zero() {
        return Ok(());
    }

    for i in 0..m {
        let axi = alpha * x.vget(i)?;
        for j in 0..n {
            let aij = a.get(&[i, j])?;
            a.set(&[i, j], aij + axi * y.vget(j)?)?;
        }
    }
    Ok(())
}
