//! Level-1 kernels: vector-vector operations.
//!
//! Vectors are rank-1 views or matrices with a unit dimension; row and column
//! orientation are interchangeable unless a kernel says otherwise.

use laff_traits::Scalar;
use laff_view::{LaffError, Result, View};

/// Common length of two vectors, or `ShapeMismatch`.
fn paired_len<T>(x: &View<T>, y: &View<T>) -> Result<usize> {
    let n = x.vector_len()?;
    if n != y.vector_len()? {
        return Err(LaffError::ShapeMismatch(x.dims().to_vec(), y.dims().to_vec()));
    }
    Ok(n)
}

/// Index of the single element of a 1×…×1 view.
fn scalar_index<T>(rho: &View<T>) -> Result<Vec<usize>> {
    if rho.len() != 1 {
        return Err(LaffError::ShapeMismatch(rho.dims().to_vec(), vec![1; rho.ndim().max(1)]));
    }
    Ok(vec![0; rho.ndim()])
}

/// scalv: x = α * x (in place)
pub fn scalv<T: Scalar>(alpha: T, x: &View<T>) -> Result<()> {
    let n = x.vector_len()?;
    if alpha.is_one() {
        return Ok(());
    }
    if alpha.is_zero() {
        for i in 0..n {
            x.vset(i, T::zero())?;
        }
    } else {
        for i in 0..n {
            x.vset(i, alpha * x.vget(i)?)?;
        }
    }
    Ok(())
}

/// scal2v: y = α * x, leaving `x` untouched.
pub fn scal2v<T: Scalar>(alpha: T, x: &View<T>, y: &View<T>) -> Result<()> {
    let n = paired_len(x, y)?;
    for i in 0..n {
        y.vset(i, alpha * x.vget(i)?)?;
    }
    Ok(())
}

/// axpyv: y = α * x + y
pub fn axpyv<T: Scalar>(alpha: T, x: &View<T>, y: &View<T>) -> Result<()> {
    let n = paired_len(x, y)?;
    if n == 0 || alpha.is_zero() {
        return Ok(());
    }
    if alpha.is_one() {
        for i in 0..n {
            y.vset(i, x.vget(i)? + y.vget(i)?)?;
        }
    } else {
        for i in 0..n {
            y.vset(i, alpha * x.vget(i)? + y.vget(i)?)?;
        }
    }
    Ok(())
}

/// copyv: y = x
pub fn copyv<T: Scalar>(x: &View<T>, y: &View<T>) -> Result<()> {
    let n = paired_len(x, y)?;
    for i in 0..n {
        y.vset(i, x.vget(i)?)?;
    }
    Ok(())
}

/// invertv: x_i = 1 / x_i (in place)
///
/// Zero elements follow the element type's division semantics (`inf` for floats).
pub fn invertv<T: Scalar>(x: &View<T>) -> Result<()> {
    let n = x.vector_len()?;
    for i in 0..n {
        x.vset(i, T::one() / x.vget(i)?)?;
    }
    Ok(())
}

/// dotv: x · y
///
/// Orientation is not checked: a column vector dotted with a row vector is fine.
pub fn dotv<T: Scalar>(x: &View<T>, y: &View<T>) -> Result<T> {
    let n = paired_len(x, y)?;
    let mut sum = T::zero();
    for i in 0..n {
        sum = sum + x.vget(i)? * y.vget(i)?;
    }
    Ok(sum)
}

/// dotv into a 1×1 view: ρ = x · y
pub fn dotv_into<T: Scalar>(x: &View<T>, y: &View<T>, rho: &View<T>) -> Result<()> {
    let at = scalar_index(rho)?;
    let value = dotv(x, y)?;
    rho.set(&at, value)
}

/// dotxv: β * ρ + α * (x · y), with ρ passed by value.
pub fn dotxv<T: Scalar>(alpha: T, x: &View<T>, y: &View<T>, beta: T, rho: T) -> Result<T> {
    let dot = dotv(x, y)?;
    Ok(scaled_accumulate(beta, rho, alpha, dot))
}

/// dotxv into a 1×1 view: ρ = β * ρ + α * (x · y)
///
/// With `beta == 0` the previous content of `rho` is not read.
pub fn dotxv_into<T: Scalar>(
    alpha: T,
    x: &View<T>,
    y: &View<T>,
    beta: T,
    rho: &View<T>,
) -> Result<()> {
    let at = scalar_index(rho)?;
    let dot = dotv(x, y)?;
    let previous = if beta.is_zero() {
        T::zero()
    } else {
        rho.get(&at)?
    };
    rho.set(&at, scaled_accumulate(beta, previous, alpha, dot))
}

fn scaled_accumulate<T: Scalar>(beta: T, rho: T, alpha: T, dot: T) -> T {
    if beta.is_zero() {
        alpha * dot
    } else {
        beta * rho + alpha * dot
    }
}

/// Strict dot product: `row` must be 1×n and `col` n×1.
pub fn dotv_oriented<T: Scalar>(row: &View<T>, col: &View<T>) -> Result<T> {
    let row_ok = row.ndim() == 2 && row.dims()[0] == 1;
    let col_ok = col.ndim() == 2 && col.dims()[1] == 1;
    if !row_ok || !col_ok || row.dims()[1] != col.dims()[0] {
        return Err(LaffError::ShapeMismatch(row.dims().to_vec(), col.dims().to_vec()));
    }
    dotv(row, col)
}
