use crate::MeasError;

/// Scalar type of values and error bars.
pub type Real = f64;

/// How far apart two propagated numbers may drift and still count as the
/// same result: within `abs`, or within `rel` of the larger magnitude.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Only an absolute bound, e.g. for reference values quoted to a fixed
    /// number of decimals.
    pub fn absolute(abs: Real) -> Self {
        Self { abs, rel: 0.0 }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let gap = (a - b).abs();
    gap <= tol.abs || gap <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through unless it is NaN or infinite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, MeasError> {
    Some(v)
        .filter(|v| v.is_finite())
        .ok_or(MeasError::NonFinite { what, value: v })
}

/// Combine two independent uncertainties: `sqrt(a^2 + b^2)`.
#[inline]
pub fn quadrature(a: Real, b: Real) -> Real {
    (a * a + b * b).sqrt()
}

/// Dimensionless numbers a measurement can be scaled by.
///
/// Scalars carry no uncertainty, so scaling multiplies value and error
/// linearly instead of adding in quadrature.
pub trait Scalar: Copy {
    fn to_real(self) -> Real;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_real(self) -> Real {
                    self as Real
                }
            }
        )*
    };
}

impl_scalar!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
