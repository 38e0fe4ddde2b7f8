//! Measured quantity: value, symmetric uncertainty and an opaque unit label.
//!
//! Uncertainties propagate through arithmetic assuming independent inputs:
//! - addition/subtraction: `sqrt(ea^2 + eb^2)`
//! - multiplication/division: `|v| * sqrt((ea/va)^2 + (eb/vb)^2)`
//! - scaling by a dimensionless scalar: `|e * s|`
//!
//! The product/quotient formula divides by each input value. A zero input
//! value yields NaN (or infinity) in the resulting error; this is left to
//! propagate so downstream code can see it.

use core::cmp::Ordering;
use core::fmt;
use core::ops::{Div, DivAssign, Mul, MulAssign};
use core::str::FromStr;

use crate::error::{MeasError, MeasResult};
use crate::numeric::{Real, Scalar, Tolerances, ensure_finite, nearly_equal, quadrature};

/// Digits after the decimal point used when no precision is requested.
pub const DEFAULT_PRECISION: usize = 6;

/// A value with a symmetric error bar and a unit label.
///
/// Units are compared by exact string equality and never simplified:
/// `MeV * MeV` is labelled `"MeV*MeV"`, and `MeV / MeV` is `"MeV/MeV"`.
///
/// Comparison, addition and subtraction require equal units and return
/// [`MeasError::IncompatibleUnits`] otherwise. Ordering and equality look
/// at the value only.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    value: Real,
    error: Real,
    units: String,
}

impl Measurement {
    /// Store the triple verbatim. The error sign is not checked.
    pub fn new(value: Real, error: Real, units: impl Into<String>) -> Self {
        Self {
            value,
            error,
            units: units.into(),
        }
    }

    /// Like [`Measurement::new`], but rejects non-finite numbers and
    /// negative errors.
    pub fn checked_new(value: Real, error: Real, units: impl Into<String>) -> MeasResult<Self> {
        let value = ensure_finite(value, "value")?;
        let error = ensure_finite(error, "error")?;
        if error < 0.0 {
            return Err(MeasError::NegativeError { value: error });
        }
        Ok(Self::new(value, error, units))
    }

    /// A quantity known without uncertainty.
    pub fn exact(value: Real, units: impl Into<String>) -> Self {
        Self::new(value, 0.0, units)
    }

    pub fn value(&self) -> Real {
        self.value
    }

    pub fn error(&self) -> Real {
        self.error
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn set_value(&mut self, value: Real) {
        self.value = value;
    }

    pub fn set_error(&mut self, error: Real) {
        self.error = error;
    }

    pub fn set_units(&mut self, units: impl Into<String>) {
        self.units = units.into();
    }

    /// `error / |value|`; infinite or NaN when the value is zero.
    pub fn relative_error(&self) -> Real {
        self.error / self.value.abs()
    }

    fn check_units(&self, rhs: &Self) -> MeasResult<()> {
        if self.units == rhs.units {
            return Ok(());
        }
        tracing::debug!(lhs = %self.units, rhs = %rhs.units, "unit mismatch");
        Err(MeasError::incompatible(&self.units, &rhs.units))
    }

    // ---- comparisons ----

    /// Order two measurements by value.
    ///
    /// This is the only place comparisons check units; every `try_*`
    /// predicate below is derived from it. `Ok(None)` means at least one
    /// value is NaN.
    pub fn try_partial_cmp(&self, rhs: &Self) -> MeasResult<Option<Ordering>> {
        self.check_units(rhs)?;
        Ok(self.value.partial_cmp(&rhs.value))
    }

    pub fn try_eq(&self, rhs: &Self) -> MeasResult<bool> {
        Ok(self.try_partial_cmp(rhs)? == Some(Ordering::Equal))
    }

    pub fn try_ne(&self, rhs: &Self) -> MeasResult<bool> {
        self.try_eq(rhs).map(|eq| !eq)
    }

    pub fn try_gt(&self, rhs: &Self) -> MeasResult<bool> {
        Ok(self.try_partial_cmp(rhs)? == Some(Ordering::Greater))
    }

    pub fn try_ge(&self, rhs: &Self) -> MeasResult<bool> {
        Ok(matches!(
            self.try_partial_cmp(rhs)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))
    }

    pub fn try_lt(&self, rhs: &Self) -> MeasResult<bool> {
        Ok(self.try_partial_cmp(rhs)? == Some(Ordering::Less))
    }

    pub fn try_le(&self, rhs: &Self) -> MeasResult<bool> {
        Ok(matches!(
            self.try_partial_cmp(rhs)?,
            Some(Ordering::Less | Ordering::Equal)
        ))
    }

    /// Value and error agree within `tol`. Units must match exactly.
    pub fn approx_eq(&self, rhs: &Self, tol: Tolerances) -> MeasResult<bool> {
        self.check_units(rhs)?;
        Ok(nearly_equal(self.value, rhs.value, tol) && nearly_equal(self.error, rhs.error, tol))
    }

    // ---- addition / subtraction ----

    /// In-place addition. On a unit mismatch `self` is left unchanged.
    pub fn try_add_assign(&mut self, rhs: &Self) -> MeasResult<()> {
        self.check_units(rhs)?;
        self.value += rhs.value;
        self.error = quadrature(self.error, rhs.error);
        Ok(())
    }

    /// In-place subtraction. The error grows exactly as for addition.
    pub fn try_sub_assign(&mut self, rhs: &Self) -> MeasResult<()> {
        self.check_units(rhs)?;
        self.value -= rhs.value;
        self.error = quadrature(self.error, rhs.error);
        Ok(())
    }

    pub fn try_add(&self, rhs: &Self) -> MeasResult<Self> {
        let mut out = self.clone();
        out.try_add_assign(rhs)?;
        Ok(out)
    }

    pub fn try_sub(&self, rhs: &Self) -> MeasResult<Self> {
        let mut out = self.clone();
        out.try_sub_assign(rhs)?;
        Ok(out)
    }

    // ---- multiplication / division ----

    fn combine_product(&mut self, rhs: &Self, value: Real, infix: char) {
        let rel = quadrature(self.relative_error(), rhs.relative_error());
        self.error = value.abs() * rel;
        self.value = value;
        self.units.push(infix);
        self.units.push_str(&rhs.units);
    }

    // ---- output ----

    /// `"<value> +- <error> <units>"` with six decimals.
    pub fn output(&self) -> String {
        self.to_string()
    }

    pub fn output_with_precision(&self, precision: usize) -> String {
        format!("{self:.precision$}")
    }

    /// `"<value> <error>"` for line-oriented data files; units are dropped.
    pub fn output_for_data_file(&self) -> String {
        format!(
            "{:.p$} {:.p$}",
            self.value,
            self.error,
            p = DEFAULT_PRECISION
        )
    }

    /// Read a line written by [`Measurement::output_for_data_file`].
    pub fn from_data_line(line: &str, units: impl Into<String>) -> MeasResult<Self> {
        let mut fields = line.split_whitespace();
        let (Some(value), Some(error), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(MeasError::parse(line, "expected exactly two fields"));
        };
        Ok(Self::new(
            parse_real(line, value, "invalid value")?,
            parse_real(line, error, "invalid error")?,
            units,
        ))
    }
}

fn parse_real(input: &str, token: &str, reason: &'static str) -> MeasResult<Real> {
    token.parse().map_err(|_| MeasError::parse(input, reason))
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(DEFAULT_PRECISION);
        write!(f, "{:.p$} +- {:.p$} {}", self.value, self.error, self.units)
    }
}

/// Parses the display form, e.g. `"3.0 +- 0.4 MeV"`. Units are optional
/// and may contain spaces.
impl FromStr for Measurement {
    type Err = MeasError;

    fn from_str(s: &str) -> MeasResult<Self> {
        let (value, rest) = s
            .trim()
            .split_once("+-")
            .ok_or_else(|| MeasError::parse(s, "missing \"+-\" separator"))?;
        let rest = rest.trim_start();
        let (error, units) = rest
            .split_once(char::is_whitespace)
            .map_or((rest, ""), |(e, u)| (e, u.trim()));
        Ok(Self::new(
            parse_real(s, value.trim(), "invalid value")?,
            parse_real(s, error, "invalid error")?,
            units,
        ))
    }
}

impl MulAssign<&Measurement> for Measurement {
    fn mul_assign(&mut self, rhs: &Measurement) {
        let value = self.value * rhs.value;
        self.combine_product(rhs, value, '*');
    }
}

impl DivAssign<&Measurement> for Measurement {
    fn div_assign(&mut self, rhs: &Measurement) {
        let value = self.value / rhs.value;
        self.combine_product(rhs, value, '/');
    }
}

// Every binary and owned form goes through the `&Measurement` compound
// impls above.
macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl $OpAssign<Measurement> for Measurement {
            fn $op_assign(&mut self, rhs: Measurement) {
                $OpAssign::$op_assign(self, &rhs);
            }
        }

        impl $Op<&Measurement> for Measurement {
            type Output = Measurement;

            fn $op(mut self, rhs: &Measurement) -> Measurement {
                $OpAssign::$op_assign(&mut self, rhs);
                self
            }
        }

        impl $Op<Measurement> for Measurement {
            type Output = Measurement;

            fn $op(mut self, rhs: Measurement) -> Measurement {
                $OpAssign::$op_assign(&mut self, &rhs);
                self
            }
        }

        impl $Op<&Measurement> for &Measurement {
            type Output = Measurement;

            fn $op(self, rhs: &Measurement) -> Measurement {
                $Op::$op(self.clone(), rhs)
            }
        }

        impl $Op<Measurement> for &Measurement {
            type Output = Measurement;

            fn $op(self, rhs: Measurement) -> Measurement {
                $Op::$op(self.clone(), &rhs)
            }
        }
    };
}

forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

impl<S: Scalar> MulAssign<S> for Measurement {
    fn mul_assign(&mut self, rhs: S) {
        let s = rhs.to_real();
        self.value *= s;
        self.error = (self.error * s).abs();
    }
}

impl<S: Scalar> DivAssign<S> for Measurement {
    fn div_assign(&mut self, rhs: S) {
        let s = rhs.to_real();
        self.value /= s;
        self.error = (self.error / s).abs();
    }
}

impl<S: Scalar> Mul<S> for Measurement {
    type Output = Measurement;

    fn mul(mut self, rhs: S) -> Measurement {
        self *= rhs;
        self
    }
}

impl<S: Scalar> Div<S> for Measurement {
    type Output = Measurement;

    fn div(mut self, rhs: S) -> Measurement {
        self /= rhs;
        self
    }
}

impl<S: Scalar> Mul<S> for &Measurement {
    type Output = Measurement;

    fn mul(self, rhs: S) -> Measurement {
        self.clone() * rhs
    }
}

impl<S: Scalar> Div<S> for &Measurement {
    type Output = Measurement;

    fn div(self, rhs: S) -> Measurement {
        self.clone() / rhs
    }
}

macro_rules! scalar_lhs_mul {
    ($($t:ty),* $(,)?) => {
        $(
            impl Mul<Measurement> for $t {
                type Output = Measurement;

                fn mul(self, rhs: Measurement) -> Measurement {
                    rhs * self
                }
            }

            impl Mul<&Measurement> for $t {
                type Output = Measurement;

                fn mul(self, rhs: &Measurement) -> Measurement {
                    rhs * self
                }
            }
        )*
    };
}

scalar_lhs_mul!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite() -> impl Strategy<Value = Real> {
        -1.0e6_f64..1.0e6_f64
    }

    fn nonzero() -> impl Strategy<Value = Real> {
        prop_oneof![-1.0e6_f64..-1.0e-3_f64, 1.0e-3_f64..1.0e6_f64]
    }

    fn error() -> impl Strategy<Value = Real> {
        0.0_f64..1.0e3_f64
    }

    fn units() -> impl Strategy<Value = String> {
        "[a-zA-Z]{0,4}"
    }

    proptest! {
        #[test]
        fn sum_and_difference_add_errors_in_quadrature(
            va in finite(), ea in error(), vb in finite(), eb in error(), u in units()
        ) {
            let a = Measurement::new(va, ea, u.clone());
            let b = Measurement::new(vb, eb, u.clone());
            let sum = a.try_add(&b).unwrap();
            let diff = a.try_sub(&b).unwrap();
            let expected_err = (ea * ea + eb * eb).sqrt();
            prop_assert_eq!(sum.value(), va + vb);
            prop_assert_eq!(diff.value(), va - vb);
            prop_assert_eq!(sum.error(), expected_err);
            prop_assert_eq!(diff.error(), expected_err);
            prop_assert_eq!(sum.units(), u.as_str());
            prop_assert_eq!(diff.units(), u.as_str());
        }

        #[test]
        fn product_and_quotient_follow_relative_quadrature(
            va in nonzero(), ea in error(), vb in nonzero(), eb in error(),
            ua in units(), ub in units()
        ) {
            let a = Measurement::new(va, ea, ua.clone());
            let b = Measurement::new(vb, eb, ub.clone());
            let rel = ((ea / va).powi(2) + (eb / vb).powi(2)).sqrt();
            let tol = Tolerances { abs: 1e-9, rel: 1e-9 };

            let product = &a * &b;
            prop_assert_eq!(product.value(), va * vb);
            prop_assert!(nearly_equal(product.error(), (va * vb).abs() * rel, tol));
            prop_assert_eq!(product.units(), format!("{ua}*{ub}"));

            let quotient = &a / &b;
            prop_assert_eq!(quotient.value(), va / vb);
            prop_assert!(nearly_equal(quotient.error(), (va / vb).abs() * rel, tol));
            prop_assert_eq!(quotient.units(), format!("{ua}/{ub}"));
        }

        #[test]
        fn compound_forms_match_binary_forms(
            va in nonzero(), ea in error(), vb in nonzero(), eb in error(), u in units()
        ) {
            let a = Measurement::new(va, ea, u.clone());
            let b = Measurement::new(vb, eb, u);

            let mut x = a.clone();
            x.try_add_assign(&b).unwrap();
            let y = a.try_add(&b).unwrap();
            prop_assert_eq!((x.value(), x.error(), x.units()), (y.value(), y.error(), y.units()));

            let mut x = a.clone();
            x.try_sub_assign(&b).unwrap();
            let y = a.try_sub(&b).unwrap();
            prop_assert_eq!((x.value(), x.error(), x.units()), (y.value(), y.error(), y.units()));

            let mut x = a.clone();
            x *= &b;
            let y = &a * &b;
            prop_assert_eq!((x.value(), x.error(), x.units()), (y.value(), y.error(), y.units()));

            let mut x = a.clone();
            x /= &b;
            let y = &a / &b;
            prop_assert_eq!((x.value(), x.error(), x.units()), (y.value(), y.error(), y.units()));
        }

        #[test]
        fn comparisons_form_a_total_order_on_finite_values(
            va in finite(), vb in finite(), u in units()
        ) {
            let a = Measurement::new(va, 0.1, u.clone());
            let b = Measurement::new(vb, 0.2, u);
            let lt = a.try_lt(&b).unwrap();
            let eq = a.try_eq(&b).unwrap();
            let gt = a.try_gt(&b).unwrap();
            prop_assert_eq!([lt, eq, gt].iter().filter(|x| **x).count(), 1);
            prop_assert_eq!(lt, b.try_gt(&a).unwrap());
            prop_assert_eq!(a.try_le(&b).unwrap(), b.try_ge(&a).unwrap());
            prop_assert_eq!(a.try_le(&b).unwrap(), lt || eq);
            prop_assert_eq!(a.try_ge(&b).unwrap(), gt || eq);
            prop_assert_eq!(a.try_ne(&b).unwrap(), !eq);
        }

        #[test]
        fn mismatched_units_always_fail(va in finite(), vb in finite(), ua in units(), ub in units()) {
            prop_assume!(ua != ub);
            let a = Measurement::new(va, 0.1, ua);
            let b = Measurement::new(vb, 0.1, ub);
            prop_assert!(a.try_add(&b).is_err());
            prop_assert!(a.try_sub(&b).is_err());
            prop_assert!(a.try_eq(&b).is_err());
            prop_assert!(a.try_ne(&b).is_err());
            prop_assert!(a.try_lt(&b).is_err());
            prop_assert!(a.try_gt(&b).is_err());
            prop_assert!(a.try_le(&b).is_err());
            prop_assert!(a.try_ge(&b).is_err());
        }
    }
}
