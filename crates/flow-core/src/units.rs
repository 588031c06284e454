//! Numeric quantity domain and resource tags.
//!
//! A [`ResourceTag`] is a zero-sized marker naming what is being moved (fuel,
//! coolant, charge). Each tag binds exactly one [`Units`] representation, so
//! two containers can only exchange quantity when they share a tag.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Sub};

use fixed::types::{I16F16, I32F32};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Q16.16 fixed-point for compact quantities.
pub type Fixed32 = I16F16;

/// Shorthand for the units bound to a resource tag.
pub type UnitsOf<T> = <T as ResourceTag>::Units;

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// A scalar quantity of some resource.
///
/// Only ordering, addition and subtraction are needed by the transfer
/// protocol. Values are non-negative by convention; [`Units::is_valid`]
/// checks that convention where a caller wants it enforced.
pub trait Units:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// The empty quantity.
    const ZERO: Self;

    /// Convert from f64. Use only for initialization and config, never in a
    /// transfer.
    fn from_f64(v: f64) -> Self;

    /// Like [`from_f64`](Units::from_f64), but `None` when `v` is NaN or
    /// outside the representable range instead of saturating.
    fn checked_from_f64(v: f64) -> Option<Self>;

    /// Convert to f64. Use only for display and logging.
    fn to_f64(self) -> f64;

    /// The smaller of two quantities. Unlike `Ord::min` this works for floats.
    #[inline]
    fn min_units(self, other: Self) -> Self {
        if other < self { other } else { self }
    }

    /// True if the value is a legal quantity: non-negative and comparable.
    #[inline]
    fn is_valid(self) -> bool {
        self >= Self::ZERO
    }
}

macro_rules! impl_float_units {
    ($($t:ty),+) => {$(
        impl Units for $t {
            const ZERO: Self = 0.0;

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn checked_from_f64(v: f64) -> Option<Self> {
                if v.is_nan() || v.abs() > <$t>::MAX as f64 {
                    None
                } else {
                    Some(v as $t)
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )+};
}

macro_rules! impl_integer_units {
    ($($t:ty),+) => {$(
        impl Units for $t {
            const ZERO: Self = 0;

            /// Saturating cast; fractions are truncated and NaN maps to zero.
            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            /// Fractions are truncated.
            #[inline]
            fn checked_from_f64(v: f64) -> Option<Self> {
                if v.is_nan() || v < 0.0 || v > <$t>::MAX as f64 {
                    None
                } else {
                    Some(v as $t)
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )+};
}

macro_rules! impl_fixed_units {
    ($($t:ty),+) => {$(
        impl Units for $t {
            const ZERO: Self = <$t>::ZERO;

            /// Saturates at the representable range. NaN maps to zero.
            #[inline]
            fn from_f64(v: f64) -> Self {
                if v.is_nan() {
                    <$t>::ZERO
                } else {
                    <$t>::saturating_from_num(v)
                }
            }

            #[inline]
            fn checked_from_f64(v: f64) -> Option<Self> {
                if v.is_nan() {
                    None
                } else {
                    <$t>::checked_from_num(v)
                }
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self.to_num::<f64>()
            }
        }
    )+};
}

impl_float_units!(f32, f64);
impl_integer_units!(u32, u64);
impl_fixed_units!(Fixed64, Fixed32);

// ---------------------------------------------------------------------------
// Resource tags
// ---------------------------------------------------------------------------

/// Marker type identifying a kind of resource and its numeric representation.
///
/// Declare tags with [`resource_tag!`](crate::resource_tag) rather than by
/// hand.
pub trait ResourceTag:
    Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static
{
    /// Numeric representation of quantities of this resource.
    type Units: Units;

    /// Human-readable name used in log output.
    const NAME: &'static str;
}

/// Declare one or more resource tags and bind each to its units type.
///
/// ```
/// flow_core::resource_tag! {
///     /// Rocket fuel in kilograms.
///     pub struct Fuel => f32;
///
///     /// Battery charge in joules.
///     pub struct Charge => flow_core::units::Fixed64;
/// }
///
/// use flow_core::units::ResourceTag;
/// assert_eq!(Fuel::NAME, "Fuel");
/// ```
#[macro_export]
macro_rules! resource_tag {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident => $units:ty;)+) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        impl $crate::units::ResourceTag for $name {
            type Units = $units;
            const NAME: &'static str = stringify!($name);
        }
    )+};
}
