//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so the tags and
//! fixtures are available outside the crate via the `test-utils` feature.

use crate::container::{Container, Properties, State};
use crate::units::{Fixed64, ResourceTag, UnitsOf};

// ===========================================================================
// Tags
// ===========================================================================

crate::resource_tag! {
    /// Float-backed tag, measured in kilograms.
    pub struct TestFuel => f32;

    /// Fixed-point tag for exact arithmetic.
    pub struct Coolant => Fixed64;

    /// Integer tag.
    pub struct Charge => u32;
}

// ===========================================================================
// Constants
// ===========================================================================

pub const EMPTY: f32 = 0.0;
pub const CAPACITY: f32 = 255.0;
pub const HALF_CAPACITY: f32 = CAPACITY * 0.5;

// ===========================================================================
// Helpers
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// A full `TestFuel` container and an empty one with the same capacity.
pub fn provider_and_consumer() -> (Container<TestFuel>, Container<TestFuel>) {
    let properties = Properties::new(CAPACITY);
    (Container::new(properties), Container::empty(properties))
}

/// A container of `capacity` preloaded with `fill`.
pub fn container_at<T: ResourceTag>(capacity: UnitsOf<T>, fill: UnitsOf<T>) -> Container<T> {
    let mut container = Container::new(Properties::new(capacity));
    container.load_state(&State::new(fill));
    container
}

// ===========================================================================
// Fill-level checks
// ===========================================================================

/// 100% full: nothing left to accept, whole capacity to give.
pub fn assert_full(container: &Container<TestFuel>) {
    assert_eq!(container.request_units(), CAPACITY, "request of a full container");
    assert_eq!(container.available_units(), EMPTY, "room in a full container");
}

/// 50% full.
pub fn assert_half(container: &Container<TestFuel>) {
    assert_eq!(container.request_units(), HALF_CAPACITY, "request of a half container");
    assert_eq!(container.available_units(), HALF_CAPACITY, "room in a half container");
}

/// 0% full: nothing to give, whole capacity to accept.
pub fn assert_empty(container: &Container<TestFuel>) {
    assert_eq!(container.request_units(), EMPTY, "request of an empty container");
    assert_eq!(container.available_units(), CAPACITY, "room in an empty container");
}
