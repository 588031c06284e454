//! Finite-capacity reservoirs and their detached snapshots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::units::{ResourceTag, Units, UnitsOf};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the validating constructors and loaders.
///
/// Quantities are carried as `f64` so the error is independent of the tag.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContainerError {
    #[error("invalid capacity {capacity}: must be non-negative")]
    InvalidCapacity { capacity: f64 },
    #[error("invalid state: fill level {fill_level} outside [0, {capacity}]")]
    InvalidState { fill_level: f64, capacity: f64 },
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Immutable per-container configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Properties<T: ResourceTag> {
    /// Maximum quantity the container can hold.
    pub capacity: UnitsOf<T>,
}

impl<T: ResourceTag> Properties<T> {
    /// Build properties without validating the capacity.
    pub fn new(capacity: UnitsOf<T>) -> Self {
        Self { capacity }
    }

    /// Build properties, rejecting a negative or NaN capacity.
    pub fn try_new(capacity: UnitsOf<T>) -> Result<Self, ContainerError> {
        if capacity.is_valid() {
            Ok(Self { capacity })
        } else {
            Err(ContainerError::InvalidCapacity {
                capacity: capacity.to_f64(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// A detached snapshot of a container's fill level.
///
/// Carries no capacity, so a state saved from one container can be loaded
/// into another of a different size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct State<T: ResourceTag> {
    fill_level: UnitsOf<T>,
}

impl<T: ResourceTag> State<T> {
    pub fn new(fill_level: UnitsOf<T>) -> Self {
        Self { fill_level }
    }

    pub fn fill_level(&self) -> UnitsOf<T> {
        self.fill_level
    }
}

impl<T: ResourceTag> Default for State<T> {
    fn default() -> Self {
        Self {
            fill_level: <UnitsOf<T> as Units>::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// A reservoir holding up to `capacity` units of one resource.
///
/// Invariant: `0 <= fill_level <= capacity`, except after a
/// [`load_state`](Container::load_state) with an out-of-range state, which
/// is passed through unchanged until the next load or transfer fixes it.
///
/// Read-outs:
/// - [`request_units`](Container::request_units): what it can hand out
///   (its fill level).
/// - [`available_units`](Container::available_units): room it can still
///   accept (`capacity - fill_level`).
///
/// The two always sum to the capacity while the invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T: ResourceTag> {
    properties: Properties<T>,
    fill_level: UnitsOf<T>,
}

impl<T: ResourceTag> Container<T> {
    /// Create a container. New containers start full.
    pub fn new(properties: Properties<T>) -> Self {
        Self {
            properties,
            fill_level: properties.capacity,
        }
    }

    /// Create a container that starts with nothing in it.
    pub fn empty(properties: Properties<T>) -> Self {
        Self {
            properties,
            fill_level: <UnitsOf<T> as Units>::ZERO,
        }
    }

    pub fn properties(&self) -> &Properties<T> {
        &self.properties
    }

    pub fn capacity(&self) -> UnitsOf<T> {
        self.properties.capacity
    }

    pub fn fill_level(&self) -> UnitsOf<T> {
        self.fill_level
    }

    pub fn is_empty(&self) -> bool {
        !(self.fill_level > <UnitsOf<T> as Units>::ZERO)
    }

    pub fn is_full(&self) -> bool {
        self.fill_level >= self.properties.capacity
    }

    /// Room left to receive. Reports zero (never negative) when over-full.
    pub fn available_units(&self) -> UnitsOf<T> {
        if self.fill_level < self.properties.capacity {
            self.properties.capacity - self.fill_level
        } else {
            <UnitsOf<T> as Units>::ZERO
        }
    }

    /// Quantity this container can currently give away.
    pub fn request_units(&self) -> UnitsOf<T> {
        self.fill_level
    }

    /// Overwrite the fill level with `state`.
    ///
    /// No clamping or validation: a state above capacity leaves the
    /// container over-full. Use [`try_load_state`](Self::try_load_state)
    /// when the state comes from an untrusted source.
    pub fn load_state(&mut self, state: &State<T>) {
        self.fill_level = state.fill_level;
    }

    /// Overwrite the fill level, rejecting states outside `[0, capacity]`.
    ///
    /// On error the container is left untouched.
    pub fn try_load_state(&mut self, state: &State<T>) -> Result<(), ContainerError> {
        let fill_level = state.fill_level;
        if fill_level.is_valid() && fill_level <= self.properties.capacity {
            self.fill_level = fill_level;
            Ok(())
        } else {
            debug!(
                resource = T::NAME,
                fill_level = fill_level.to_f64(),
                capacity = self.properties.capacity.to_f64(),
                "rejected container state"
            );
            Err(ContainerError::InvalidState {
                fill_level: fill_level.to_f64(),
                capacity: self.properties.capacity.to_f64(),
            })
        }
    }

    /// Snapshot the current fill level.
    pub fn save_state(&self) -> State<T> {
        State::new(self.fill_level)
    }

    /// Snapshot the current fill level into a caller-owned state.
    pub fn save_state_into(&self, state: &mut State<T>) {
        state.fill_level = self.fill_level;
    }

    pub(crate) fn take(&mut self, amount: UnitsOf<T>) {
        self.fill_level = self.fill_level - amount;
    }

    pub(crate) fn put(&mut self, amount: UnitsOf<T>) {
        self.fill_level = self.fill_level + amount;
    }
}
