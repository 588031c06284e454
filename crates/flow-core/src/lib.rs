//! Flow Core -- bounded reservoirs and the transfer protocol between them.
//!
//! A [`container::Container`] holds up to a fixed capacity of one resource.
//! Two participants exchange quantity through [`reservoir::transfer`], which
//! moves `min(giver can give, receiver can take)` and conserves the total.
//! Limiters wrap a participant for a single transfer to cap one side.
//!
//! # Example
//!
//! ```rust
//! use flow_core::container::{Container, Properties, State};
//! use flow_core::reservoir::Reservoir;
//!
//! flow_core::resource_tag! {
//!     pub struct Fuel => f32;
//! }
//!
//! let properties = Properties::<Fuel>::new(255.0);
//! let mut provider = Container::new(properties);
//! let mut consumer = Container::new(properties);
//! consumer.load_state(&State::new(0.0));
//!
//! // Two capped legs, each negotiated on its own.
//! consumer.transfer_from(&mut provider.limit_provide(127.5));
//! assert_eq!(provider.request_units(), 127.5);
//! consumer.transfer_from(&mut provider.limit_provide(127.5));
//!
//! assert_eq!(provider.request_units(), 0.0);
//! assert_eq!(consumer.request_units(), 255.0);
//! ```
//!
//! # Key Types
//!
//! - [`units::Units`] / [`units::ResourceTag`] -- numeric domain and the
//!   tag that binds it. Declare tags with [`resource_tag!`].
//! - [`container::Container`], [`container::Properties`],
//!   [`container::State`] -- the reservoir, its configuration, and its
//!   detached snapshot.
//! - [`reservoir::Reservoir`] -- the contract every transfer participant
//!   implements, with chaining via `transfer_from` / `transfer_into`.
//! - [`limiter::ProvideLimiter`], [`limiter::ConsumeLimiter`] -- per-transfer
//!   caps.

pub mod container;
pub mod limiter;
pub mod reservoir;
pub mod units;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
