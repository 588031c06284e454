//! The transfer protocol shared by containers and limiters.
//!
//! Anything that can report how much it can give, how much it can take,
//! and have its balance moved implements [`Reservoir`]. The negotiation in
//! [`transfer`] is the same for every pair; limiters only change what the
//! two read-outs report.

use tracing::trace;

use crate::container::Container;
use crate::limiter::{ConsumeLimiter, ProvideLimiter};
use crate::units::{ResourceTag, Units, UnitsOf};

/// A participant in a transfer.
pub trait Reservoir {
    /// The resource this participant holds. Both sides of a transfer must
    /// agree on it.
    type Tag: ResourceTag;

    /// Quantity this participant is willing to give in one transfer.
    fn request_units(&self) -> UnitsOf<Self::Tag>;

    /// Quantity this participant is willing to accept in one transfer.
    fn available_units(&self) -> UnitsOf<Self::Tag>;

    /// Remove `amount` from the underlying container.
    fn withdraw(&mut self, amount: UnitsOf<Self::Tag>);

    /// Add `amount` to the underlying container.
    fn deposit(&mut self, amount: UnitsOf<Self::Tag>);

    /// Receive from `giver`. Returns `self` so several receives can be
    /// chained, each negotiated on its own.
    fn transfer_from<G>(&mut self, giver: &mut G) -> &mut Self
    where
        Self: Sized,
        G: Reservoir<Tag = Self::Tag> + ?Sized,
    {
        transfer(giver, self);
        self
    }

    /// Give to `receiver`. Returns `self` so several gives can be chained.
    fn transfer_into<R>(&mut self, receiver: &mut R) -> &mut Self
    where
        Self: Sized,
        R: Reservoir<Tag = Self::Tag> + ?Sized,
    {
        transfer(self, receiver);
        self
    }

    /// Cap how much this participant gives per transfer.
    fn limit_provide(&mut self, cap: UnitsOf<Self::Tag>) -> ProvideLimiter<'_, Self>
    where
        Self: Sized,
    {
        ProvideLimiter::new(self, cap)
    }

    /// Cap how much this participant accepts per transfer.
    fn limit_consume(&mut self, cap: UnitsOf<Self::Tag>) -> ConsumeLimiter<'_, Self>
    where
        Self: Sized,
    {
        ConsumeLimiter::new(self, cap)
    }
}

/// Move as much as both sides allow from `giver` to `receiver`.
///
/// The amount is `min(giver.request_units(), receiver.available_units())`,
/// floored at zero. A zero amount is a no-op. Returns the amount moved; the
/// sum held by the two sides is unchanged.
pub fn transfer<G, R>(giver: &mut G, receiver: &mut R) -> UnitsOf<G::Tag>
where
    G: Reservoir + ?Sized,
    R: Reservoir<Tag = G::Tag> + ?Sized,
{
    let zero = <UnitsOf<G::Tag> as Units>::ZERO;
    let resource = <G::Tag as ResourceTag>::NAME;
    let offered = giver.request_units();
    let room = receiver.available_units();
    let negotiated = offered.min_units(room);

    // Limiters report zero for NaN or negative caps; a NaN fill level lands here too.
    if !(negotiated > zero) {
        trace!(
            resource,
            offered = offered.to_f64(),
            room = room.to_f64(),
            "transfer no-op"
        );
        return zero;
    }

    giver.withdraw(negotiated);
    receiver.deposit(negotiated);

    trace!(
        resource,
        amount = negotiated.to_f64(),
        offered = offered.to_f64(),
        room = room.to_f64(),
        "transfer"
    );
    negotiated
}

impl<T: ResourceTag> Reservoir for Container<T> {
    type Tag = T;

    fn request_units(&self) -> UnitsOf<T> {
        Container::request_units(self)
    }

    fn available_units(&self) -> UnitsOf<T> {
        Container::available_units(self)
    }

    fn withdraw(&mut self, amount: UnitsOf<T>) {
        self.take(amount);
    }

    fn deposit(&mut self, amount: UnitsOf<T>) {
        self.put(amount);
    }
}
