//! Per-transfer caps layered over a reservoir.
//!
//! A limiter borrows the reservoir it wraps for the length of one transfer
//! expression and changes only one read-out:
//!
//! - [`ProvideLimiter`] caps [`request_units`](Reservoir::request_units).
//! - [`ConsumeLimiter`] caps [`available_units`](Reservoir::available_units).
//!
//! Withdrawals and deposits go straight to the wrapped reservoir, so a
//! limiter can sit on either side of a transfer, or wrap another limiter.

use crate::reservoir::Reservoir;
use crate::units::{Units, UnitsOf};

/// The smaller of `value` and `cap`. A negative or NaN cap allows nothing.
fn capped<U: Units>(value: U, cap: U) -> U {
    if cap.is_valid() { value.min_units(cap) } else { U::ZERO }
}

// ---------------------------------------------------------------------------
// ProvideLimiter
// ---------------------------------------------------------------------------

/// Caps how much the wrapped reservoir gives in one transfer.
#[derive(Debug)]
pub struct ProvideLimiter<'a, R: Reservoir + ?Sized> {
    inner: &'a mut R,
    cap: UnitsOf<R::Tag>,
}

impl<'a, R: Reservoir + ?Sized> ProvideLimiter<'a, R> {
    pub fn new(inner: &'a mut R, cap: UnitsOf<R::Tag>) -> Self {
        Self { inner, cap }
    }

    pub fn cap(&self) -> UnitsOf<R::Tag> {
        self.cap
    }

    pub fn inner(&self) -> &R {
        &*self.inner
    }
}

impl<R: Reservoir + ?Sized> Reservoir for ProvideLimiter<'_, R> {
    type Tag = R::Tag;

    fn request_units(&self) -> UnitsOf<R::Tag> {
        capped(self.inner.request_units(), self.cap)
    }

    fn available_units(&self) -> UnitsOf<R::Tag> {
        self.inner.available_units()
    }

    fn withdraw(&mut self, amount: UnitsOf<R::Tag>) {
        self.inner.withdraw(amount);
    }

    fn deposit(&mut self, amount: UnitsOf<R::Tag>) {
        self.inner.deposit(amount);
    }
}

// ---------------------------------------------------------------------------
// ConsumeLimiter
// ---------------------------------------------------------------------------

/// Caps how much the wrapped reservoir accepts in one transfer.
#[derive(Debug)]
pub struct ConsumeLimiter<'a, R: Reservoir + ?Sized> {
    inner: &'a mut R,
    cap: UnitsOf<R::Tag>,
}

impl<'a, R: Reservoir + ?Sized> ConsumeLimiter<'a, R> {
    pub fn new(inner: &'a mut R, cap: UnitsOf<R::Tag>) -> Self {
        Self { inner, cap }
    }

    pub fn cap(&self) -> UnitsOf<R::Tag> {
        self.cap
    }

    pub fn inner(&self) -> &R {
        &*self.inner
    }
}

impl<R: Reservoir + ?Sized> Reservoir for ConsumeLimiter<'_, R> {
    type Tag = R::Tag;

    fn request_units(&self) -> UnitsOf<R::Tag> {
        self.inner.request_units()
    }

    fn available_units(&self) -> UnitsOf<R::Tag> {
        capped(self.inner.available_units(), self.cap)
    }

    fn withdraw(&mut self, amount: UnitsOf<R::Tag>) {
        self.inner.withdraw(amount);
    }

    fn deposit(&mut self, amount: UnitsOf<R::Tag>) {
        self.inner.deposit(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{Container, Properties, State};
    use crate::reservoir::transfer;
    use crate::test_utils::*;

    fn tank() -> Container<TestFuel> {
        Container::new(Properties::new(CAPACITY))
    }

    #[test]
    fn provide_limiter_caps_request_only() {
        let mut c = tank();
        c.load_state(&State::new(200.0));
        let limiter = ProvideLimiter::new(&mut c, 20.0);
        assert_eq!(limiter.request_units(), 20.0);
        assert_eq!(limiter.available_units(), 55.0);
        assert_eq!(limiter.cap(), 20.0);
    }

    #[test]
    fn provide_limiter_reports_less_than_cap_when_short() {
        let mut c = tank();
        c.load_state(&State::new(5.0));
        assert_eq!(c.limit_provide(20.0).request_units(), 5.0);
    }

    #[test]
    fn consume_limiter_caps_available_only() {
        let mut c = tank();
        c.load_state(&State::new(100.0));
        let limiter = ConsumeLimiter::new(&mut c, 30.0);
        assert_eq!(limiter.available_units(), 30.0);
        assert_eq!(limiter.request_units(), 100.0);
        assert_eq!(limiter.inner().fill_level(), 100.0);
    }

    #[test]
    fn provide_limiter_moves_at_most_cap() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));

        let moved = transfer(&mut provider.limit_provide(40.0), &mut consumer);
        assert_eq!(moved, 40.0);
        assert_eq!(provider.fill_level(), CAPACITY - 40.0);
        assert_eq!(consumer.fill_level(), 40.0);
    }

    #[test]
    fn consume_limiter_moves_at_most_cap() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));

        let moved = transfer(&mut provider, &mut consumer.limit_consume(40.0));
        assert_eq!(moved, 40.0);
        assert_eq!(consumer.fill_level(), 40.0);
    }

    #[test]
    fn limiters_compose() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));

        // The tighter of the two caps wins.
        let moved = transfer(
            &mut provider.limit_provide(50.0).limit_provide(10.0),
            &mut consumer.limit_consume(25.0),
        );
        assert_eq!(moved, 10.0);
        assert_eq!(consumer.fill_level(), 10.0);
    }

    #[test]
    fn zero_cap_is_noop() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));
        let moved = transfer(&mut provider.limit_provide(0.0), &mut consumer);
        assert_eq!(moved, 0.0);
        assert!(provider.is_full());
        assert!(consumer.is_empty());
    }

    #[test]
    fn negative_cap_is_noop() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));
        let moved = transfer(&mut provider, &mut consumer.limit_consume(-5.0));
        assert_eq!(moved, 0.0);
        assert!(provider.is_full());
        assert!(consumer.is_empty());
    }

    #[test]
    fn nan_provide_cap_is_noop() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));
        assert_eq!(provider.limit_provide(f32::NAN).request_units(), 0.0);

        let moved = transfer(&mut provider.limit_provide(f32::NAN), &mut consumer);
        assert_eq!(moved, 0.0);
        assert!(provider.is_full());
        assert!(consumer.is_empty());
    }

    #[test]
    fn nan_consume_cap_is_noop() {
        let mut provider = tank();
        let mut consumer = Container::<TestFuel>::empty(Properties::new(CAPACITY));
        assert_eq!(consumer.limit_consume(f32::NAN).available_units(), 0.0);

        let moved = transfer(&mut provider, &mut consumer.limit_consume(f32::NAN));
        assert_eq!(moved, 0.0);
        assert!(provider.is_full());
        assert!(consumer.is_empty());
    }

    #[test]
    fn limiter_chains_through_its_own_handle() {
        let mut provider = Container::<Charge>::new(Properties::new(9));
        let mut a = Container::<Charge>::empty(Properties::new(9));
        let mut b = Container::<Charge>::empty(Properties::new(9));

        // Each leg is capped on its own.
        provider
            .limit_provide(3)
            .transfer_into(&mut a)
            .transfer_into(&mut b);

        assert_eq!(a.fill_level(), 3);
        assert_eq!(b.fill_level(), 3);
        assert_eq!(provider.fill_level(), 3);
    }
}
