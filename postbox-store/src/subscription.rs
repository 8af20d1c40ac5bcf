use std::fmt;

type Teardown = Box<dyn FnOnce()>;

/// Disposable handle to a live registration.
///
/// The registration is released by [`Subscription::unsubscribe`] or when
/// the handle is dropped, whichever comes first. Releasing twice is a
/// no-op.
#[must_use = "dropping a subscription releases it immediately"]
pub struct Subscription {
    teardown: Option<Teardown>,
}

impl Subscription {
    /// Wrap a release callback into a subscription handle.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A handle with nothing left to release.
    pub fn closed() -> Self {
        Self { teardown: None }
    }

    pub fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }

    /// Release the registration. Subsequent calls do nothing.
    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Aggregate of subscriptions released together.
///
/// Once the bag has been released, anything added to it is released on
/// the spot.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Vec<Subscription>,
    closed: bool,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription until the bag is released.
    pub fn add(&mut self, mut subscription: Subscription) {
        if self.closed {
            subscription.unsubscribe();
            return;
        }

        if subscription.is_closed() {
            return;
        }

        self.subscriptions.push(subscription);
    }

    /// Number of handles that are still open.
    pub fn len(&self) -> usize {
        self.subscriptions
            .iter()
            .filter(|subscription| !subscription.is_closed())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release every held subscription and close the bag.
    pub fn unsubscribe(&mut self) {
        self.closed = true;
        for mut subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::{Subscription, SubscriptionBag};

    fn counted(counter: &Rc<Cell<u32>>) -> Subscription {
        let counter = Rc::clone(counter);
        Subscription::new(move || counter.set(counter.get() + 1))
    }

    #[test]
    fn given_subscription_when_unsubscribed_twice_then_teardown_runs_once() {
        let releases = Rc::new(Cell::new(0));
        let mut subscription = counted(&releases);

        subscription.unsubscribe();
        subscription.unsubscribe();
        drop(subscription);

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn given_subscription_when_dropped_then_teardown_runs() {
        let releases = Rc::new(Cell::new(0));

        {
            let _subscription = counted(&releases);
        }

        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn given_bag_when_released_then_every_handle_is_released_once() {
        let releases = Rc::new(Cell::new(0));
        let mut bag = SubscriptionBag::new();
        bag.add(counted(&releases));
        bag.add(counted(&releases));
        bag.add(counted(&releases));
        assert_eq!(bag.len(), 3);

        bag.unsubscribe();
        bag.unsubscribe();
        drop(bag);

        assert_eq!(releases.get(), 3);
    }

    #[test]
    fn given_released_bag_when_subscription_added_then_it_is_released() {
        let releases = Rc::new(Cell::new(0));
        let mut bag = SubscriptionBag::new();
        bag.unsubscribe();

        bag.add(counted(&releases));

        assert_eq!(releases.get(), 1);
        assert!(bag.is_empty());
        assert!(bag.is_closed());
    }

    #[test]
    fn given_closed_subscription_when_added_then_bag_stays_empty() {
        let mut bag = SubscriptionBag::new();

        bag.add(Subscription::closed());

        assert!(bag.is_empty());
        assert!(!bag.is_closed());
    }
}
