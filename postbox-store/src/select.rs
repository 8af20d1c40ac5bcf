use std::rc::Rc;

use crate::store::{Flow, Store};
use crate::subscription::Subscription;

type Projector<S, T> = Box<dyn Fn(&S) -> T>;
type Filter<T> = Box<dyn FnMut(&T) -> bool>;

/// Projection pipeline over a [`Store`].
///
/// A pipeline is inert until [`Select::subscribe`] is called. Subscribing
/// projects the current snapshot immediately and then every new snapshot.
/// Each projected value passes the filters in the order they were added;
/// a filter only sees values that passed the filters before it.
#[must_use = "a selection does nothing until subscribed"]
pub struct Select<S, A, T> {
    store: Store<S, A>,
    projector: Projector<S, T>,
    filters: Vec<Filter<T>>,
    limit: Option<usize>,
}

impl<S: 'static, A: 'static, T: 'static> Select<S, A, T> {
    pub(crate) fn new(
        store: Store<S, A>,
        projector: impl Fn(&S) -> T + 'static,
    ) -> Self {
        Self {
            store,
            projector: Box::new(projector),
            filters: Vec::new(),
            limit: None,
        }
    }

    /// Skip values equal to the last value that got through.
    pub fn distinct_until_changed(self) -> Self
    where
        T: Clone + PartialEq,
    {
        self.distinct_until_key_changed(T::clone)
    }

    /// Skip values whose key equals the key of the last value that got
    /// through this filter.
    pub fn distinct_until_key_changed<K, F>(mut self, key: F) -> Self
    where
        K: PartialEq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let mut last: Option<K> = None;
        self.filters.push(Box::new(move |value| {
            let next = key(value);
            if last.as_ref() == Some(&next) {
                return false;
            }
            last = Some(next);
            true
        }));
        self
    }

    /// Complete after `count` delivered values.
    pub fn take(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Start delivering values to `observer`.
    ///
    /// A pipeline limited with `take` that completes during the initial
    /// delivery returns an already closed subscription.
    pub fn subscribe(
        self,
        mut observer: impl FnMut(T) + 'static,
    ) -> Subscription {
        let Select {
            store,
            projector,
            mut filters,
            limit,
        } = self;

        if limit == Some(0) {
            return Subscription::closed();
        }

        let mut remaining = limit;
        store.listen(move |state: &Rc<S>| {
            let value = projector(state.as_ref());
            if !filters.iter_mut().all(|filter| filter(&value)) {
                return Flow::Continue;
            }

            observer(value);

            match remaining.as_mut() {
                Some(left) => {
                    *left -= 1;
                    if *left == 0 { Flow::Complete } else { Flow::Continue }
                },
                None => Flow::Continue,
            }
        })
    }
}
