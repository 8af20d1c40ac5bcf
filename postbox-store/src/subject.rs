use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::registry::Registry;
use crate::subscription::Subscription;

type Observer<T> = dyn FnMut(&T);

/// Multicast emitter delivering each value to every live observer.
///
/// Values emitted from inside an observer are queued and delivered after
/// the current value reached all observers, so emission order is FIFO and
/// an observer is never re-entered.
pub struct Subject<T> {
    inner: Rc<SubjectInner<T>>,
}

struct SubjectInner<T> {
    observers: RefCell<Registry<Observer<T>>>,
    pending: RefCell<VecDeque<T>>,
    emitting: Cell<bool>,
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subject<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SubjectInner {
                observers: RefCell::new(Registry::default()),
                pending: RefCell::new(VecDeque::new()),
                emitting: Cell::new(false),
            }),
        }
    }

    /// Register an observer for all values emitted from now on.
    pub fn subscribe(
        &self,
        observer: impl FnMut(&T) + 'static,
    ) -> Subscription {
        let observer: Rc<RefCell<Observer<T>>> =
            Rc::new(RefCell::new(observer));
        let id = self.inner.observers.borrow_mut().insert(observer);
        let weak = Rc::downgrade(&self.inner);

        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.observers.borrow_mut().remove(id);
            }
        })
    }

    /// Deliver a value to every registered observer.
    pub fn emit(&self, value: T) {
        self.inner.pending.borrow_mut().push_back(value);
        if self.inner.emitting.replace(true) {
            return;
        }

        let _guard = EmitGuard(&self.inner.emitting);
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(value) = next else {
                break;
            };
            self.deliver(&value);
        }
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    fn deliver(&self, value: &T) {
        let observers = self.inner.observers.borrow().snapshot();
        for (id, observer) in observers {
            if !self.inner.observers.borrow().contains(id) {
                continue;
            }

            match observer.try_borrow_mut() {
                Ok(mut observer) => (&mut *observer)(value),
                Err(_) => log::warn!("subject observer {id} is busy"),
            }
        }
    }
}

struct EmitGuard<'a>(&'a Cell<bool>);

impl Drop for EmitGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
