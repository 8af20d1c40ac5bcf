use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::registry::Registry;
use crate::select::Select;
use crate::subscription::Subscription;

type Reducer<S, A> = dyn Fn(&S, &A) -> Option<S>;
type Listener<S> = dyn FnMut(&Rc<S>) -> Flow;

/// Side effect run after an action has been reduced.
///
/// Effects receive the store so they can read the new snapshot and
/// dispatch follow-up actions; those are queued behind the current one.
pub type Effect<S, A> = Rc<dyn Fn(&A, &Store<S, A>)>;

/// Whether a listener wants further notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Complete,
}

/// Single source of truth for application state.
///
/// State is kept as an immutable `Rc` snapshot. The only way to change it
/// is [`Store::dispatch`]: the reducer maps the current snapshot and the
/// action to a new snapshot, or to `None` when nothing changed. Listeners
/// are notified only for new snapshots, effects run for every action.
///
/// Cloning a store is cheap and yields another handle to the same state.
pub struct Store<S, A> {
    inner: Rc<StoreInner<S, A>>,
}

struct StoreInner<S, A> {
    state: RefCell<Rc<S>>,
    reducer: Box<Reducer<S, A>>,
    listeners: RefCell<Registry<Listener<S>>>,
    effects: RefCell<Vec<Effect<S, A>>>,
    queue: RefCell<VecDeque<A>>,
    dispatching: Cell<bool>,
}

impl<S, A> Clone for Store<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: 'static, A: 'static> Store<S, A> {
    /// Create a store from an initial snapshot and a reducer.
    pub fn new(
        initial: S,
        reducer: impl Fn(&S, &A) -> Option<S> + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(initial)),
                reducer: Box::new(reducer),
                listeners: RefCell::new(Registry::default()),
                effects: RefCell::new(Vec::new()),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Return the current state snapshot.
    pub fn snapshot(&self) -> Rc<S> {
        Rc::clone(&self.inner.state.borrow())
    }

    /// Register an effect for the lifetime of the store.
    pub fn register_effect(&self, effect: impl Fn(&A, &Self) + 'static) {
        self.inner.effects.borrow_mut().push(Rc::new(effect));
    }

    /// Start a projection pipeline over the state.
    pub fn select<T: 'static>(
        &self,
        projector: impl Fn(&S) -> T + 'static,
    ) -> Select<S, A, T> {
        Select::new(self.clone(), projector)
    }

    /// Submit an action.
    ///
    /// Actions dispatched while another one is being processed (from a
    /// listener or an effect) are queued and processed in FIFO order before
    /// the outermost call returns.
    pub fn dispatch(&self, action: A) {
        self.inner.queue.borrow_mut().push_back(action);
        if self.inner.dispatching.replace(true) {
            return;
        }

        let _guard = DispatchGuard(&self.inner.dispatching);
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            self.process(&action);
        }
    }

    /// Number of live listeners, mostly useful for leak checks.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Register a listener and feed it the current snapshot right away.
    pub(crate) fn listen(
        &self,
        mut listener: impl FnMut(&Rc<S>) -> Flow + 'static,
    ) -> Subscription {
        let current = self.snapshot();
        if listener(&current) == Flow::Complete {
            return Subscription::closed();
        }

        let listener: Rc<RefCell<Listener<S>>> =
            Rc::new(RefCell::new(listener));
        let id = self.inner.listeners.borrow_mut().insert(listener);
        let weak = Rc::downgrade(&self.inner);

        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().remove(id);
            }
        })
    }

    fn process(&self, action: &A) {
        let current = self.snapshot();
        if let Some(next) = (self.inner.reducer)(current.as_ref(), action) {
            let next = Rc::new(next);
            *self.inner.state.borrow_mut() = Rc::clone(&next);
            self.notify(&next);
        }

        let effects = self.inner.effects.borrow().clone();
        for effect in effects {
            effect(action, self);
        }
    }

    fn notify(&self, state: &Rc<S>) {
        let listeners = self.inner.listeners.borrow().snapshot();
        log::trace!("store notifying {} listeners", listeners.len());

        for (id, listener) in listeners {
            if !self.inner.listeners.borrow().contains(id) {
                continue;
            }

            let flow = match listener.try_borrow_mut() {
                Ok(mut listener) => (&mut *listener)(state),
                Err(_) => {
                    log::warn!("store listener {id} is busy");
                    continue;
                },
            };

            if flow == Flow::Complete {
                self.inner.listeners.borrow_mut().remove(id);
            }
        }
    }
}

struct DispatchGuard<'a>(&'a Cell<bool>);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Flow, Store};

    #[derive(Debug, Clone, PartialEq)]
    enum Action {
        Add(i32),
        Noop,
        AddTwice(i32),
    }

    fn counter_store() -> Store<i32, Action> {
        Store::new(0, |state: &i32, action: &Action| match action {
            Action::Add(value) => Some(state + value),
            Action::Noop | Action::AddTwice(_) => None,
        })
    }

    #[test]
    fn given_action_when_dispatched_then_snapshot_is_reduced() {
        let store = counter_store();

        store.dispatch(Action::Add(2));
        store.dispatch(Action::Add(3));

        assert_eq!(*store.snapshot(), 5);
    }

    #[test]
    fn given_listener_when_registered_then_receives_current_state_first() {
        let store = counter_store();
        store.dispatch(Action::Add(4));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _subscription = {
            let seen = Rc::clone(&seen);
            store.listen(move |state| {
                seen.borrow_mut().push(**state);
                Flow::Continue
            })
        };
        store.dispatch(Action::Add(1));

        assert_eq!(*seen.borrow(), vec![4, 5]);
    }

    #[test]
    fn given_unchanged_state_when_dispatched_then_listeners_are_not_notified()
    {
        let store = counter_store();
        let notifications = Rc::new(RefCell::new(0));
        let _subscription = {
            let notifications = Rc::clone(&notifications);
            store.listen(move |_| {
                *notifications.borrow_mut() += 1;
                Flow::Continue
            })
        };

        store.dispatch(Action::Noop);

        assert_eq!(*notifications.borrow(), 1);
    }

    #[test]
    fn given_effect_dispatching_when_processed_then_actions_run_in_fifo_order()
    {
        let store = counter_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        store.register_effect(|action, store| {
            if let Action::AddTwice(value) = action {
                store.dispatch(Action::Add(*value));
                store.dispatch(Action::Add(*value));
            }
        });
        {
            let seen = Rc::clone(&seen);
            store.register_effect(move |action, store| {
                seen.borrow_mut().push((action.clone(), *store.snapshot()));
            });
        }

        store.dispatch(Action::AddTwice(10));

        assert_eq!(
            *seen.borrow(),
            vec![
                (Action::AddTwice(10), 0),
                (Action::Add(10), 10),
                (Action::Add(10), 20),
            ]
        );
    }

    #[test]
    fn given_released_listener_when_dispatched_then_it_is_not_called() {
        let store = counter_store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscription = {
            let seen = Rc::clone(&seen);
            store.listen(move |state| {
                seen.borrow_mut().push(**state);
                Flow::Continue
            })
        };
        assert_eq!(store.listener_count(), 1);

        subscription.unsubscribe();
        store.dispatch(Action::Add(1));

        assert_eq!(*seen.borrow(), vec![0]);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn given_completing_listener_when_notified_then_it_is_removed() {
        let store = counter_store();
        let _subscription = store.listen(|state| {
            if **state >= 1 {
                Flow::Complete
            } else {
                Flow::Continue
            }
        });

        store.dispatch(Action::Add(1));

        assert_eq!(store.listener_count(), 0);
    }
}
