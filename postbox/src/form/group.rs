use std::cell::RefCell;
use std::collections::BTreeMap;

use postbox_store::{Subject, Subscription};

use super::FormValue;
use super::control::FormControl;
use super::errors::ValidationError;

/// Ordered set of controls with an aggregate change stream.
///
/// Every patch that changes at least one control emits the full raw value
/// once. Observers run after the controls are released, so they may read
/// or patch the group again.
pub struct FormGroup<K, V> {
    controls: RefCell<BTreeMap<K, FormControl<V>>>,
    changes: Subject<BTreeMap<K, V>>,
}

impl<K, V> FormGroup<K, V>
where
    K: Ord + Clone + 'static,
    V: FormValue,
{
    pub fn new(
        controls: impl IntoIterator<Item = (K, FormControl<V>)>,
    ) -> Self {
        Self {
            controls: RefCell::new(controls.into_iter().collect()),
            changes: Subject::new(),
        }
    }

    /// Current value of one control.
    pub fn get(&self, key: &K) -> Option<V> {
        self.controls
            .borrow()
            .get(key)
            .map(|control| control.value().clone())
    }

    /// Values of every control.
    pub fn raw_value(&self) -> BTreeMap<K, V> {
        self.controls
            .borrow()
            .iter()
            .map(|(key, control)| (key.clone(), control.value().clone()))
            .collect()
    }

    /// Set the controls named in `values`; unknown keys are ignored.
    pub fn patch_value(&self, values: &BTreeMap<K, V>) {
        let changed = {
            let mut controls = self.controls.borrow_mut();
            let mut changed = false;
            for (key, value) in values {
                if let Some(control) = controls.get_mut(key) {
                    changed |= control.set(value.clone());
                }
            }
            changed
        };

        if changed {
            self.changes.emit(self.raw_value());
        }
    }

    pub fn patch_control(&self, key: K, value: V) {
        self.patch_value(&BTreeMap::from([(key, value)]));
    }

    /// Observe the raw value after every change.
    pub fn value_changes(
        &self,
        observer: impl FnMut(&BTreeMap<K, V>) + 'static,
    ) -> Subscription {
        self.changes.subscribe(observer)
    }

    pub fn is_valid(&self) -> bool {
        self.controls
            .borrow()
            .values()
            .all(|control| control.is_valid())
    }

    /// Validation errors of the invalid controls.
    pub fn errors(&self) -> BTreeMap<K, Vec<ValidationError>> {
        self.controls
            .borrow()
            .iter()
            .filter_map(|(key, control)| {
                let errors = control.errors();
                (!errors.is_empty()).then(|| (key.clone(), errors))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use postbox_store::Subscription;

    use super::FormGroup;
    use crate::form::{FormControl, FormValue, ValidationError, Validators};

    #[derive(Debug, Clone, PartialEq)]
    enum Value {
        Flag(bool),
        Level(Option<&'static str>),
    }

    impl FormValue for Value {
        fn is_empty(&self) -> bool {
            matches!(self, Value::Level(None))
        }
    }

    fn group() -> FormGroup<&'static str, Value> {
        FormGroup::new([
            ("hidden", FormControl::new(Value::Flag(false))),
            (
                "level",
                FormControl::new(Value::Level(None))
                    .with_validator(Validators::required),
            ),
        ])
    }

    type Emitted = Rc<RefCell<Vec<BTreeMap<&'static str, Value>>>>;

    fn record(
        group: &FormGroup<&'static str, Value>,
    ) -> (Emitted, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let subscription = group
            .value_changes(move |value| sink.borrow_mut().push(value.clone()));
        (seen, subscription)
    }

    #[test]
    fn given_patch_of_several_controls_when_applied_then_one_value_is_emitted()
    {
        let group = group();
        let (seen, _subscription) = record(&group);

        group.patch_value(&BTreeMap::from([
            ("hidden", Value::Flag(true)),
            ("level", Value::Level(Some("info"))),
        ]));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("hidden"), Some(&Value::Flag(true)));
        assert_eq!(seen[0].get("level"), Some(&Value::Level(Some("info"))));
    }

    #[test]
    fn given_unchanged_value_when_patched_then_nothing_is_emitted() {
        let group = group();
        let (seen, _subscription) = record(&group);

        group.patch_control("hidden", Value::Flag(false));
        group.patch_control("missing", Value::Flag(true));

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn given_observer_when_patching_again_then_group_is_not_borrowed() {
        let group = Rc::new(group());
        let inner = Rc::clone(&group);
        let _subscription = group.value_changes(move |value| {
            if value.get("hidden") == Some(&Value::Flag(true)) {
                inner.patch_control("level", Value::Level(Some("warn")));
            }
        });

        group.patch_control("hidden", Value::Flag(true));

        assert_eq!(group.get(&"level"), Some(Value::Level(Some("warn"))));
    }

    #[test]
    fn given_empty_required_control_when_validated_then_group_is_invalid() {
        let group = group();

        assert!(!group.is_valid());
        assert_eq!(
            group.errors(),
            BTreeMap::from([("level", vec![ValidationError::Required])])
        );

        group.patch_control("level", Value::Level(Some("error")));

        assert!(group.is_valid());
    }
}
