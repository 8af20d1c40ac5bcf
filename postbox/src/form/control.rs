use super::FormValue;
use super::errors::ValidationError;

/// Check run against a control value after every change.
pub type Validator<V> = fn(&V) -> Option<ValidationError>;

/// Built-in validators.
pub struct Validators;

impl Validators {
    pub fn required<V: FormValue>(value: &V) -> Option<ValidationError> {
        value.is_empty().then_some(ValidationError::Required)
    }
}

/// Single editable value with its validators.
#[derive(Debug, Clone)]
pub struct FormControl<V> {
    value: V,
    validators: Vec<Validator<V>>,
}

impl<V: FormValue> FormControl<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator<V>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value; returns `false` when it was already equal.
    pub fn set(&mut self, value: V) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        true
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        self.validators
            .iter()
            .filter_map(|validator| validator(&self.value))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators
            .iter()
            .all(|validator| validator(&self.value).is_none())
    }
}
