//! Reactive form controls bound to the settings views.

mod control;
mod errors;
mod group;

pub use control::{FormControl, Validator, Validators};
pub use errors::ValidationError;
pub use group::FormGroup;

/// Value type a form control can hold.
pub trait FormValue: Clone + PartialEq + 'static {
    /// Whether the value counts as missing for the `required` validator.
    fn is_empty(&self) -> bool;
}
