//! # Form runtime
//!
//! Compiles a [`FormSchema`](crate::schema::FormSchema) into a live value
//! tree, validates it, and keeps control visibility in step with the values.
//!
//! * `compiler` - schema to value tree compilation
//! * `value_tree` - value holders and the submission snapshot
//! * `validators` - per-control constraints
//! * `visibility` - condition evaluation and silent enable/disable
//! * `live_form` - ties the above together behind one handle

pub mod compiler;
pub mod live_form;
pub mod validators;
pub mod value_tree;
pub mod visibility;

pub use compiler::{build, validators_for, CompiledForm};
pub use live_form::{LiveForm, SubmitErrors};
pub use validators::{ValidationError, Validator};
pub use value_tree::{FormControl, FormGroup, FormNode};
pub use visibility::{apply, evaluate, evaluate_condition, find_value_by_key, VisibilityState};
