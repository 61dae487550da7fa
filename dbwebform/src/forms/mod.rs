//! HTML forms built from reflected schemas
//!
//! Each [`GeneratedField`](crate::scaffold::GeneratedField) becomes a
//! [`FormField`] whose widget follows the column type. Submitted values are
//! checked with [`validate_fields`] and errors render inline next to their
//! fields.
//!
//! ```rust
//! use dbwebform::forms::{validate_fields, FormBuilder, FormField, InputType};
//! use std::collections::HashMap;
//!
//! let mut name = FormField::input("name", InputType::Text);
//! name.required = true;
//!
//! let values = HashMap::new();
//! let fields = vec![name.with_submitted(&values)];
//! let errors = validate_fields(&fields);
//!
//! let mut form = FormBuilder::new("/", "POST").errors(&errors);
//! for field in fields {
//!     form = form.add_field(field);
//! }
//! assert!(form.build().contains("This field is required."));
//! ```

mod builder;
mod error;
mod field;
mod render;
mod validate;

pub use builder::FormBuilder;
pub use error::{FieldError, ValidationErrors};
pub use field::{FieldKind, FormField, InputType};
pub use render::FormRenderer;
pub use validate::{validate_fields, CHOICE_MESSAGE, EMAIL_MESSAGE, REQUIRED_MESSAGE};
