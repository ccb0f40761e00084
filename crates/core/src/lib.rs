pub mod document;
pub mod validation;

pub use document::{Document, NewDocument, UpdateDocument};
pub use validation::{FieldError, ValidationErrors};
