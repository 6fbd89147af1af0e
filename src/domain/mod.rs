//! Domain models for the HBnB console
//!
//! Contains the object model and value coercion without any I/O concerns.

mod class;
mod instance;
mod value;

pub use class::{ClassName, ClassNameError};
pub use instance::{is_reserved, object_key, Instance, RESERVED_ATTRIBUTES};
pub use value::{coerce_scalar, parse_dict, parse_literal, unquote};
