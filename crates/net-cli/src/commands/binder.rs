//! Argument binding
//!
//! Positional values are consumed in declared order and kept as opaque
//! strings; the only check is the count.

use crate::commands::table::CommandDescriptor;
use crate::error::ArityError;

/// Positional values for one invocation, exactly one per declared argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentBundle(Vec<String>);

impl ArgumentBundle {
    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

pub fn bind(descriptor: &CommandDescriptor, raw: &[String]) -> Result<ArgumentBundle, ArityError> {
    if raw.len() != descriptor.arity() {
        return Err(ArityError {
            command: descriptor.name.to_string(),
            expected: descriptor.arity(),
            received: raw.len(),
            usage: descriptor.usage(),
        });
    }
    Ok(ArgumentBundle(raw.to_vec()))
}
