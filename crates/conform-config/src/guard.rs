//! # Write-Guarded Views
//!
//! Readers never receive the configuration snapshot as a mutable value.
//! They get a [`View`], which wraps every nested container it hands out in
//! another `View` and returns scalars by shared reference.
//!
//! Assignment through a guard succeeds only when the target exposes an
//! explicit setter for the property, expressed by the [`Accessors`]
//! capability. Plain configuration data exposes none, so every assignment
//! through a `View` fails with [`GuardError::NotWritable`] and all
//! mutation goes through `Configuration::set`, which re-validates.

use serde_json::Value;

use conform_core::path;

use crate::error::GuardError;

/// Capability of a type that exposes some properties as settable.
pub trait Accessors {
    /// Returns `true` if `property` has an explicit setter.
    fn has_setter(&self, property: &str) -> bool;

    /// Assign `value` through the setter for `property`.
    ///
    /// Only called after [`Accessors::has_setter`] returned `true`.
    fn set_property(&mut self, property: &str, value: Value) -> Result<(), GuardError>;
}

/// Exclusive guard over an [`Accessors`] implementor.
pub struct Guard<'a, T: Accessors + ?Sized> {
    target: &'a mut T,
}

impl<'a, T: Accessors + ?Sized> Guard<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        Self { target }
    }

    /// Assign through an exposed setter, or fail with `NotWritable`.
    pub fn try_set(&mut self, property: &str, value: Value) -> Result<(), GuardError> {
        if !self.target.has_setter(property) {
            return Err(GuardError::NotWritable {
                path: property.to_string(),
            });
        }
        self.target.set_property(property, value)
    }

    pub fn get(&self) -> &T {
        self.target
    }
}

/// Read-only, lazily wrapped view over a configuration snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View<'a> {
    value: &'a Value,
}

/// One resolved position in a [`View`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// A scalar (null, boolean, number or string).
    Leaf(&'a Value),
    /// An object or array, wrapped in its own guard.
    Nested(View<'a>),
}

impl<'a> Entry<'a> {
    fn wrap(value: &'a Value) -> Self {
        match value {
            Value::Object(_) | Value::Array(_) => Entry::Nested(View::new(value)),
            _ => Entry::Leaf(value),
        }
    }

    /// The underlying value, for read-only use.
    pub fn value(&self) -> &'a Value {
        match self {
            Entry::Leaf(value) => value,
            Entry::Nested(view) => view.value,
        }
    }

    pub fn as_view(&self) -> Option<View<'a>> {
        match self {
            Entry::Nested(view) => Some(*view),
            Entry::Leaf(_) => None,
        }
    }
}

impl<'a> View<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Resolve a wildcard-free path relative to this view.
    pub fn get(&self, path: &str) -> Option<Entry<'a>> {
        path::lookup(self.value, path).map(Entry::wrap)
    }

    /// Keys of a wrapped object, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> {
        self.value
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// Length of a wrapped array or object.
    pub fn len(&self) -> usize {
        match self.value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The wrapped value, for read-only use.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Owned copy of the wrapped value.
    pub fn to_value(&self) -> Value {
        self.value.clone()
    }

    /// Configuration data exposes no setters; this always fails.
    ///
    /// # Errors
    ///
    /// Returns `GuardError::Path` for a malformed path and
    /// `GuardError::NotWritable` otherwise.
    pub fn try_set(&self, path: &str, _value: Value) -> Result<(), GuardError> {
        path::tokenize(path)?;
        Err(GuardError::NotWritable {
            path: path.to_string(),
        })
    }
}
