//! Scalar values flowing through ports
//!
//! Every output slot of a node holds an ordered vector of [`Value`]s. The
//! [`PortValue`] trait is the typed-extraction contract used by
//! [`Model::output_value`](super::graph::Model::output_value) to hand those
//! vectors back to callers as plain Rust scalars.

use std::fmt;

/// A scalar value produced at an output slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 64-bit floating point
    Double(f64),
    /// 64-bit signed integer
    Integer(i64),
    /// Boolean
    Boolean(bool),
}

impl Value {
    /// Name of the value's runtime type, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Double(_) => "double",
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
        }
    }

    /// Numeric view of the value, promoting integers to doubles.
    /// Booleans are not numeric.
    #[inline]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            Value::Boolean(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Double(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
        }
    }
}

/// Contract for extracting a typed scalar out of a [`Value`].
///
/// Implemented for the scalar types an
/// [`OutputPort`](super::port::OutputPort) can be tagged with.
pub trait PortValue: Sized + Copy {
    /// Extract `Self` from a value, or `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;

    /// Name of the requested type, for diagnostics.
    fn type_name() -> &'static str;
}

impl PortValue for f64 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    fn type_name() -> &'static str {
        "double"
    }
}

impl PortValue for i64 {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    fn type_name() -> &'static str {
        "integer"
    }
}

impl PortValue for bool {
    #[inline]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    fn type_name() -> &'static str {
        "boolean"
    }
}
