//! Built-in operation catalog
//!
//! A minimal set of [`Operation`] implementations so a model can be built and
//! evaluated end to end. Downstream toolchains are expected to bring their
//! own catalog; the graph core depends only on the trait.

use std::any::Any;

use crate::model::{ComputeError, Operation, Value};

fn expect_ports(
    op: &'static str,
    expected: usize,
    inputs: &[Vec<Value>],
) -> Result<(), ComputeError> {
    if inputs.len() != expected {
        return Err(ComputeError::ArityMismatch {
            op,
            expected,
            found: inputs.len(),
        });
    }
    Ok(())
}

/// A source node holding a fixed vector of values. No inputs, one output slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantOp {
    values: Vec<Value>,
}

impl ConstantOp {
    /// A constant holding the given values.
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// A constant holding a single scalar.
    pub fn scalar(value: impl Into<Value>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    /// The constant's values.
    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

impl Operation for ConstantOp {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn compute(&self, inputs: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, ComputeError> {
        expect_ports(self.name(), 0, inputs)?;
        Ok(vec![self.values.clone()])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reduces its single input port to one scalar sum.
///
/// The result is an integer when every input is an integer, a double
/// otherwise. Booleans are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SumOp;

impl Operation for SumOp {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn compute(&self, inputs: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, ComputeError> {
        expect_ports(self.name(), 1, inputs)?;
        let mut total = 0.0;
        let mut int_total: i64 = 0;
        let mut all_integer = true;
        for value in &inputs[0] {
            match value {
                Value::Integer(v) => {
                    int_total = int_total.wrapping_add(*v);
                    total += *v as f64;
                }
                Value::Double(v) => {
                    all_integer = false;
                    total += v;
                }
                Value::Boolean(_) => {
                    return Err(ComputeError::NonNumeric {
                        op: self.name(),
                        found: value.type_name(),
                    })
                }
            }
        }
        let result = if all_integer {
            Value::Integer(int_total)
        } else {
            Value::Double(total)
        };
        Ok(vec![vec![result]])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Multiplies every value on its single input port by a fixed factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleOp {
    factor: f64,
}

impl ScaleOp {
    /// A scale by `factor`. Fails if the factor is NaN or infinite.
    pub fn new(factor: f64) -> Result<Self, ComputeError> {
        if !factor.is_finite() {
            return Err(ComputeError::NonFiniteFactor(factor));
        }
        Ok(Self { factor })
    }

    /// The scale factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Operation for ScaleOp {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn compute(&self, inputs: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, ComputeError> {
        expect_ports(self.name(), 1, inputs)?;
        let mut scaled = Vec::with_capacity(inputs[0].len());
        for value in &inputs[0] {
            let v = value.as_numeric().ok_or(ComputeError::NonNumeric {
                op: self.name(),
                found: value.type_name(),
            })?;
            scaled.push(Value::Double(v * self.factor));
        }
        Ok(vec![scaled])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Concatenates the values of all its input ports, in port order, into one
/// output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcatOp;

impl Operation for ConcatOp {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn output_arity(&self) -> usize {
        1
    }

    fn compute(&self, inputs: &[Vec<Value>]) -> Result<Vec<Vec<Value>>, ComputeError> {
        let mut values = Vec::new();
        for port in inputs {
            values.extend_from_slice(port);
        }
        Ok(vec![values])
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
