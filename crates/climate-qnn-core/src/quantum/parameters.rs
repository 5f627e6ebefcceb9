//! Symbolic circuit parameters and the input/weight partition.

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use tracing::debug;

use crate::error::{QuantumError, QuantumResult};

/// One element of a [`ParameterVector`], e.g. `theta[3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    vector: Arc<str>,
    index: usize,
}

impl Parameter {
    /// Name of the owning vector.
    pub fn vector_name(&self) -> &str {
        &self.vector
    }

    /// Position within the owning vector.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.vector, self.index)
    }
}

/// Ordered, named list of free circuit angles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterVector {
    name: Arc<str>,
    params: Vec<Parameter>,
}

impl ParameterVector {
    pub fn new(name: &str, len: usize) -> Self {
        let name: Arc<str> = Arc::from(name);
        let params = (0..len)
            .map(|index| Parameter {
                vector: Arc::clone(&name),
                index,
            })
            .collect();
        Self { name, params }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.params.iter()
    }

    pub fn as_slice(&self) -> &[Parameter] {
        &self.params
    }

    pub fn contains(&self, param: &Parameter) -> bool {
        param.vector_name() == &*self.name && param.index < self.params.len()
    }
}

impl Index<usize> for ParameterVector {
    type Output = Parameter;

    fn index(&self, index: usize) -> &Parameter {
        &self.params[index]
    }
}

impl<'a> IntoIterator for &'a ParameterVector {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

/// Split of a circuit's parameters into data inputs and trainable weights.
///
/// Invariant: `input_params.len() + weight_params.len()` equals the length of
/// the vector it was split from. Fixed once computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterPartition {
    input_params: Vec<Parameter>,
    weight_params: Vec<Parameter>,
}

impl ParameterPartition {
    /// Partition `params` for a model with `input_size` features.
    ///
    /// The first `min(input_size, slots)` parameters become inputs. When that
    /// is fewer than `slots`, the shortfall is moved from the front of the
    /// weights into the inputs. Feature columns beyond `slots` have no
    /// parameter and are left unrepresented.
    ///
    /// # Errors
    /// - `QuantumError::InsufficientWeights` if padding needs more weights
    ///   than remain
    pub fn split(
        input_size: usize,
        params: &ParameterVector,
        slots: usize,
    ) -> QuantumResult<Self> {
        let take = input_size.min(slots).min(params.len());
        let mut input_params: Vec<Parameter> = params.as_slice()[..take].to_vec();
        let mut weight_params: Vec<Parameter> = params.as_slice()[take..].to_vec();

        if input_params.len() < slots {
            let additional = slots - input_params.len();
            if additional > weight_params.len() {
                return Err(QuantumError::InsufficientWeights {
                    required: slots,
                    available: weight_params.len(),
                });
            }
            input_params.extend(weight_params.drain(..additional));
        }

        if input_size > slots {
            debug!(
                input_size,
                slots,
                unrepresented = input_size - slots,
                "Feature columns beyond the register count have no circuit parameter"
            );
        }

        Ok(Self {
            input_params,
            weight_params,
        })
    }

    pub fn input_params(&self) -> &[Parameter] {
        &self.input_params
    }

    pub fn weight_params(&self) -> &[Parameter] {
        &self.weight_params
    }

    pub fn num_inputs(&self) -> usize {
        self.input_params.len()
    }

    pub fn num_weights(&self) -> usize {
        self.weight_params.len()
    }

    /// Consume the partition into `(inputs, weights)`.
    pub fn into_parts(self) -> (Vec<Parameter>, Vec<Parameter>) {
        (self.input_params, self.weight_params)
    }
}
