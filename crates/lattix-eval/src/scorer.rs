//! The scoring model seen from the evaluator.
//!
//! Evaluation never looks inside a model. It only needs one capability:
//! score a batch of facts, lowest score first. Anything that can do that
//! (an ONNX session, a burn module, a lookup table in a test) implements
//! [`TripleScorer`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fact::Fact;

/// Opaque placement token handed to the scorer on every call.
///
/// The evaluator never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device(String);

impl Device {
    /// Device name, e.g. "cpu", "cuda:0", "metal".
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn cpu() -> Self {
        Self::new("cpu")
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Device {
    fn default() -> Self {
        Self::cpu()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Batch scoring capability of a trained model.
///
/// Lower scores mean more plausible facts. Models whose native score is
/// "higher is better" (e.g. negative TransE distance) must negate it.
pub trait TripleScorer {
    /// Score every fact in `batch` on `device`.
    ///
    /// Must return exactly one score per fact, in batch order. Errors are
    /// passed through the evaluator untouched.
    fn predict(&self, batch: &[Fact], device: &Device) -> Result<Vec<f32>>;
}

impl<F> TripleScorer for F
where
    F: Fn(&[Fact], &Device) -> Result<Vec<f32>>,
{
    fn predict(&self, batch: &[Fact], device: &Device) -> Result<Vec<f32>> {
        self(batch, device)
    }
}
