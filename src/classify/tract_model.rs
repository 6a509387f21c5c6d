//! TFLite inference backend (tract).
//!
//! Pure-Rust interpreter, so the binary cross-compiles for the Pi without
//! a TensorFlow toolchain.  Compiled only with the `tract` feature.

use std::path::Path;

use tract_tflite::prelude::*;

use crate::app::ports::InferenceModel;
use crate::error::ClassifierError;

use super::preprocess::InputTensor;

pub struct TractModel {
    plan: TypedRunnableModel<TypedModel>,
    input_size: usize,
}

impl TractModel {
    pub fn load(path: &Path, input_size: u32) -> Result<Self, ClassifierError> {
        let side = input_size as usize;
        let plan = tract_tflite::tflite()
            .model_for_path(path)
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ClassifierError::ModelLoad(format!("{}: {e}", path.display())))?;
        Ok(Self {
            plan,
            input_size: side,
        })
    }
}

impl InferenceModel for TractModel {
    fn infer(&mut self, input: &InputTensor) -> Result<Vec<f32>, ClassifierError> {
        if input.shape[1] != self.input_size || input.shape[2] != self.input_size {
            return Err(ClassifierError::Inference(format!(
                "input {:?} does not match model side {}",
                input.shape, self.input_size
            )));
        }
        let tensor = Tensor::from_shape::<f32>(&input.shape, &input.data)
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let outputs = self
            .plan
            .run(tvec!(tensor.into()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        let first = outputs.first().ok_or(ClassifierError::EmptyOutput)?;
        let view = first
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;
        Ok(view.iter().copied().collect())
    }
}
