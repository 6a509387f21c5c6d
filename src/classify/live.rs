//! Live classifier: capture a still, run the model, map the winner
//! through the label set.

use log::debug;

use crate::app::ports::{Camera, Classifier, InferenceModel};
use crate::error::ClassifierError;

use super::labels::LabelSet;
use super::preprocess::{argmax, preprocess};
use super::{Category, Classification, ClassifierMode};

pub struct LiveClassifier<C, M> {
    camera: C,
    model: M,
    labels: LabelSet,
    input_size: u32,
    default: Category,
}

impl<C: Camera, M: InferenceModel> LiveClassifier<C, M> {
    pub fn new(camera: C, model: M, labels: LabelSet, input_size: u32, default: Category) -> Self {
        Self {
            camera,
            model,
            labels,
            input_size,
            default,
        }
    }
}

impl<C: Camera, M: InferenceModel> Classifier for LiveClassifier<C, M> {
    fn classify(&mut self) -> Result<Classification, ClassifierError> {
        let image = self.camera.capture()?;
        debug!("Captured {}x{} still", image.width(), image.height());

        let input = preprocess(&image, self.input_size);
        let scores = self.model.infer(&input)?;
        let (index, score) = argmax(&scores).ok_or(ClassifierError::EmptyOutput)?;

        let category = self.labels.category_at(index, self.default);
        Ok(Classification::new(category, score, Some(index)))
    }

    fn mode(&self) -> ClassifierMode {
        ClassifierMode::Live
    }
}
