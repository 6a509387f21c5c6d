//! Image preprocessing and output decoding for the live classifier.

use image::RgbImage;
use image::imageops::{self, FilterType};

/// NHWC float tensor, batch of one.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    /// `[1, height, width, 3]`
    pub shape: [usize; 4],
    pub data: Vec<f32>,
}

/// Resize to `size`×`size`, scale intensities to [0, 1], add the batch axis.
pub fn preprocess(image: &RgbImage, size: u32) -> InputTensor {
    let resized = if image.dimensions() == (size, size) {
        image.clone()
    } else {
        imageops::resize(image, size, size, FilterType::Triangle)
    };
    let data = resized
        .into_raw()
        .into_iter()
        .map(|v| f32::from(v) / 255.0)
        .collect();
    let side = size as usize;
    InputTensor {
        shape: [1, side, side, 3],
        data,
    }
}

/// Index and value of the highest score.  The first maximum wins on ties;
/// NaN scores are never selected.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best
}
