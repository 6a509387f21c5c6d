//! Still camera adapter.
//!
//! Shells out to the libcamera still-capture tool (`rpicam-still`, or
//! `libcamera-still` on older images), which writes a JPEG to stdout.
//! The tool's own `--timeout` covers exposure settling; the process exits
//! once the frame is written.

use std::process::{Command, Stdio};

use image::{ImageFormat, RgbImage};
use log::debug;

use crate::app::ports::Camera;
use crate::config::ClassifierConfig;
use crate::error::ClassifierError;

pub struct StillCamera {
    command: String,
    width: u32,
    height: u32,
    warmup_ms: u64,
}

impl StillCamera {
    pub fn from_config(cfg: &ClassifierConfig) -> Self {
        Self {
            command: cfg.camera_command.clone(),
            width: cfg.capture_width,
            height: cfg.capture_height,
            warmup_ms: cfg.camera_warmup_ms,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "--nopreview".into(),
            "--timeout".into(),
            self.warmup_ms.max(1).to_string(),
            "--width".into(),
            self.width.to_string(),
            "--height".into(),
            self.height.to_string(),
            "--encoding".into(),
            "jpg".into(),
            "--output".into(),
            "-".into(),
        ]
    }
}

impl Camera for StillCamera {
    fn capture(&mut self) -> Result<RgbImage, ClassifierError> {
        let args = self.args();
        debug!("camera: {} {}", self.command, args.join(" "));

        let output = Command::new(&self.command)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ClassifierError::Capture(format!("{}: {e}", self.command)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ClassifierError::Capture(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        decode_jpeg(&output.stdout)
    }
}

pub fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage, ClassifierError> {
    image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map(|img| img.to_rgb8())
        .map_err(|e| ClassifierError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_request_jpeg_on_stdout() {
        let cam = StillCamera::from_config(&ClassifierConfig::default());
        let args = cam.args();
        assert_eq!(&args[args.len() - 2..], ["--output", "-"]);
        assert!(args.windows(2).any(|w| w == ["--width", "1296"]));
        assert!(args.windows(2).any(|w| w == ["--timeout", "2000"]));
    }

    #[test]
    fn missing_tool_is_a_capture_error() {
        let mut cam = StillCamera::from_config(&ClassifierConfig {
            camera_command: "definitely-not-a-camera-tool".into(),
            ..ClassifierConfig::default()
        });
        assert!(matches!(cam.capture(), Err(ClassifierError::Capture(_))));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(decode_jpeg(b"not a jpeg"), Err(ClassifierError::Decode(_))));
    }
}
