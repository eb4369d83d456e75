//! Background removal
//!
//! Removal itself is an integration point: callers plug in whatever
//! segmentation service they use behind [`BackgroundRemover`]. The built-in
//! [`WhiteKeyRemover`] handles the common case of packshots on a white
//! studio background.

use crate::constants::WHITE_KEY_THRESHOLD;
use image::RgbaImage;

/// Turns an image into a cut-out with a transparent background
pub trait BackgroundRemover: Send + Sync {
    fn remove(&self, img: &RgbaImage) -> RgbaImage;
}

/// Clears pixels that are near-white in every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteKeyRemover {
    /// Channels strictly above this value count as white
    pub threshold: u8,
}

impl Default for WhiteKeyRemover {
    fn default() -> Self {
        Self {
            threshold: WHITE_KEY_THRESHOLD,
        }
    }
}

impl WhiteKeyRemover {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }
}

impl BackgroundRemover for WhiteKeyRemover {
    fn remove(&self, img: &RgbaImage) -> RgbaImage {
        let mut out = img.clone();
        for pixel in out.pixels_mut() {
            let [r, g, b, _] = pixel.0;
            if r > self.threshold && g > self.threshold && b > self.threshold {
                pixel[3] = 0;
            }
        }
        out
    }
}
