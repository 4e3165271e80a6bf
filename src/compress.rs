use crate::constants::{
    DEFAULT_INITIAL_QUALITY, DEFAULT_MAX_WIDTH, DEFAULT_MIN_QUALITY, DEFAULT_QUALITY_STEP,
    DEFAULT_TARGET_SIZE_BYTES, MAX_SOURCE_BYTES, MAX_SOURCE_DIMENSION,
};
use crate::error::{KiranaError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// A caller-supplied raster image, held only for the duration of one call.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl SourceImage {
    pub fn new(bytes: Vec<u8>, mime: Option<String>) -> Self {
        Self { bytes, mime }
    }

    /// Reads an image file from disk, enforcing the size ceiling before loading.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(KiranaError::FileNotFound(path.to_path_buf()));
        }
        let size = fs::metadata(path)?.len();
        if size > MAX_SOURCE_BYTES {
            return Err(KiranaError::FileTooLarge(size, MAX_SOURCE_BYTES));
        }
        let bytes = fs::read(path)?;
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(mime_for_extension)
            .map(str::to_string);
        Ok(Self { bytes, mime })
    }

    /// True when the declared MIME type is an image type. Unknown types are
    /// rejected; the compressor itself is the final arbiter via decoding.
    pub fn is_image_mime(&self) -> bool {
        self.mime
            .as_deref()
            .map(|m| m.starts_with("image/"))
            .unwrap_or(false)
    }
}

pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tiff" | "tif" => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Tunables for one compression run. Immutable once constructed.
///
/// The size budget is best-effort: quality is walked down from
/// `initial_quality` in `quality_step` decrements until the encoded output
/// fits in `target_size_bytes` or quality bottoms out at `min_quality`.
#[derive(Debug, Clone)]
pub struct CompressionPolicy {
    pub target_size_bytes: u64,
    pub max_width: u32,
    pub initial_quality: f32,
    pub quality_step: f32,
    pub min_quality: f32,
}

impl Default for CompressionPolicy {
    fn default() -> Self {
        Self {
            target_size_bytes: DEFAULT_TARGET_SIZE_BYTES,
            max_width: DEFAULT_MAX_WIDTH,
            initial_quality: DEFAULT_INITIAL_QUALITY,
            quality_step: DEFAULT_QUALITY_STEP,
            min_quality: DEFAULT_MIN_QUALITY,
        }
    }
}

impl CompressionPolicy {
    pub fn new(
        target_size_bytes: u64,
        max_width: u32,
        initial_quality: f32,
        quality_step: f32,
        min_quality: f32,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&initial_quality) || initial_quality == 0.0 {
            return Err(KiranaError::InvalidPolicy(format!(
                "initial quality {} must be in (0, 1]",
                initial_quality
            )));
        }
        if !(0.0..=1.0).contains(&min_quality) || min_quality == 0.0 {
            return Err(KiranaError::InvalidPolicy(format!(
                "minimum quality {} must be in (0, 1]",
                min_quality
            )));
        }
        if quality_step <= 0.0 {
            return Err(KiranaError::InvalidPolicy(format!(
                "quality step {} must be positive",
                quality_step
            )));
        }
        if max_width == 0 {
            return Err(KiranaError::InvalidPolicy(
                "max width must be positive".to_string(),
            ));
        }
        if target_size_bytes == 0 {
            return Err(KiranaError::InvalidPolicy(
                "target size must be positive".to_string(),
            ));
        }
        Ok(Self {
            target_size_bytes,
            max_width,
            initial_quality,
            quality_step,
            min_quality,
        })
    }

    /// Upper bound on encode attempts for this policy.
    pub fn max_attempts(&self) -> u32 {
        if self.initial_quality <= self.min_quality {
            return 1;
        }
        ((self.initial_quality - self.min_quality) / self.quality_step).ceil() as u32 + 1
    }
}

/// Output of one compression run. Always JPEG.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub quality: f32,
    pub width: u32,
    pub height: u32,
}

impl CompressedImage {
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Downscales and re-encodes `source` under the policy's size budget.
///
/// Pure function of (bytes, policy): no I/O, no shared state. The decoded
/// pixel buffer is dropped on every exit path. Fails with
/// [`KiranaError::UnsupportedInput`] when the bytes are not a decodable
/// raster image; the caller decides whether to fall back to the original.
pub fn compress(source: &SourceImage, policy: &CompressionPolicy) -> Result<CompressedImage> {
    let img = decode_source(source)?;
    let (width, height) = img.dimensions();
    let (target_w, target_h) = target_dimensions(width, height, policy.max_width);

    // Shrink-only resize; a source narrower than max_width passes through.
    let frame = if (target_w, target_h) != (width, height) {
        img.resize_exact(target_w, target_h, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };
    // JPEG has no alpha channel.
    let rgb = frame.to_rgb8();
    drop(frame);

    let mut quality = policy.initial_quality;
    loop {
        let bytes = encode_jpeg(&rgb, quality)?;
        if bytes.len() as u64 <= policy.target_size_bytes || quality <= policy.min_quality {
            return Ok(CompressedImage {
                bytes,
                mime: "image/jpeg",
                quality,
                width: target_w,
                height: target_h,
            });
        }
        quality = next_quality(quality, policy);
    }
}

fn decode_source(source: &SourceImage) -> Result<DynamicImage> {
    if source.bytes.len() as u64 > MAX_SOURCE_BYTES {
        return Err(KiranaError::FileTooLarge(
            source.bytes.len() as u64,
            MAX_SOURCE_BYTES,
        ));
    }
    let reader = ImageReader::new(Cursor::new(&source.bytes))
        .with_guessed_format()
        .map_err(|e| KiranaError::UnsupportedInput(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| KiranaError::UnsupportedInput(e.to_string()))?;

    let (width, height) = img.dimensions();
    if width > MAX_SOURCE_DIMENSION || height > MAX_SOURCE_DIMENSION {
        return Err(KiranaError::InvalidDimensions(
            width,
            height,
            MAX_SOURCE_DIMENSION,
        ));
    }
    Ok(img)
}

/// Proportional shrink to `max_width`; never upscales.
pub fn target_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let scaled = (height as f64 * max_width as f64 / width as f64).round() as u32;
    (max_width, scaled.max(1))
}

/// Next quality value: one step down, rounded to 2 decimals to avoid float
/// drift, clamped at the policy floor so the last attempt runs exactly there.
/// Quality must strictly decrease every call or the encode loop cannot
/// terminate, so when rounding would undo a sub-0.01 step the unrounded
/// decrement is used instead.
fn next_quality(quality: f32, policy: &CompressionPolicy) -> f32 {
    let rounded = ((quality - policy.quality_step) * 100.0).round() / 100.0;
    let stepped = if rounded >= quality {
        quality - policy.quality_step
    } else {
        rounded
    };
    if stepped < policy.min_quality {
        policy.min_quality
    } else {
        stepped
    }
}

fn encode_jpeg(rgb: &RgbImage, quality: f32) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
    JpegEncoder::new_with_quality(&mut out, q).encode_image(rgb)?;
    Ok(out)
}
