//! Image decode/encode and sidecar output.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use image::{DynamicImage, RgbaImage};
use inverter_core::{Image, PixelFormat};
use inverter_edit::{AdjustmentData, RenderedContentSink};
use tracing::debug;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Decodes any supported file into an 8-bit RGBA image.
pub fn load_image(path: &Path) -> Result<Image<u8>> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "decoded");
    Ok(Image::from_rgba8(width, height, decoded.into_raw())?)
}

/// Encodes `image` to `path`, picking the format from the extension.
///
/// JPEG drops alpha and uses `quality` (1-100); other formats keep RGBA.
pub fn encode<T: PixelFormat>(path: &Path, image: &Image<T>, quality: u8) -> image::ImageResult<()> {
    let rgba = RgbaImage::from_raw(image.width(), image.height(), image.to_rgba8()).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
    })?;

    if is_jpeg(path) {
        let writer = BufWriter::new(File::create(path)?);
        let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100));
        DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()).write_with_encoder(encoder)
    } else {
        rgba.save(path)
    }
}

/// [`encode`] with an error that names the file.
pub fn save_image<T: PixelFormat>(path: &Path, image: &Image<T>, quality: u8) -> Result<()> {
    encode(path, image, quality).with_context(|| format!("Failed to save: {}", path.display()))
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

/// Sink that encodes the committed image to a file.
#[derive(Debug, Clone)]
pub struct EncoderSink {
    path: PathBuf,
    quality: u8,
}

impl EncoderSink {
    /// Creates a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>, quality: u8) -> Self {
        Self {
            path: path.into(),
            quality,
        }
    }

    /// Destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T: PixelFormat> RenderedContentSink<T> for EncoderSink {
    type Error = ImageError;

    fn write_rendered(&mut self, image: &Image<T>) -> Result<(), ImageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        encode(&self.path, image, self.quality)?;
        debug!(path = %self.path.display(), "encoded");
        Ok(())
    }
}

/// Path of the sidecar written next to `output`: `<output>.adjustment.json`.
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".adjustment.json");
    PathBuf::from(name)
}

/// Writes adjustment data as JSON next to `output` and returns its path.
pub fn write_sidecar(output: &Path, data: &AdjustmentData) -> Result<PathBuf> {
    let path = sidecar_path(output);
    let payload: serde_json::Value = serde_json::from_slice(&data.payload)
        .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&data.payload).into_owned()));
    let json = serde_json::json!({
        "formatIdentifier": data.format_identifier,
        "formatVersion": data.format_version,
        "payload": payload,
    });
    let text = serde_json::to_string_pretty(&json)?;
    std::fs::write(&path, text).with_context(|| format!("Failed to write: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_png_roundtrip_keeps_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");
        let mut img: Image<u8> = Image::filled(3, 2, [10, 20, 30, 128]);
        img.set_pixel(2, 1, [250, 0, 5, 7]);

        save_image(&path, &img, DEFAULT_JPEG_QUALITY).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_jpeg_writes_opaque() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.JPG");
        let img: Image<f32> = Image::filled(8, 8, [0.5, 0.5, 0.5, 0.25]);

        save_image(&path, &img, 95).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 8));
        assert!(loaded.alpha().all(|a| a == 255));
    }

    #[test]
    fn test_load_missing() {
        let err = load_image(Path::new("/nonexistent/photo.jpg")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }

    #[test]
    fn test_sidecar() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("photo.jpg");
        let path = write_sidecar(&output, &AdjustmentData::inversion_marker()).unwrap();
        assert!(path.to_string_lossy().ends_with("photo.jpg.adjustment.json"));

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["formatIdentifier"], "se.lenborje.inverter");
        assert_eq!(json["payload"]["inversion"], true);
    }

    #[test]
    fn test_sink_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edits").join("2026").join("out.png");
        let mut sink = EncoderSink::new(&path, 90);
        let img: Image<u8> = Image::filled(2, 2, [9, 8, 7, 255]);
        sink.write_rendered(&img).unwrap();
        assert_eq!(load_image(&path).unwrap(), img);
    }

    #[test]
    fn test_unknown_extension_fails() {
        let dir = tempdir().unwrap();
        let mut sink = EncoderSink::new(dir.path().join("out.xyz"), 90);
        let img: Image<u8> = Image::filled(1, 1, [0, 0, 0, 255]);
        assert!(sink.write_rendered(&img).is_err());
    }
}
