//! CPU-side preprocessing stage
//!
//! Loads an image from disk, resizes it to the target resolution, and
//! normalizes pixel values into `[0, 1]` floats in CHW layout. The whole
//! operation is timed; that wall-clock duration is the "CPU time" column of
//! the benchmark report.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::{imageops::FilterType, DynamicImage, ImageReader};
use walkdir::WalkDir;

use crate::utils::error::{BenchError, Result};
use crate::DEFAULT_IMAGE_SIZE;

/// A preprocessed frame ready to be handed to the inference engine
#[derive(Debug, Clone)]
pub struct PreprocessedFrame {
    /// Normalized pixels in CHW layout: all R values, then G, then B
    pub pixels: Vec<f32>,
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

/// Preprocess a single image and report the elapsed wall-clock time.
///
/// Loads the image at `path`, resizes it to `target_size` (default
/// 640x640), and rescales intensities to `[0, 1]`. I/O and decode failures
/// collapse into the single [`BenchError::ImageLoad`] variant.
///
/// # Returns
/// The preprocessed frame together with the elapsed milliseconds for the
/// whole load-resize-normalize operation.
pub fn preprocess_image(
    path: &Path,
    target_size: Option<(u32, u32)>,
) -> Result<(PreprocessedFrame, f64)> {
    let (width, height) = target_size.unwrap_or((DEFAULT_IMAGE_SIZE, DEFAULT_IMAGE_SIZE));

    let start = Instant::now();

    let image = ImageReader::open(path)
        .map_err(|e| BenchError::ImageLoad(path.to_path_buf(), e.to_string()))?
        .decode()
        .map_err(|e| BenchError::ImageLoad(path.to_path_buf(), e.to_string()))?;

    let image = image.resize_exact(width, height, FilterType::Triangle);
    let pixels = normalize_image(&image);

    let cpu_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    Ok((
        PreprocessedFrame {
            pixels,
            width,
            height,
        },
        cpu_time_ms,
    ))
}

/// Normalize an image to a flat `[0, 1]` vector in CHW layout
fn normalize_image(image: &DynamicImage) -> Vec<f32> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let num_pixels = (width * height) as usize;

    let mut normalized = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        normalized[i] = pixel[0] as f32 / 255.0;
        normalized[num_pixels + i] = pixel[1] as f32 / 255.0;
        normalized[2 * num_pixels + i] = pixel[2] as f32 / 255.0;
    }

    normalized
}

/// List the benchmark input images in a directory.
///
/// Only `.jpg`/`.jpeg`/`.png` files one level deep are considered. Paths
/// are sorted so the run order is stable across platforms.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(BenchError::PathNotFound(dir.to_path_buf()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|path| {
            path.extension()
                .map(|ext| {
                    let ext = ext.to_string_lossy().to_lowercase();
                    ["jpg", "jpeg", "png"].contains(&ext.as_str())
                })
                .unwrap_or(false)
        })
        .collect();

    paths.sort();
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::TempDir;

    fn write_test_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([(x % 256) as u8, (y % 256) as u8, 128]);
        }
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn test_preprocess_resizes_and_normalizes() {
        let dir = TempDir::new().unwrap();
        let path = write_test_png(dir.path(), "frame.png", 100, 80);

        let (frame, cpu_time_ms) = preprocess_image(&path, Some((32, 32))).unwrap();

        assert_eq!(frame.width, 32);
        assert_eq!(frame.height, 32);
        assert_eq!(frame.pixels.len(), 3 * 32 * 32);
        assert!(frame.pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(cpu_time_ms >= 0.0);
    }

    #[test]
    fn test_missing_file_is_image_load_error() {
        let result = preprocess_image(Path::new("/nonexistent/frame.jpg"), None);
        assert!(matches!(result, Err(BenchError::ImageLoad(_, _))));
    }

    #[test]
    fn test_undecodable_file_is_image_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let result = preprocess_image(&path, Some((32, 32)));
        assert!(matches!(result, Err(BenchError::ImageLoad(_, _))));
    }

    #[test]
    fn test_list_images_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write_test_png(dir.path(), "b.png", 4, 4);
        write_test_png(dir.path(), "a.jpg", 4, 4);
        std::fs::write(dir.path().join("notes.txt"), "skip me").unwrap();

        let paths = list_images(dir.path()).unwrap();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn test_list_images_missing_dir() {
        let result = list_images(Path::new("/nonexistent/images"));
        assert!(matches!(result, Err(BenchError::PathNotFound(_))));
    }
}
