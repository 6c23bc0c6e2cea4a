use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Converts a grayscale image to binary by keeping only bright pixels.
///
/// Pixels brighter than `threshold` become foreground (255), all others background (0).
/// Element detection traces connected foreground regions in the result.
pub fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let value = if pixel[0] > threshold { 255u8 } else { 0u8 };
        output.put_pixel(x, y, Luma([value]));
    }

    output
}

/// Calculates the population variance of grayscale intensity.
///
/// Flat, text-only pages stay low; photos and illustrations push it up.
/// Returns 0.0 for an empty image.
pub fn intensity_variance(img: &GrayImage) -> f64 {
    if img.width() == 0 || img.height() == 0 {
        return 0.0;
    }

    let pixel_count = (img.width() as u64 * img.height() as u64) as f64;
    let mean = img.pixels().map(|p| p[0] as f64).sum::<f64>() / pixel_count;

    img.pixels()
        .map(|p| {
            let diff = p[0] as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / pixel_count
}

/// Prepares a screenshot for the vision model.
///
/// Converts to RGB, shrinks so the longest side is at most `max_dimension`
/// (Lanczos3), and re-encodes as JPEG at the given quality.
pub fn encode_for_model(img: &DynamicImage, max_dimension: u32, quality: u8) -> Result<Vec<u8>> {
    let mut rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    let longest = width.max(height);

    if longest > max_dimension {
        let ratio = max_dimension as f64 / longest as f64;
        let new_width = ((width as f64 * ratio) as u32).max(1);
        let new_height = ((height as f64 * ratio) as u32).max(1);
        rgb = image::imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3);
    }

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
        .encode_image(&rgb)
        .context("Failed to encode screenshot as JPEG")?;

    crate::log(&format!(
        "Image processed for model: {}x{} RGB JPEG ({} bytes)",
        rgb.width(),
        rgb.height(),
        buffer.len()
    ));

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn test_binarize() {
        let mut img: GrayImage = ImageBuffer::new(3, 1);
        img.put_pixel(0, 0, Luma([100]));
        img.put_pixel(1, 0, Luma([200]));
        img.put_pixel(2, 0, Luma([127]));

        let result = binarize(&img, 127);

        assert_eq!(result.get_pixel(0, 0)[0], 0, "Dark pixel should be background");
        assert_eq!(result.get_pixel(1, 0)[0], 255, "Bright pixel should be foreground");
        assert_eq!(result.get_pixel(2, 0)[0], 0, "Threshold itself is not foreground");
    }

    #[test]
    fn test_variance_flat_image() {
        let img: GrayImage = ImageBuffer::from_pixel(10, 10, Luma([90]));
        assert!(intensity_variance(&img).abs() < 0.001);
    }

    #[test]
    fn test_variance_half_black_half_white() {
        // Mean 127.5, every pixel 127.5 away → variance 127.5²
        let img: GrayImage =
            ImageBuffer::from_fn(10, 10, |x, _| if x < 5 { Luma([0]) } else { Luma([255]) });
        assert!((intensity_variance(&img) - 16256.25).abs() < 0.01);
    }

    #[test]
    fn test_variance_empty_image() {
        let img: GrayImage = ImageBuffer::new(0, 0);
        assert_eq!(intensity_variance(&img), 0.0);
    }

    #[test]
    fn test_encode_for_model_bounds_dimension() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 100, image::Rgb([10, 20, 30])));
        let jpeg = encode_for_model(&img, 200, 90).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 50));
    }

    #[test]
    fn test_encode_for_model_keeps_small_images() {
        let img = DynamicImage::ImageRgba8(image::RgbaImage::new(64, 48));
        let jpeg = encode_for_model(&img, 2048, 95).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }
}
