//! Dominant colour extraction with k-means clustering.

use image::RgbImage;
use std::collections::HashSet;

use super::ColorPalette;

/// Number of colour clusters.
pub const PALETTE_CLUSTERS: usize = 5;

/// Pixels are subsampled down to at most this many before clustering.
const MAX_SAMPLES: usize = 20_000;

const MAX_ITERATIONS: usize = 20;

/// Clusters the image's pixels into `k` dominant colours.
///
/// Seeding is deterministic: distinct sample colours are ordered by luminance
/// and `k` evenly spaced ones become the initial centroids. Returns `None` when
/// there are fewer than `k` distinct colours to cluster.
pub fn dominant_colors(img: &RgbImage, k: usize) -> Option<ColorPalette> {
    if k == 0 {
        return None;
    }

    let samples = sample_pixels(img);
    let mut distinct: Vec<[u8; 3]> = samples
        .iter()
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    if distinct.len() < k {
        return None;
    }
    distinct.sort_by(|a, b| {
        luminance(a)
            .total_cmp(&luminance(b))
            .then_with(|| a.cmp(b))
    });

    let mut centroids: Vec<[f64; 3]> = (0..k)
        .map(|i| {
            let c = distinct[(2 * i + 1) * distinct.len() / (2 * k)];
            [c[0] as f64, c[1] as f64, c[2] as f64]
        })
        .collect();

    let mut assignments = vec![usize::MAX; samples.len()];
    for _ in 0..MAX_ITERATIONS {
        let mut changed = false;
        for (slot, pixel) in assignments.iter_mut().zip(&samples) {
            let nearest = nearest_centroid(pixel, &centroids);
            if *slot != nearest {
                *slot = nearest;
                changed = true;
            }
        }
        if !changed {
            break;
        }

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0usize; k];
        for (&cluster, pixel) in assignments.iter().zip(&samples) {
            for channel in 0..3 {
                sums[cluster][channel] += pixel[channel] as f64;
            }
            counts[cluster] += 1;
        }
        for cluster in 0..k {
            // Empty clusters keep their previous centroid
            if counts[cluster] > 0 {
                for channel in 0..3 {
                    centroids[cluster][channel] = sums[cluster][channel] / counts[cluster] as f64;
                }
            }
        }
    }

    let mut counts = vec![0usize; k];
    for &cluster in &assignments {
        counts[cluster] += 1;
    }

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    let dominant_colors: Vec<[u8; 3]> = order
        .iter()
        .map(|&i| centroids[i].map(|v| v.round().clamp(0.0, 255.0) as u8))
        .collect();
    let primary = dominant_colors.first().map(|c| to_hex(*c));

    Some(ColorPalette {
        color_count: dominant_colors.len(),
        dominant_colors,
        primary,
    })
}

/// Takes every n-th pixel so that at most `MAX_SAMPLES` remain.
fn sample_pixels(img: &RgbImage) -> Vec<[u8; 3]> {
    let total = img.width() as usize * img.height() as usize;
    let stride = total.div_ceil(MAX_SAMPLES).max(1);
    img.pixels().step_by(stride).map(|p| p.0).collect()
}

fn nearest_centroid(pixel: &[u8; 3], centroids: &[[f64; 3]]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let distance: f64 = (0..3)
            .map(|c| {
                let diff = pixel[c] as f64 - centroid[c];
                diff * diff
            })
            .sum();
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best
}

fn luminance(c: &[u8; 3]) -> f64 {
    0.299 * c[0] as f64 + 0.587 * c[1] as f64 + 0.114 * c[2] as f64
}

/// Formats a colour as `#rrggbb`.
pub fn to_hex(c: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    /// Five vertical stripes of distinct colours with decreasing widths.
    fn striped_image() -> RgbImage {
        let stripes: [([u8; 3], u32); 5] = [
            ([255, 255, 255], 40),
            ([20, 20, 20], 25),
            ([230, 60, 40], 15),
            ([40, 90, 220], 12),
            ([60, 200, 90], 8),
        ];
        ImageBuffer::from_fn(100, 10, |x, _| {
            let mut edge = 0;
            for (color, width) in stripes {
                edge += width;
                if x < edge {
                    return Rgb(color);
                }
            }
            Rgb([0, 0, 0])
        })
    }

    #[test]
    fn test_exact_colours_recovered_in_population_order() {
        let palette = dominant_colors(&striped_image(), 5).unwrap();

        assert_eq!(palette.color_count, 5);
        assert_eq!(palette.dominant_colors[0], [255, 255, 255]);
        assert_eq!(palette.dominant_colors[1], [20, 20, 20]);
        assert_eq!(palette.dominant_colors[4], [60, 200, 90]);
        assert_eq!(palette.primary.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn test_deterministic() {
        let img = striped_image();
        let first = dominant_colors(&img, 5).unwrap();
        let second = dominant_colors(&img, 5).unwrap();
        assert_eq!(first.dominant_colors, second.dominant_colors);
    }

    #[test]
    fn test_too_few_colours() {
        let img: RgbImage = ImageBuffer::from_pixel(20, 20, Rgb([10, 10, 10]));
        assert!(dominant_colors(&img, 5).is_none());
    }

    #[test]
    fn test_empty_image() {
        let img: RgbImage = ImageBuffer::new(0, 0);
        assert!(dominant_colors(&img, 5).is_none());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([243, 156, 18]), "#f39c12");
    }
}
