//! Heuristic UI element detection.
//!
//! Foreground regions of the binarized screenshot are labelled as 8-connected
//! components. Only outermost regions are kept, and their bounding boxes are
//! filtered by size into button and form-field candidates.

use image::GrayImage;

use super::{
    DetectedRegion, Dimensions, ImageRegion, Layout, Rect, RegionKind, Section, SectionKind,
    SectionSpan,
};

/// Button-like bounding boxes: 50 < width < 300, 20 < height < 80.
const BUTTON_WIDTH: (u32, u32) = (50, 300);
const BUTTON_HEIGHT: (u32, u32) = (20, 80);

/// Form-field-like bounding boxes: 100 < width < 500, 20 < height < 50.
const FORM_WIDTH: (u32, u32) = (100, 500);
const FORM_HEIGHT: (u32, u32) = (20, 50);

/// Headline band assumed at the top of the page.
const HEADLINE_MAX_WIDTH: u32 = 800;
const HEADLINE_MAX_HEIGHT: u32 = 60;

/// Grayscale variance above this indicates photographic or illustrated content.
pub const IMAGE_VARIANCE_THRESHOLD: f64 = 1000.0;

/// Pages narrower than this are treated as mobile captures.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Section boundaries as fractions of page height: header, hero, content.
const SECTION_RATIOS: [(SectionKind, f64, f64); 3] = [
    (SectionKind::Header, 0.0, 0.125),
    (SectionKind::Hero, 0.125, 0.5),
    (SectionKind::Content, 0.5, 1.0),
];

/// Marks background (zero) pixels 4-connected to the image border.
///
/// Background not reached here lies in a hole of some foreground region.
fn outer_background(binary: &GrayImage) -> Vec<bool> {
    let (width, height) = binary.dimensions();
    let mut outer = vec![false; width as usize * height as usize];
    let mut stack: Vec<(u32, u32)> = Vec::new();

    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;

    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    for (x, y) in border {
        if !outer[index(x, y)] && binary.get_pixel(x, y)[0] == 0 {
            outer[index(x, y)] = true;
            stack.push((x, y));
        }
    }

    while let Some((cx, cy)) = stack.pop() {
        let neighbours = [
            (cx.checked_sub(1), Some(cy)),
            ((cx + 1 < width).then_some(cx + 1), Some(cy)),
            (Some(cx), cy.checked_sub(1)),
            (Some(cx), (cy + 1 < height).then_some(cy + 1)),
        ];
        for (nx, ny) in neighbours {
            let (Some(nx), Some(ny)) = (nx, ny) else {
                continue;
            };
            let i = index(nx, ny);
            if !outer[i] && binary.get_pixel(nx, ny)[0] == 0 {
                outer[i] = true;
                stack.push((nx, ny));
            }
        }
    }

    outer
}

/// Labels 8-connected foreground (non-zero) regions and returns the bounding
/// boxes of the outermost ones.
///
/// A region counts as outermost when it touches the image border or the
/// background connected to it. Regions sitting inside a hole of another
/// region are skipped. Boxes are returned in raster order of each region's
/// first pixel.
pub fn component_boxes(binary: &GrayImage) -> Vec<Rect> {
    let (width, height) = binary.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let outer = outer_background(binary);
    let mut visited = vec![false; width as usize * height as usize];
    let mut boxes = Vec::new();
    let mut stack: Vec<(u32, u32)> = Vec::new();

    let index = |x: u32, y: u32| y as usize * width as usize + x as usize;

    for y in 0..height {
        for x in 0..width {
            if visited[index(x, y)] || binary.get_pixel(x, y)[0] == 0 {
                continue;
            }

            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut is_outer = false;
            visited[index(x, y)] = true;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                if cx == 0 || cy == 0 || cx == width - 1 || cy == height - 1 {
                    is_outer = true;
                }

                let x_lo = cx.saturating_sub(1);
                let y_lo = cy.saturating_sub(1);
                let x_hi = (cx + 1).min(width - 1);
                let y_hi = (cy + 1).min(height - 1);

                for ny in y_lo..=y_hi {
                    for nx in x_lo..=x_hi {
                        let i = index(nx, ny);
                        if binary.get_pixel(nx, ny)[0] == 0 {
                            // Only edge-sharing background separates regions
                            if outer[i] && (nx == cx || ny == cy) {
                                is_outer = true;
                            }
                        } else if !visited[i] {
                            visited[i] = true;
                            stack.push((nx, ny));
                        }
                    }
                }
            }

            if is_outer {
                boxes.push(Rect {
                    x: min_x,
                    y: min_y,
                    width: max_x - min_x + 1,
                    height: max_y - min_y + 1,
                });
            }
        }
    }

    boxes
}

fn within(value: u32, (low, high): (u32, u32)) -> bool {
    low < value && value < high
}

/// Keeps bounding boxes shaped like buttons or CTAs.
pub fn detect_buttons(boxes: &[Rect]) -> Vec<DetectedRegion> {
    boxes
        .iter()
        .filter(|b| within(b.width, BUTTON_WIDTH) && within(b.height, BUTTON_HEIGHT))
        .map(|b| DetectedRegion {
            kind: RegionKind::Button,
            position: *b,
            area: Some(b.width as u64 * b.height as u64),
        })
        .collect()
}

/// Keeps bounding boxes shaped like form input fields.
pub fn detect_forms(boxes: &[Rect]) -> Vec<DetectedRegion> {
    boxes
        .iter()
        .filter(|b| within(b.width, FORM_WIDTH) && within(b.height, FORM_HEIGHT))
        .map(|b| DetectedRegion {
            kind: RegionKind::FormField,
            position: *b,
            area: None,
        })
        .collect()
}

/// Returns the headline band at the top of the page.
pub fn detect_headlines(width: u32, height: u32) -> Vec<DetectedRegion> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    vec![DetectedRegion {
        kind: RegionKind::Headline,
        position: Rect {
            x: 0,
            y: 0,
            width: width.min(HEADLINE_MAX_WIDTH),
            height: height.min(HEADLINE_MAX_HEIGHT),
        },
        area: None,
    }]
}

/// Reports imagery when intensity variance is high enough.
pub fn detect_images(variance: f64) -> Vec<ImageRegion> {
    if variance > IMAGE_VARIANCE_THRESHOLD {
        vec![ImageRegion::default()]
    } else {
        Vec::new()
    }
}

/// Summarizes page geometry and splits it into fixed-ratio sections.
pub fn analyze_layout(width: u32, height: u32) -> Layout {
    let aspect_ratio = if height == 0 {
        0.0
    } else {
        width as f64 / height as f64
    };

    let sections = SECTION_RATIOS
        .iter()
        .map(|&(kind, start, end)| Section {
            kind,
            position: SectionSpan {
                y_start: (height as f64 * start).round() as u32,
                y_end: (height as f64 * end).round() as u32,
            },
        })
        .collect();

    Layout {
        dimensions: Dimensions { width, height },
        aspect_ratio,
        is_mobile: width < MOBILE_MAX_WIDTH,
        sections,
    }
}
