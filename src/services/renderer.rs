use crate::models::analysis::MissionOutcome;
use crate::models::annotation::{AnchorPoint, Slot, TextAnnotation};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
const ANNOTATION_LABEL_COLOR: Rgb<u8> = Rgb([60, 120, 255]);
const SLOT_LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 0]);
const MARKER_ARM: f32 = 5.0;

/// A rendering failure is reported but never fails the analysis.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to prepare debug image destination: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write debug image: {0}")]
    Encode(#[from] image::ImageError),
}

fn marker_color(outcome: MissionOutcome) -> Rgb<u8> {
    match outcome {
        MissionOutcome::Green => Rgb([0, 255, 0]),
        MissionOutcome::Red => Rgb([255, 0, 0]),
        MissionOutcome::NotCompleted => Rgb([255, 255, 255]),
    }
}

/// Draw bounding quads, sample markers, and classification labels onto a
/// copy of the source image.
///
/// Returns `None` (a logged skip, not an error) when there is nothing to
/// mark up: a blank annotated copy helps nobody diagnose anything. The
/// source bitmap is never mutated.
pub fn render_debug(
    source: &RgbImage,
    annotations: &[TextAnnotation],
    anchors: &BTreeMap<Slot, AnchorPoint>,
    outcomes: &BTreeMap<Slot, MissionOutcome>,
) -> Option<RgbImage> {
    if annotations.is_empty() || anchors.is_empty() {
        debug!(
            annotations = annotations.len(),
            anchors = anchors.len(),
            "skipping debug render, nothing to mark up"
        );
        return None;
    }

    let mut canvas = source.clone();

    for annotation in annotations {
        draw_quad_outline(&mut canvas, annotation);

        let origin = annotation.first_vertex();
        let label_x = origin.x.max(0) as u32;
        let label_y = (origin.y - 2).max(0) as u32;
        draw_label(
            &mut canvas,
            label_x,
            label_y,
            &annotation.text,
            ANNOTATION_LABEL_COLOR,
        );
    }

    for (slot, anchor) in anchors {
        let outcome = outcomes.get(slot).copied();
        let color = outcome
            .map(marker_color)
            .unwrap_or(Rgb([255, 255, 255]));

        draw_x_marker(&mut canvas, anchor.x as f32, anchor.y as f32, color);

        let text = format!(
            "{}: {}",
            slot.label(),
            outcome.map(|o| o.as_str()).unwrap_or("unknown")
        );
        let label_x = (anchor.x as i64 + 15).max(0) as u32;
        let label_y = (anchor.y as i64).max(0) as u32;
        draw_label(&mut canvas, label_x, label_y, &text, SLOT_LABEL_COLOR);
    }

    Some(canvas)
}

/// Persist the rendered canvas, creating parent directories as needed.
pub fn save_debug_image(canvas: &RgbImage, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save(path)?;
    info!(path = %path.display(), "debug image saved");
    Ok(())
}

fn draw_quad_outline(canvas: &mut RgbImage, annotation: &TextAnnotation) {
    let quad = &annotation.bounding_box;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            OUTLINE_COLOR,
        );
    }
}

fn draw_x_marker(canvas: &mut RgbImage, x: f32, y: f32, color: Rgb<u8>) {
    draw_line_segment_mut(
        canvas,
        (x - MARKER_ARM, y - MARKER_ARM),
        (x + MARKER_ARM, y + MARKER_ARM),
        color,
    );
    draw_line_segment_mut(
        canvas,
        (x - MARKER_ARM, y + MARKER_ARM),
        (x + MARKER_ARM, y - MARKER_ARM),
        color,
    );
}

const GLYPH_WIDTH: u32 = 6;
const GLYPH_HEIGHT: u32 = 8;

/// Draw text with a black backing strip so labels stay readable over the
/// screenshot. Uses the built-in 5x7 glyph table; no font asset required.
fn draw_label(canvas: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();
    let strip_width = (text.chars().count() as u32) * GLYPH_WIDTH;
    let top = y.saturating_sub(GLYPH_HEIGHT);

    for dy in 0..GLYPH_HEIGHT {
        for dx in 0..strip_width {
            let px = x + dx;
            let py = top + dy;
            if px < width && py < height {
                canvas.put_pixel(px, py, Rgb([0, 0, 0]));
            }
        }
    }

    for (i, ch) in text.chars().enumerate() {
        draw_glyph(canvas, x + i as u32 * GLYPH_WIDTH, top, ch, color);
    }
}

/// 5x7 bitmap glyphs; bits 0-4 of each row byte are the pixels.
fn glyph_rows(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b01110, 0b10000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001, 0b01110],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000],
        '|' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '%' => [0b11001, 0b11010, 0b00100, 0b01000, 0b10000, 0b01011, 0b10011],
        ' ' => [0b00000; 7],
        // Unknown characters render as a hollow box.
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

fn draw_glyph(canvas: &mut RgbImage, x: u32, y: u32, ch: char, color: Rgb<u8>) {
    let (width, height) = canvas.dimensions();

    for (row, bits) in glyph_rows(ch).iter().enumerate() {
        for col in 0..5u32 {
            if bits & (1 << (4 - col)) != 0 {
                let px = x + col;
                let py = y + row as u32;
                if px < width && py < height {
                    canvas.put_pixel(px, py, color);
                }
            }
        }
    }
}
