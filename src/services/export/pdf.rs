//! Document rendering for report exports
//!
//! Lays out a titled, paginated A4 table: centred title, generation
//! timestamp, a grey header band with bold white text repeated on every
//! page, plain body rows and grid lines on all cells. Column widths are
//! proportional to content length; overlong cell text is truncated with an
//! ellipsis. The built-in Helvetica fonts keep the renderer free of font
//! file deployment.

use chrono::Local;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rgb,
};

use crate::services::export::table::TableView;
use crate::utils::errors::{AidtrackError, Result};

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 14.0;

const TITLE_SIZE: f64 = 18.0;
const META_SIZE: f64 = 10.0;
const HEADER_SIZE: f64 = 9.0;
const BODY_SIZE: f64 = 8.0;

const HEADER_ROW_HEIGHT: f64 = 8.0;
const BODY_ROW_HEIGHT: f64 = 7.0;
const CELL_PADDING: f64 = 1.5;

const PT_TO_MM: f64 = 0.352_778;
/// Average Helvetica glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f64 = 0.5;

/// Content-length weights are clamped to this range before widths are
/// distributed, so one verbose column cannot starve the rest.
const MIN_WEIGHT: usize = 4;
const MAX_WEIGHT: usize = 40;

pub fn render(view: &TableView) -> Result<Vec<u8>> {
    let title = format!("AIDTRACK - {} Report", view.title);
    let (doc, first_page, first_layer) =
        PdfDocument::new(title.clone(), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))?;

    let widths = column_widths(view);
    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    // Title block on the first page only.
    set_fill(&layer, 0.0, 0.0, 0.0);
    let title_x = ((PAGE_WIDTH - text_width(&title, TITLE_SIZE)) / 2.0).max(MARGIN);
    layer.use_text(
        title.clone(),
        TITLE_SIZE,
        Mm(title_x),
        Mm(PAGE_HEIGHT - 25.0),
        &font_bold,
    );
    let generated = format!("Generated on: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    layer.use_text(
        generated,
        META_SIZE,
        Mm(MARGIN),
        Mm(PAGE_HEIGHT - 35.0),
        &font,
    );

    let mut y = PAGE_HEIGHT - 45.0;
    y = draw_header_band(&layer, &font_bold, &widths, &view.headers, y);

    for row in &view.rows {
        if y - BODY_ROW_HEIGHT < MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - MARGIN;
            y = draw_header_band(&layer, &font_bold, &widths, &view.headers, y);
        }

        let bottom = y - BODY_ROW_HEIGHT;
        let mut x = MARGIN;
        set_fill(&layer, 0.0, 0.0, 0.0);
        for (col, width) in widths.iter().enumerate() {
            layer.add_shape(cell_outline(x, bottom, *width, BODY_ROW_HEIGHT, false));
            if let Some(cell) = row.get(col) {
                let text = fit_text(&cell.document_text(), *width, BODY_SIZE);
                if !text.is_empty() {
                    layer.use_text(
                        text,
                        BODY_SIZE,
                        Mm(x + CELL_PADDING),
                        Mm(bottom + 2.2),
                        &font,
                    );
                }
            }
            x += width;
        }
        y = bottom;
    }

    doc.save_to_bytes()
        .map_err(|err| AidtrackError::ExportFailure(err.to_string()))
}

/// Draw the inverted header band at `top` and return the new cursor.
fn draw_header_band(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    widths: &[f64],
    headers: &[&'static str],
    top: f64,
) -> f64 {
    let bottom = top - HEADER_ROW_HEIGHT;
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);

    let mut x = MARGIN;
    for (col, width) in widths.iter().enumerate() {
        set_fill(layer, 0.45, 0.45, 0.45);
        layer.add_shape(cell_outline(x, bottom, *width, HEADER_ROW_HEIGHT, true));
        set_fill(layer, 1.0, 1.0, 1.0);
        if let Some(header) = headers.get(col) {
            layer.use_text(
                fit_text(header, *width, HEADER_SIZE),
                HEADER_SIZE,
                Mm(x + CELL_PADDING),
                Mm(bottom + 2.6),
                font,
            );
        }
        x += width;
    }
    bottom
}

fn set_fill(layer: &PdfLayerReference, r: f64, g: f64, b: f64) {
    layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
}

/// Closed rectangle path; stroked always, filled for the header band.
fn cell_outline(x: f64, y: f64, width: f64, height: f64, filled: bool) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(x), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y)), false),
            (Point::new(Mm(x + width), Mm(y + height)), false),
            (Point::new(Mm(x), Mm(y + height)), false),
        ],
        is_closed: true,
        has_fill: filled,
        has_stroke: true,
        is_clipping_path: false,
    }
}

/// Distribute the usable page width across columns proportionally to their
/// longest rendered content.
fn column_widths(view: &TableView) -> Vec<f64> {
    let usable = PAGE_WIDTH - 2.0 * MARGIN;
    let weights: Vec<f64> = view
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let longest = view
                .rows
                .iter()
                .map(|row| {
                    row.get(col)
                        .map(|cell| cell.document_text().chars().count())
                        .unwrap_or(0)
                })
                .max()
                .unwrap_or(0)
                .max(header.chars().count());
            longest.clamp(MIN_WEIGHT, MAX_WEIGHT) as f64
        })
        .collect();

    let total: f64 = weights.iter().sum();
    weights.iter().map(|w| usable * w / total).collect()
}

fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * GLYPH_WIDTH * font_size * PT_TO_MM
}

/// Truncate text to fit the cell width, appending an ellipsis when content
/// is dropped.
fn fit_text(text: &str, width: f64, font_size: f64) -> String {
    let glyph = GLYPH_WIDTH * font_size * PT_TO_MM;
    let capacity = (((width - 2.0 * CELL_PADDING) / glyph).floor().max(1.0)) as usize;
    let length = text.chars().count();
    if length <= capacity {
        return text.to_string();
    }
    if capacity <= 3 {
        return text.chars().take(capacity).collect();
    }
    let mut truncated: String = text.chars().take(capacity - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::export::table::CellValue;

    fn fixture_view(rows: usize) -> TableView {
        TableView {
            name: "trainees",
            title: "Trainees",
            headers: vec!["Name", "CPR", "First Aid"],
            rows: (0..rows)
                .map(|i| {
                    vec![
                        CellValue::Text(format!("Trainee {}", i)),
                        CellValue::Bool(i % 2 == 0),
                        CellValue::Bool(false),
                    ]
                })
                .collect(),
        }
    }

    #[test]
    fn document_bytes_have_pdf_magic() {
        let bytes = render(&fixture_view(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn large_result_sets_paginate_without_error() {
        let bytes = render(&fixture_view(200)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 4_000);
    }

    #[test]
    fn column_widths_fill_the_usable_page() {
        let widths = column_widths(&fixture_view(5));
        let total: f64 = widths.iter().sum();
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 0.001);
    }

    #[test]
    fn overlong_text_is_truncated_with_ellipsis() {
        let fitted = fit_text(&"x".repeat(200), 20.0, BODY_SIZE);
        assert!(fitted.ends_with("..."));
        assert!(fitted.chars().count() < 200);
    }

    #[test]
    fn short_text_is_left_untouched() {
        assert_eq!(fit_text("East", 30.0, BODY_SIZE), "East");
    }
}
