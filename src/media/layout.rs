// SPDX-License-Identifier: MPL-2.0
//! Print sheet layout: packs copies of a photo onto a page at print
//! resolution and draws thin cut lines around each copy.
//!
//! Grid math runs in `f64` so the column and row counts match the
//! reference numbers exactly (35×45 mm on A4 gives 5×6).

use std::fmt;

use tiny_skia::{Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Stroke, Transform};

use crate::domain::media::EncodedImage;
use crate::domain::print::{PassportStandard, PrintLayout};
use crate::media::image::{decode, encode_jpeg, from_pixmap, to_pixmap, SHEET_JPEG_QUALITY};

// =============================================================================
// Constants
// =============================================================================

/// A4 sheet width in millimeters.
pub const A4_WIDTH_MM: f32 = 210.0;
/// A4 sheet height in millimeters.
pub const A4_HEIGHT_MM: f32 = 297.0;
/// Print resolution in dots per inch.
pub const PRINT_DPI: f32 = 300.0;
/// Blank border around the grid.
pub const DEFAULT_MARGIN_MM: f32 = 5.0;
/// Gap between neighboring copies.
pub const DEFAULT_GAP_MM: f32 = 2.0;
/// Extra page size around a single photo, split evenly on both sides.
pub const SINGLE_PAGE_PADDING_MM: f32 = 10.0;

const MM_PER_INCH: f64 = 25.4;
const CUT_LINE_COLOR: [u8; 3] = [0xe2, 0xe8, 0xf0];
const CUT_LINE_WIDTH: f32 = 1.0;

// =============================================================================
// LayoutError
// =============================================================================

/// Why a sheet could not be laid out or rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Photo size is zero, negative or not a number.
    InvalidDimensions { width_mm: f32, height_mm: f32 },
    /// Not even one copy fits inside the margins.
    PhotoTooLarge { width_mm: f32, height_mm: f32 },
    /// Decoding, allocation or encoding failed.
    Render(String),
}

impl LayoutError {
    /// Returns the i18n message key for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LayoutError::InvalidDimensions { .. } => "error-layout-invalid-size",
            LayoutError::PhotoTooLarge { .. } => "error-layout-photo-too-large",
            LayoutError::Render(_) => "error-layout-render",
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::InvalidDimensions {
                width_mm,
                height_mm,
            } => write!(f, "invalid photo size {width_mm}x{height_mm} mm"),
            LayoutError::PhotoTooLarge {
                width_mm,
                height_mm,
            } => write!(f, "a {width_mm}x{height_mm} mm photo does not fit on the sheet"),
            LayoutError::Render(msg) => write!(f, "sheet rendering failed: {msg}"),
        }
    }
}

impl std::error::Error for LayoutError {}

impl From<crate::error::Error> for LayoutError {
    fn from(err: crate::error::Error) -> Self {
        LayoutError::Render(err.to_string())
    }
}

// =============================================================================
// SheetSpec
// =============================================================================

/// Physical sheet description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    pub width_mm: f32,
    pub height_mm: f32,
    pub dpi: f32,
    pub margin_mm: f32,
    pub gap_mm: f32,
}

impl SheetSpec {
    /// A4 at 300 DPI with the default margin and gap.
    #[must_use]
    pub fn a4() -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            dpi: PRINT_DPI,
            margin_mm: DEFAULT_MARGIN_MM,
            gap_mm: DEFAULT_GAP_MM,
        }
    }

    /// Pixels per millimeter at this sheet's resolution.
    #[must_use]
    pub fn px_per_mm(&self) -> f64 {
        f64::from(self.dpi) / MM_PER_INCH
    }

    /// Canvas size in whole pixels (floored).
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            floor_px(f64::from(self.width_mm) * self.px_per_mm()),
            floor_px(f64::from(self.height_mm) * self.px_per_mm()),
        )
    }
}

impl Default for SheetSpec {
    fn default() -> Self {
        Self::a4()
    }
}

fn floor_px(value: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let px = value.floor().clamp(0.0, f64::from(u32::MAX)) as u32;
    px
}

/// Converts millimeters to pixels at the given resolution.
#[must_use]
pub fn mm_to_px(mm: f32, dpi: f32) -> f64 {
    f64::from(mm) * f64::from(dpi) / MM_PER_INCH
}

// =============================================================================
// GridLayout
// =============================================================================

/// Placement of every copy on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub cols: u32,
    pub rows: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub photo_width_px: f64,
    pub photo_height_px: f64,
    pub gap_px: f64,
    /// Left edge of the first column; leftover width is split evenly.
    pub start_x: f64,
    /// Top edge of the first row; leftover height is split evenly.
    pub start_y: f64,
}

impl GridLayout {
    /// Number of copies on the sheet.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Top-left corner of the cell at `(row, col)`.
    #[must_use]
    pub fn cell_origin(&self, row: u32, col: u32) -> (f64, f64) {
        (
            self.start_x + f64::from(col) * (self.photo_width_px + self.gap_px),
            self.start_y + f64::from(row) * (self.photo_height_px + self.gap_px),
        )
    }

    /// Iterates cell origins row by row.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| self.cell_origin(row, col)))
    }
}

fn validate_dimensions(width_mm: f32, height_mm: f32) -> Result<(), LayoutError> {
    let valid = |v: f32| v.is_finite() && v > 0.0;
    if valid(width_mm) && valid(height_mm) {
        Ok(())
    } else {
        Err(LayoutError::InvalidDimensions {
            width_mm,
            height_mm,
        })
    }
}

/// Computes how many copies of a `width_mm × height_mm` photo fit.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDimensions`] for non-positive or non-finite
/// sizes and [`LayoutError::PhotoTooLarge`] when no copy fits.
pub fn compute_grid(
    spec: &SheetSpec,
    width_mm: f32,
    height_mm: f32,
) -> Result<GridLayout, LayoutError> {
    validate_dimensions(width_mm, height_mm)?;

    let px_per_mm = spec.px_per_mm();
    let (canvas_width, canvas_height) = spec.canvas_size();
    let photo_w = f64::from(width_mm) * px_per_mm;
    let photo_h = f64::from(height_mm) * px_per_mm;
    let gap = f64::from(spec.gap_mm.max(0.0)) * px_per_mm;
    let margin = f64::from(spec.margin_mm.max(0.0)) * px_per_mm;

    let available_w = f64::from(canvas_width) - 2.0 * margin;
    let available_h = f64::from(canvas_height) - 2.0 * margin;
    let cols = ((available_w + gap) / (photo_w + gap)).floor();
    let rows = ((available_h + gap) / (photo_h + gap)).floor();
    if cols < 1.0 || rows < 1.0 {
        return Err(LayoutError::PhotoTooLarge {
            width_mm,
            height_mm,
        });
    }

    let grid_w = cols * photo_w + (cols - 1.0) * gap;
    let grid_h = rows * photo_h + (rows - 1.0) * gap;

    Ok(GridLayout {
        cols: floor_px(cols),
        rows: floor_px(rows),
        canvas_width,
        canvas_height,
        photo_width_px: photo_w,
        photo_height_px: photo_h,
        gap_px: gap,
        start_x: (f64::from(canvas_width) - grid_w) / 2.0,
        start_y: (f64::from(canvas_height) - grid_h) / 2.0,
    })
}

/// Rasterizes the grid: white page, one scaled copy per cell, cut lines.
///
/// # Errors
///
/// Returns [`LayoutError::Render`] if the photo cannot be decoded, the canvas
/// cannot be allocated, or encoding fails.
pub fn render_sheet(photo: &EncodedImage, grid: &GridLayout) -> Result<EncodedImage, LayoutError> {
    let source = to_pixmap(&decode(photo)?.to_rgba8())
        .ok_or_else(|| LayoutError::Render("photo has no pixels".into()))?;
    let mut canvas = Pixmap::new(grid.canvas_width, grid.canvas_height).ok_or_else(|| {
        LayoutError::Render(format!(
            "cannot allocate a {}x{} canvas",
            grid.canvas_width, grid.canvas_height
        ))
    })?;
    canvas.fill(Color::WHITE);

    #[allow(clippy::cast_possible_truncation)]
    let (cell_w, cell_h) = (grid.photo_width_px as f32, grid.photo_height_px as f32);
    #[allow(clippy::cast_precision_loss)]
    let scale_x = cell_w / source.width() as f32;
    #[allow(clippy::cast_precision_loss)]
    let scale_y = cell_h / source.height() as f32;

    let pixmap_paint = PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    };
    let mut line_paint = Paint::default();
    let [r, g, b] = CUT_LINE_COLOR;
    line_paint.set_color_rgba8(r, g, b, 255);
    let stroke = Stroke {
        width: CUT_LINE_WIDTH,
        ..Stroke::default()
    };

    for (x, y) in grid.cells() {
        #[allow(clippy::cast_possible_truncation)]
        let (x, y) = (x as f32, y as f32);
        canvas.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &pixmap_paint,
            Transform::from_row(scale_x, 0.0, 0.0, scale_y, x, y),
            None,
        );
        let rect = Rect::from_xywh(x, y, cell_w, cell_h)
            .ok_or_else(|| LayoutError::Render("invalid cell rectangle".into()))?;
        let outline = PathBuilder::from_rect(rect);
        canvas.stroke_path(&outline, &line_paint, &stroke, Transform::identity(), None);
    }

    Ok(encode_jpeg(&from_pixmap(&canvas), SHEET_JPEG_QUALITY)?)
}

// =============================================================================
// Sheet
// =============================================================================

/// A rendered, printable page.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub image: EncodedImage,
    pub copies: u32,
    pub layout: PrintLayout,
    /// Physical page size for PDF export.
    pub page_width_mm: f32,
    pub page_height_mm: f32,
}

/// Renders the sheet for a layout choice.
///
/// The single layout passes the photo through unchanged on a page 10 mm
/// larger than the standard in each direction.
///
/// # Errors
///
/// See [`compute_grid`] and [`render_sheet`].
pub fn build_sheet(
    photo: &EncodedImage,
    standard: &PassportStandard,
    layout: PrintLayout,
    spec: &SheetSpec,
) -> Result<Sheet, LayoutError> {
    match layout {
        PrintLayout::Single => {
            validate_dimensions(standard.width_mm, standard.height_mm)?;
            Ok(Sheet {
                image: photo.clone(),
                copies: 1,
                layout,
                page_width_mm: standard.width_mm + SINGLE_PAGE_PADDING_MM,
                page_height_mm: standard.height_mm + SINGLE_PAGE_PADDING_MM,
            })
        }
        PrintLayout::A4Sheet => {
            let grid = compute_grid(spec, standard.width_mm, standard.height_mm)?;
            let image = render_sheet(photo, &grid)?;
            Ok(Sheet {
                image,
                copies: grid.count(),
                layout,
                page_width_mm: spec.width_mm,
                page_height_mm: spec.height_mm,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::print::find_standard;
    use crate::media::image::encode_png;
    use crate::test_utils::assert_abs_diff_eq;
    use image_rs::{Rgba, RgbaImage};

    fn small_sheet() -> SheetSpec {
        // 127 DPI is exactly 5 px per mm, which keeps fixtures tiny and exact.
        SheetSpec {
            width_mm: 20.0,
            height_mm: 12.0,
            dpi: 127.0,
            margin_mm: 1.0,
            gap_mm: 1.0,
        }
    }

    fn red_photo() -> EncodedImage {
        encode_png(&RgbaImage::from_pixel(10, 10, Rgba([220, 20, 20, 255]))).expect("png")
    }

    #[test]
    fn a4_canvas_is_floored_at_300_dpi() {
        assert_eq!(SheetSpec::a4().canvas_size(), (2480, 3507));
    }

    #[test]
    fn schengen_size_fits_five_by_six_on_a4() {
        let grid = compute_grid(&SheetSpec::a4(), 35.0, 45.0).expect("grid");
        assert_eq!((grid.cols, grid.rows), (5, 6));
        assert_eq!(grid.count(), 30);
    }

    #[test]
    fn grid_is_centered_on_the_canvas() {
        let grid = compute_grid(&SheetSpec::a4(), 35.0, 45.0).expect("grid");
        let grid_w = 5.0 * grid.photo_width_px + 4.0 * grid.gap_px;
        let right_gap = f64::from(grid.canvas_width) - (grid.start_x + grid_w);
        assert_abs_diff_eq!(grid.start_x, right_gap, epsilon = 1e-9);
        assert_abs_diff_eq!(grid.start_x, 159.291, epsilon = 1e-3);
        assert_abs_diff_eq!(grid.start_y, 99.957, epsilon = 1e-3);
    }

    #[test]
    fn other_standards_pack_as_expected() {
        let us = find_standard("US").expect("US");
        let ca = find_standard("CA").expect("CA");
        let spec = SheetSpec::a4();
        assert_eq!(compute_grid(&spec, us.width_mm, us.height_mm).map(|g| g.count()), Ok(15));
        assert_eq!(compute_grid(&spec, ca.width_mm, ca.height_mm).map(|g| g.count()), Ok(12));
    }

    #[test]
    fn oversized_photo_is_an_explicit_error() {
        let err = compute_grid(&SheetSpec::a4(), 300.0, 45.0).unwrap_err();
        assert_eq!(
            err,
            LayoutError::PhotoTooLarge {
                width_mm: 300.0,
                height_mm: 45.0
            }
        );
    }

    #[test]
    fn invalid_dimensions_are_rejected() {
        for (w, h) in [(0.0, 45.0), (35.0, -1.0), (f32::NAN, 45.0), (35.0, f32::INFINITY)] {
            assert!(matches!(
                compute_grid(&SheetSpec::a4(), w, h),
                Err(LayoutError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn cells_walk_rows_then_columns() {
        let grid = compute_grid(&small_sheet(), 4.0, 4.0).expect("grid");
        assert_eq!((grid.cols, grid.rows), (3, 2));
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_abs_diff_eq!(cells[0].0, 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cells[0].1, 7.5, epsilon = 1e-9);
        assert_abs_diff_eq!(cells[1].0, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cells[4].0, 40.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cells[4].1, 32.5, epsilon = 1e-9);
    }

    #[test]
    fn render_draws_photo_inside_cells_and_leaves_gaps_white() {
        let grid = compute_grid(&small_sheet(), 4.0, 4.0).expect("grid");
        let sheet = render_sheet(&red_photo(), &grid).expect("render");
        assert_eq!((sheet.width(), sheet.height()), (100, 60));

        let pixels = decode(&sheet).expect("decode").to_rgba8();
        let inside = pixels.get_pixel(25, 17).0;
        assert!(inside[0] > 180 && inside[1] < 70, "cell pixel {inside:?}");
        let gap = pixels.get_pixel(37, 17).0;
        assert!(gap.iter().take(3).all(|c| *c > 200), "gap pixel {gap:?}");
        let margin = pixels.get_pixel(1, 1).0;
        assert!(margin.iter().take(3).all(|c| *c > 235), "margin pixel {margin:?}");
    }

    #[test]
    fn single_layout_passes_photo_through() {
        let photo = red_photo();
        let standard = find_standard("UK").expect("UK");
        let sheet = build_sheet(&photo, standard, PrintLayout::Single, &SheetSpec::a4()).expect("sheet");
        assert_eq!(sheet.copies, 1);
        assert!(sheet.image.shares_buffer_with(&photo));
        assert_abs_diff_eq!(sheet.page_width_mm, 45.0);
        assert_abs_diff_eq!(sheet.page_height_mm, 55.0);
    }

    #[test]
    fn undecodable_photo_is_a_render_error() {
        let broken = EncodedImage::new(vec![1_u8, 2, 3], crate::domain::media::ImageFormat::Png, 1, 1);
        let grid = compute_grid(&small_sheet(), 4.0, 4.0).expect("grid");
        assert!(matches!(render_sheet(&broken, &grid), Err(LayoutError::Render(_))));
    }
}
