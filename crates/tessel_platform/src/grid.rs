//! Grid hit testing
//!
//! The trigger grid tiles the window. Cells are numbered row-major from the
//! top-left corner.

use tessel_core::{Point, Rect, Size};

use crate::error::{PlatformError, Result};

/// Default grid columns
pub const DEFAULT_COLS: usize = 12;
/// Default grid rows
pub const DEFAULT_ROWS: usize = 3;

/// A cols x rows grid stretched over the window
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    cols: usize,
    rows: usize,
    size: Size,
}

impl GridLayout {
    pub fn new(cols: usize, rows: usize, size: Size) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(PlatformError::InvalidGrid { cols, rows });
        }
        check_size(size)?;
        Ok(Self { cols, rows, size })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Window center, where every figure is anchored
    pub fn center(&self) -> Point {
        self.size.center()
    }

    /// Track a window resize
    pub fn resize(&mut self, size: Size) -> Result<()> {
        check_size(size)?;
        self.size = size;
        Ok(())
    }

    fn cell_size(&self) -> Size {
        Size::new(
            self.size.width / self.cols as f32,
            self.size.height / self.rows as f32,
        )
    }

    /// The cell under a point, if the point is inside the window
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        if !Rect::from(self.size).contains(point) {
            return None;
        }
        let cell = self.cell_size();
        let col = ((point.x / cell.width) as usize).min(self.cols - 1);
        let row = ((point.y / cell.height) as usize).min(self.rows - 1);
        Some(row * self.cols + col)
    }

    /// Bounds of a cell
    pub fn cell_rect(&self, index: usize) -> Result<Rect> {
        if index >= self.cell_count() {
            return Err(PlatformError::CellOutOfRange {
                cell: index,
                count: self.cell_count(),
            });
        }
        let cell = self.cell_size();
        let col = (index % self.cols) as f32;
        let row = (index / self.cols) as f32;
        Ok(Rect::new(
            col * cell.width,
            row * cell.height,
            cell.width,
            cell.height,
        ))
    }
}

fn check_size(size: Size) -> Result<()> {
    if size.is_empty() || !size.width.is_finite() || !size.height.is_finite() {
        return Err(PlatformError::InvalidSize {
            width: size.width,
            height: size.height,
        });
    }
    Ok(())
}
