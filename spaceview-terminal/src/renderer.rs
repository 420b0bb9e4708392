/// ASCII rasterizer for the camera's screen polygons
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use spaceview_core::{Polygon, Rgba, Screen, ScreenPoint};
use std::io::Write;

/// Character luminosity ramp for fill shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const STROKE_CHAR: char = '#';

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    character: char,
    foreground: Option<Color>,
    background: Option<Color>,
}

impl Cell {
    const EMPTY: Cell = Cell {
        character: ' ',
        foreground: None,
        background: None,
    };
}

/// Rasterizes screen polygons into a grid of terminal cells.
///
/// Polygons are painted in the order the screen holds them; a later polygon
/// overwrites an earlier one wherever they overlap. There is no depth buffer.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Paints every polygon of `screen`, scaled from screen pixels to cells.
    pub fn render_screen(&mut self, screen: &Screen) {
        let scale_x = self.width as f64 / f64::from(screen.width().max(1));
        let scale_y = self.height as f64 / f64::from(screen.height().max(1));
        for polygon in screen.as_polygons() {
            let points = polygon
                .points
                .map(|p| ScreenPoint::new(p.x * scale_x, p.y * scale_y));
            self.render_polygon(&Polygon { points, ..polygon });
        }
    }

    /// Fills the polygon and traces its outline.
    ///
    /// Stroke widths below one cell are drawn one cell wide.
    pub fn render_polygon(&mut self, polygon: &Polygon) {
        let fill = Cell {
            character: shade(polygon.style.fill),
            foreground: Some(to_color(polygon.style.fill)),
            background: Some(to_color(polygon.style.fill)),
        };
        let stroke = Cell {
            character: STROKE_CHAR,
            foreground: Some(to_color(polygon.style.stroke)),
            background: Some(to_color(polygon.style.fill)),
        };

        self.fill_triangle(&polygon.points, fill);
        let [a, b, c] = polygon.points;
        for (from, to) in [(a, b), (b, c), (c, a)] {
            self.draw_line(from, to, stroke);
        }
    }

    fn fill_triangle(&mut self, points: &[ScreenPoint; 3], cell: Cell) {
        let [v0, v1, v2] = *points;

        // Bounding box
        let min_x = v0.x.min(v1.x).min(v2.x).floor() as i64;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil() as i64;
        let min_y = v0.y.min(v1.y).min(v2.y).floor() as i64;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil() as i64;

        // Clip to grid bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i64 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = ScreenPoint::new(x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set(x, y, cell);
                    }
                }
            }
        }
    }

    /// Bresenham line between the cells containing `from` and `to`.
    fn draw_line(&mut self, from: ScreenPoint, to: ScreenPoint, cell: Cell) {
        let (mut x, mut y) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut error = dx + dy;

        loop {
            self.set(x, y, cell);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    fn set(&mut self, x: i64, y: i64, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = cell;
    }

    /// The grid as plain characters, one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|cell| cell.character).collect())
            .collect()
    }

    /// Writes the grid with colors, starting at the top-left corner.
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = (None, None);
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if (cell.foreground, cell.background) != current {
                    writer.queue(ResetColor)?;
                    if let Some(color) = cell.foreground {
                        writer.queue(SetForegroundColor(color))?;
                    }
                    if let Some(color) = cell.background {
                        writer.queue(SetBackgroundColor(color))?;
                    }
                    current = (cell.foreground, cell.background);
                }
                writer.queue(Print(cell.character))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(color: Rgba) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Ramp character for a color's luminance, scaled by its opacity.
fn shade(color: Rgba) -> char {
    let luminance =
        (0.299 * f64::from(color.r) + 0.587 * f64::from(color.g) + 0.114 * f64::from(color.b))
            * f64::from(color.a)
            / (255.0 * 255.0);
    let char_index = (luminance * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: ScreenPoint,
    v1: ScreenPoint,
    v2: ScreenPoint,
    p: ScreenPoint,
) -> Option<(f64, f64, f64)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
