//! Frame buffer of projected triangles
//!
//! The screen does not rasterize anything. It collects the triangles produced
//! by one projection pass and hands them out as styled polygons.

/// A position on the screen in pixels. `(0, 0)` is the top-left corner; values
/// outside `[0, width] x [0, height]` are kept so partially visible triangles
/// can be clipped by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub type ScreenTriangle = [ScreenPoint; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgba {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }
}

/// How a polygon is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_thickness: f64,
}

impl Default for PolygonStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::new(255, 100, 100, 100),
            stroke: Rgba::new(255, 0, 0, 0),
            stroke_thickness: 0.9,
        }
    }
}

/// A drawable triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polygon {
    pub points: ScreenTriangle,
    pub style: PolygonStyle,
}

/// Triangles projected during the current frame.
#[derive(Debug, Clone)]
pub struct Screen {
    width: u32,
    height: u32,
    triangles: Vec<ScreenTriangle>,
}

impl Screen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            triangles: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
    }

    pub fn add(&mut self, triangle: ScreenTriangle) {
        self.triangles.push(triangle);
    }

    pub fn triangles(&self) -> &[ScreenTriangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// One polygon per stored triangle, in insertion order.
    pub fn as_polygons(&self) -> Vec<Polygon> {
        let style = PolygonStyle::default();
        self.triangles
            .iter()
            .map(|points| Polygon {
                points: *points,
                style,
            })
            .collect()
    }
}
