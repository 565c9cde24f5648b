//! # Contextual Toolbar
//!
//! Geometry for the formatting toolbar shown next to the active region.
//! Rendering belongs to the host; this module only decides where the
//! toolbar goes and whether a pointer event lands inside it.

/// Viewport-space point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Viewport-space rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Gap between the toolbar and the region it annotates
const ANCHOR_GAP: f64 = 8.0;

/// Contextual toolbar anchored near the active region
#[derive(Debug)]
pub struct Toolbar {
    width: f64,
    height: f64,
    bounds: Option<Rect>,
}

impl Toolbar {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            bounds: None,
        }
    }

    /// Anchor the toolbar above `region`, clamped into `viewport` so it
    /// never renders off-screen. Returns the chosen bounds.
    pub fn show_for(&mut self, region: Rect, viewport: Rect) -> Rect {
        let x = (region.x)
            .min(viewport.right() - self.width)
            .max(viewport.x);
        let y = (region.y - self.height - ANCHOR_GAP)
            .min(viewport.bottom() - self.height)
            .max(viewport.y);

        let bounds = Rect::new(x, y, self.width, self.height);
        self.bounds = Some(bounds);
        bounds
    }

    /// Tear the toolbar down
    pub fn hide(&mut self) {
        self.bounds = None;
    }

    pub fn is_visible(&self) -> bool {
        self.bounds.is_some()
    }

    /// Current bounds while shown
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether a pointer event lands inside the visible toolbar
    pub fn contains(&self, point: Point) -> bool {
        self.bounds.map(|b| b.contains(point)).unwrap_or(false)
    }
}
