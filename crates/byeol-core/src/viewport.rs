//! Viewport and pointer state.

/// The drawing surface dimensions in scene pixels.
///
/// Mutated only by resize notifications; everything else reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical pixels per terminal cell (half-block rendering uses 2).
    pub scale: f32,
}

impl Viewport {
    /// Create a viewport with the given pixel dimensions.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            scale: 1.0,
        }
    }

    /// Set the vertical pixels-per-cell factor of the backing surface.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Update dimensions in place. Entities are not touched; anything
    /// now out of bounds self-corrects on its next update.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
    }

    /// Surface area in pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Geometric center, the parallax origin.
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// A zero-area viewport produces zero entities and no-op fills.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Last known pointer position in scene pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    /// Start the pointer at the viewport center so the parallax offset
    /// is zero until the first move event.
    pub fn centered(viewport: &Viewport) -> Self {
        let (x, y) = viewport.center();
        Self { x, y }
    }

    /// Record a pointer-moved notification.
    pub fn moved(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }
}
