use crate::geometry::Size;

/// Tunables for the editor. Defaults match the stock flow builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Distance under which a dragged cable snaps to an input port.
    pub snap_radius: f32,
    /// Size given to nodes created from the catalog.
    pub node_size: Size,
    /// Background grid cell size.
    pub grid_spacing: f32,
    /// Margin kept around the content by "fit to screen".
    pub fit_padding: f32,
    /// Nominal content size used by the zoom/pan reset and fit actions.
    pub content_size: Size,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_radius: 30.0,
            node_size: Size::new(150.0, 100.0),
            grid_spacing: 40.0,
            fit_padding: 50.0,
            content_size: Size::new(800.0, 600.0),
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snap_radius(mut self, radius: f32) -> Self {
        self.snap_radius = radius;
        self
    }

    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_size = size;
        self
    }

    pub fn with_grid_spacing(mut self, spacing: f32) -> Self {
        self.grid_spacing = spacing;
        self
    }

    pub fn with_fit_padding(mut self, padding: f32) -> Self {
        self.fit_padding = padding;
        self
    }

    pub fn with_content_size(mut self, size: Size) -> Self {
        self.content_size = size;
        self
    }
}
