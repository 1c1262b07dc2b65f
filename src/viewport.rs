//! Zoom and pan state for the canvas.
//!
//! [`Viewport`] is the transform (`translate(tx, ty) scale(s)`) applied to the
//! canvas. [`PanZoomController`] drives it from keyboard, wheel and pointer
//! input: Ctrl + wheel zooms toward the cursor, Space + drag pans.

use crate::geometry::{Point, Size};

pub const MIN_SCALE: f32 = 0.1;
pub const MAX_SCALE: f32 = 5.0;

/// Wheel zoom factors (scroll down zooms out).
const WHEEL_ZOOM_OUT: f32 = 0.9;
const WHEEL_ZOOM_IN: f32 = 1.1;
/// Toolbar button zoom factors.
const BUTTON_ZOOM_IN: f32 = 1.2;
const BUTTON_ZOOM_OUT: f32 = 0.8;

/// Canvas transform: screen = canvas * scale + translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(scale: f32, translate_x: f32, translate_y: f32) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            translate_x,
            translate_y,
        }
    }

    pub fn canvas_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate_x,
            p.y * self.scale + self.translate_y,
        )
    }

    /// Scale usable as a divisor; a non-positive scale counts as 1.
    fn divisor(&self) -> f32 {
        if self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    pub fn screen_to_canvas(&self, p: Point) -> Point {
        let s = self.divisor();
        Point::new((p.x - self.translate_x) / s, (p.y - self.translate_y) / s)
    }

    /// Multiply the scale by `factor` (clamped) keeping `anchor` (screen space) fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f32) {
        let current = self.divisor();
        let new_scale = (current * factor).clamp(MIN_SCALE, MAX_SCALE);
        let change = new_scale / current;
        self.translate_x = anchor.x - (anchor.x - self.translate_x) * change;
        self.translate_y = anchor.y - (anchor.y - self.translate_y) * change;
        self.scale = new_scale;
    }

    /// Zoom from a wheel notch at `anchor`; positive `delta_y` zooms out.
    pub fn wheel_zoom(&mut self, anchor: Point, delta_y: f32) {
        let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
        self.zoom_at(anchor, factor);
    }

    /// Zoom in around the center of the container.
    pub fn zoom_in(&mut self, container: Size) {
        self.zoom_at(container.center(), BUTTON_ZOOM_IN);
    }

    /// Zoom out around the center of the container.
    pub fn zoom_out(&mut self, container: Size) {
        self.zoom_at(container.center(), BUTTON_ZOOM_OUT);
    }

    /// Back to 100%, with `content` centered in `container`.
    pub fn reset(&mut self, container: Size, content: Size) {
        let center = container.center();
        self.scale = 1.0;
        self.translate_x = center.x - content.width / 2.0;
        self.translate_y = center.y - content.height / 2.0;
    }

    /// Scale `content` down (never up) to fit `container` minus `padding` on
    /// every side, and center it.
    pub fn fit_to_screen(&mut self, container: Size, content: Size, padding: f32) {
        let available_w = container.width - padding * 2.0;
        let available_h = container.height - padding * 2.0;
        let scale = (available_w / content.width)
            .min(available_h / content.height)
            .min(1.0)
            .clamp(MIN_SCALE, MAX_SCALE);

        self.scale = scale;
        self.translate_x = container.width / 2.0 - content.width * scale / 2.0;
        self.translate_y = container.height / 2.0 - content.height * scale / 2.0;
    }

    /// Zoom level as a whole percentage, e.g. `"120%"`.
    pub fn scale_label(&self) -> String {
        format!("{:.0}%", self.scale * 100.0)
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasKey {
    Space,
    /// Ctrl, or Cmd on macOS.
    Control,
    Other,
}

impl CanvasKey {
    /// Classify the text of a Slint `KeyEvent`.
    pub fn from_key_text(text: &str) -> Self {
        use slint::platform::Key;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(' '), None) => CanvasKey::Space,
            (Some(c), None) if c == char::from(Key::Control) || c == char::from(Key::Meta) => {
                CanvasKey::Control
            }
            _ => CanvasKey::Other,
        }
    }
}

/// Interaction mode shown in the status area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasMode {
    Normal,
    Pan,
    Zoom,
}

impl CanvasMode {
    pub fn label(self) -> &'static str {
        match self {
            CanvasMode::Normal => "Normal mode",
            CanvasMode::Pan => "Pan mode active",
            CanvasMode::Zoom => "Zoom mode active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorShape {
    Default,
    Grab,
    Grabbing,
}

#[derive(Debug, Clone, Copy)]
struct PanSession {
    start: Point,
    transform: Viewport,
}

/// Keyboard, wheel and pointer state machine for zooming and panning.
#[derive(Debug, Clone, Default)]
pub struct PanZoomController {
    viewport: Viewport,
    space_held: bool,
    control_held: bool,
    pan: Option<PanSession>,
}

impl PanZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Returns true when the key was consumed.
    pub fn key_down(&mut self, key: CanvasKey) -> bool {
        match key {
            CanvasKey::Space => {
                self.space_held = true;
                true
            }
            CanvasKey::Control => {
                self.control_held = true;
                false
            }
            CanvasKey::Other => false,
        }
    }

    pub fn key_up(&mut self, key: CanvasKey) {
        match key {
            CanvasKey::Space => {
                self.space_held = false;
                self.pan = None;
            }
            CanvasKey::Control => self.control_held = false,
            CanvasKey::Other => {}
        }
    }

    /// Wheel input at `anchor`. Only zooms while Control is held; returns
    /// whether the event was consumed.
    pub fn wheel(&mut self, anchor: Point, delta_y: f32) -> bool {
        if !self.control_held {
            return false;
        }
        self.viewport.wheel_zoom(anchor, delta_y);
        true
    }

    /// Start panning; ignored unless Space is held.
    pub fn pointer_down(&mut self, position: Point) -> bool {
        if !self.space_held {
            return false;
        }
        self.pan = Some(PanSession {
            start: position,
            transform: self.viewport,
        });
        true
    }

    pub fn pointer_move(&mut self, position: Point) -> bool {
        let Some(session) = self.pan else {
            return false;
        };
        if !self.space_held {
            return false;
        }
        let delta = position - session.start;
        self.viewport = Viewport {
            translate_x: session.transform.translate_x + delta.x,
            translate_y: session.transform.translate_y + delta.y,
            ..session.transform
        };
        true
    }

    /// Pointer released or left the canvas.
    pub fn pointer_up(&mut self) {
        self.pan = None;
    }

    pub fn mode(&self) -> CanvasMode {
        if self.space_held {
            CanvasMode::Pan
        } else if self.control_held {
            CanvasMode::Zoom
        } else {
            CanvasMode::Normal
        }
    }

    pub fn cursor(&self) -> CursorShape {
        match (self.space_held, self.pan.is_some()) {
            (true, true) => CursorShape::Grabbing,
            (true, false) => CursorShape::Grab,
            _ => CursorShape::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    // ========================================================================
    // Viewport transforms
    // ========================================================================

    #[test]
    fn test_round_trip_conversion() {
        let vp = Viewport::new(2.0, 10.0, -20.0);
        let p = Point::new(33.0, 44.0);
        let back = vp.screen_to_canvas(vp.canvas_to_screen(p));
        assert!(approx(back.x, p.x) && approx(back.y, p.y));
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut vp = Viewport::default();
        let anchor = Point::new(200.0, 100.0);
        let before = vp.screen_to_canvas(anchor);
        vp.zoom_at(anchor, 1.1);
        let after = vp.screen_to_canvas(anchor);
        assert!(approx(before.x, after.x));
        assert!(approx(before.y, after.y));
        assert!(approx(vp.scale, 1.1));
    }

    #[test]
    fn test_zoom_from_zero_scale_stays_finite() {
        let mut vp = Viewport {
            scale: 0.0,
            translate_x: 10.0,
            translate_y: 20.0,
        };
        vp.zoom_at(Point::new(100.0, 100.0), 1.1);
        assert!(approx(vp.scale, 1.1));
        assert!(vp.translate_x.is_finite() && vp.translate_y.is_finite());
        assert!(approx(vp.translate_x, 1.0));
        assert!(approx(vp.translate_y, 12.0));
    }

    #[test]
    fn test_wheel_direction() {
        let mut vp = Viewport::default();
        vp.wheel_zoom(Point::new(0.0, 0.0), 120.0);
        assert!(approx(vp.scale, 0.9));
        vp.wheel_zoom(Point::new(0.0, 0.0), -120.0);
        assert!(approx(vp.scale, 0.99));
    }

    #[test]
    fn test_scale_is_clamped() {
        let mut vp = Viewport::default();
        for _ in 0..100 {
            vp.zoom_in(Size::new(800.0, 600.0));
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..100 {
            vp.zoom_out(Size::new(800.0, 600.0));
        }
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn test_reset_centers_content() {
        let mut vp = Viewport::new(3.0, 5.0, 5.0);
        vp.reset(Size::new(1000.0, 800.0), Size::new(800.0, 600.0));
        assert_eq!(vp, Viewport::new(1.0, 100.0, 100.0));
    }

    #[test]
    fn test_fit_to_screen_scales_down() {
        let mut vp = Viewport::default();
        vp.fit_to_screen(Size::new(500.0, 700.0), Size::new(800.0, 600.0), 50.0);
        // (500 - 100) / 800 = 0.5 wins over (700 - 100) / 600 = 1.0
        assert!(approx(vp.scale, 0.5));
        assert!(approx(vp.translate_x, 50.0));
        assert!(approx(vp.translate_y, 200.0));
    }

    #[test]
    fn test_fit_to_screen_never_upscales() {
        let mut vp = Viewport::default();
        vp.fit_to_screen(Size::new(4000.0, 4000.0), Size::new(800.0, 600.0), 50.0);
        assert_eq!(vp.scale, 1.0);
    }

    #[test]
    fn test_scale_label() {
        assert_eq!(Viewport::default().scale_label(), "100%");
        assert_eq!(Viewport::new(1.2, 0.0, 0.0).scale_label(), "120%");
    }

    // ========================================================================
    // PanZoomController
    // ========================================================================

    #[test]
    fn test_wheel_requires_control() {
        let mut ctrl = PanZoomController::new();
        assert!(!ctrl.wheel(Point::new(0.0, 0.0), 1.0));
        assert_eq!(ctrl.viewport().scale, 1.0);

        ctrl.key_down(CanvasKey::Control);
        assert_eq!(ctrl.mode(), CanvasMode::Zoom);
        assert!(ctrl.wheel(Point::new(0.0, 0.0), 1.0));
        assert!(approx(ctrl.viewport().scale, 0.9));

        ctrl.key_up(CanvasKey::Control);
        assert_eq!(ctrl.mode(), CanvasMode::Normal);
    }

    #[test]
    fn test_pan_requires_space() {
        let mut ctrl = PanZoomController::new();
        assert!(!ctrl.pointer_down(Point::new(10.0, 10.0)));
        assert!(!ctrl.pointer_move(Point::new(50.0, 50.0)));
        assert_eq!(ctrl.viewport().translate_x, 0.0);
    }

    #[test]
    fn test_pan_uses_total_delta() {
        let mut ctrl = PanZoomController::new();
        ctrl.key_down(CanvasKey::Space);
        assert_eq!(ctrl.cursor(), CursorShape::Grab);
        assert!(ctrl.pointer_down(Point::new(10.0, 10.0)));
        assert_eq!(ctrl.cursor(), CursorShape::Grabbing);

        ctrl.pointer_move(Point::new(20.0, 30.0));
        ctrl.pointer_move(Point::new(60.0, 40.0));
        assert_eq!(ctrl.viewport().translate_x, 50.0);
        assert_eq!(ctrl.viewport().translate_y, 30.0);

        ctrl.pointer_up();
        assert!(!ctrl.is_panning());
        assert_eq!(ctrl.cursor(), CursorShape::Grab);
    }

    #[test]
    fn test_space_release_ends_pan() {
        let mut ctrl = PanZoomController::new();
        ctrl.key_down(CanvasKey::Space);
        ctrl.pointer_down(Point::new(0.0, 0.0));
        ctrl.key_up(CanvasKey::Space);
        assert!(!ctrl.is_panning());
        assert!(!ctrl.pointer_move(Point::new(100.0, 100.0)));
        assert_eq!(ctrl.cursor(), CursorShape::Default);
        assert_eq!(ctrl.mode(), CanvasMode::Normal);
    }

    #[test]
    fn test_space_takes_precedence_in_mode() {
        let mut ctrl = PanZoomController::new();
        ctrl.key_down(CanvasKey::Control);
        ctrl.key_down(CanvasKey::Space);
        assert_eq!(ctrl.mode(), CanvasMode::Pan);
        assert_eq!(CanvasMode::Pan.label(), "Pan mode active");
    }

    #[test]
    fn test_key_text_classification() {
        assert_eq!(CanvasKey::from_key_text(" "), CanvasKey::Space);
        assert_eq!(CanvasKey::from_key_text("\u{11}"), CanvasKey::Control);
        assert_eq!(CanvasKey::from_key_text("a"), CanvasKey::Other);
        assert_eq!(CanvasKey::from_key_text("  "), CanvasKey::Other);
        assert_eq!(CanvasKey::from_key_text(""), CanvasKey::Other);
    }
}
