use gradation_engine::coords::{Rect, Vec2};
use gradation_engine::paint::Rgba8;

use crate::capture::{CaptureLease, PointerCapture};
use crate::store::{StopId, StopPatch};

/// Vertical distance (logical px) past the track edge at which a dragged stop
/// is marked for removal.
pub const DEFAULT_REMOVE_THRESHOLD: f32 = 30.0;

/// Dimming only applies while more than this many stops exist, so a gradient
/// can never be dragged below two stops.
pub const MIN_STOPS_FOR_REMOVAL: usize = 2;

/// Store mutation requested by a handle.
///
/// Handles never touch the store; the owner applies these in order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StopOp {
    Update { id: StopId, patch: StopPatch },
    Remove { id: StopId },
}

/// An in-progress press/drag gesture.
#[derive(Debug)]
pub struct Drag {
    /// At least one move arrived since the press.
    pub moved: bool,
    /// Releasing now would remove the stop.
    pub dimmed: bool,
    lease: CaptureLease,
}

/// Gesture state of one stop handle.
///
/// `Idle → Dragging → (Idle | Removed)`. The capture lease lives inside
/// `Dragging`, so every transition out of it detaches the global listeners.
#[derive(Debug, Default)]
pub enum HandleState {
    #[default]
    Idle,
    Dragging(Drag),
    Removed,
}

/// Interaction controller for a single stop handle.
#[derive(Debug)]
pub struct Handle {
    id: StopId,
    state: HandleState,
    /// Color popover visibility.
    open: bool,
    /// The most recent gesture moved the stop. Cleared on the next press.
    dragged: bool,
}

impl Handle {
    pub fn new(id: StopId) -> Self {
        Self { id, state: HandleState::Idle, open: false, dragged: false }
    }

    #[inline]
    pub fn id(&self) -> StopId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> &HandleState {
        &self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, HandleState::Dragging(_))
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        matches!(self.state, HandleState::Removed)
    }

    #[inline]
    pub fn is_dimmed(&self) -> bool {
        matches!(&self.state, HandleState::Dragging(d) if d.dimmed)
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    pub fn was_dragged(&self) -> bool {
        self.dragged
    }

    /// Pointer pressed on the handle: `Idle → Dragging`.
    ///
    /// No store mutation happens yet. Returns `false` (and stays put) when the
    /// handle is not idle or another gesture holds the capture.
    pub fn press(&mut self, capture: &PointerCapture) -> bool {
        if !matches!(self.state, HandleState::Idle) {
            return false;
        }
        let Some(lease) = capture.acquire(self.id) else {
            return false;
        };
        self.dragged = false;
        self.state = HandleState::Dragging(Drag { moved: false, dimmed: false, lease });
        true
    }

    /// Pointer moved while dragging.
    ///
    /// The x coordinate is projected onto `track` (clamped to [0, 1]). The
    /// stop dims when more than two stops exist and `pos.y` is further than
    /// `threshold` outside the track's vertical extent; a dimmed stop is not
    /// moved.
    pub fn drag_to(&mut self, pos: Vec2, track: Rect, num_stops: usize, threshold: f32) -> Option<StopOp> {
        let HandleState::Dragging(drag) = &mut self.state else {
            return None;
        };
        drag.moved = true;
        self.dragged = true;
        self.open = false;

        drag.dimmed =
            num_stops > MIN_STOPS_FOR_REMOVAL && track.vertical_overshoot(pos.y) > threshold;
        if drag.dimmed {
            return None;
        }
        let position = track.horizontal_fraction(pos.x);
        Some(StopOp::Update { id: self.id, patch: StopPatch::position(position) })
    }

    /// Pointer released: `Dragging → Removed` if dimmed, else `Dragging → Idle`.
    ///
    /// A release with no move in between counts as a click.
    pub fn release(&mut self) -> Option<StopOp> {
        if !self.is_dragging() {
            return None;
        }
        let HandleState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        let Drag { moved, dimmed, lease } = drag;
        drop(lease);

        if dimmed {
            self.state = HandleState::Removed;
            self.open = false;
            return Some(StopOp::Remove { id: self.id });
        }
        if !moved {
            self.click();
        }
        None
    }

    /// Toggles the color popover unless the last gesture was a drag.
    pub fn click(&mut self) {
        if self.is_removed() || self.dragged {
            return;
        }
        self.open = !self.open;
    }

    /// Color chosen in the popover. Suppressed right after a drag.
    pub fn pick_color(&self, color: Rgba8) -> Option<StopOp> {
        if self.is_removed() || self.dragged {
            return None;
        }
        Some(StopOp::Update { id: self.id, patch: StopPatch::color(color) })
    }

    /// Abandons any gesture without committing and closes the popover.
    pub fn reset(&mut self) {
        if self.is_dragging() {
            self.state = HandleState::Idle;
        }
        self.dragged = false;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StopStore;

    const TRACK: Rect = Rect::new(100.0, 50.0, 400.0, 15.0);

    fn handle() -> Handle {
        let mut store = StopStore::new();
        Handle::new(store.add_stop(0.5, Rgba8::WHITE).unwrap())
    }

    fn update_position(op: Option<StopOp>) -> f32 {
        match op {
            Some(StopOp::Update { patch, .. }) => patch.position.unwrap(),
            other => panic!("expected position update, got {other:?}"),
        }
    }

    // ── press / drag ──────────────────────────────────────────────────────

    #[test]
    fn press_enters_dragging_without_ops() {
        let capture = PointerCapture::new();
        let mut h = handle();
        assert!(h.press(&capture));
        assert!(h.is_dragging());
        assert_eq!(capture.owner(), Some(h.id()));
    }

    #[test]
    fn press_refused_when_capture_held_elsewhere() {
        let capture = PointerCapture::new();
        let mut a = handle();
        let mut b = handle();
        assert!(a.press(&capture));
        assert!(!b.press(&capture));
        assert!(!b.is_dragging());
    }

    #[test]
    fn move_projects_and_clamps() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        assert_eq!(update_position(h.drag_to(Vec2::new(200.0, 55.0), TRACK, 3, 30.0)), 0.25);
        assert_eq!(update_position(h.drag_to(Vec2::new(-50.0, 55.0), TRACK, 3, 30.0)), 0.0);
        assert_eq!(update_position(h.drag_to(Vec2::new(9e9, 55.0), TRACK, 3, 30.0)), 1.0);
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut h = handle();
        assert_eq!(h.drag_to(Vec2::new(200.0, 55.0), TRACK, 3, 30.0), None);
        assert!(!h.was_dragged());
    }

    #[test]
    fn move_closes_popover() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.click();
        assert!(h.is_open());
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 55.0), TRACK, 3, 30.0);
        assert!(!h.is_open());
    }

    // ── dimming ───────────────────────────────────────────────────────────

    #[test]
    fn dims_beyond_threshold_with_three_stops() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        // Track spans y 50..65; 31 px above and below.
        assert_eq!(h.drag_to(Vec2::new(200.0, 19.0), TRACK, 3, 30.0), None);
        assert!(h.is_dimmed());
        assert_eq!(h.drag_to(Vec2::new(200.0, 96.0), TRACK, 3, 30.0), None);
        assert!(h.is_dimmed());
    }

    #[test]
    fn threshold_is_exclusive() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        assert!(h.drag_to(Vec2::new(200.0, 20.0), TRACK, 3, 30.0).is_some());
        assert!(!h.is_dimmed());
    }

    #[test]
    fn never_dims_with_two_stops() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        assert!(h.drag_to(Vec2::new(200.0, 500.0), TRACK, 2, 30.0).is_some());
        assert!(!h.is_dimmed());
    }

    #[test]
    fn moving_back_undims() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 500.0), TRACK, 3, 30.0);
        assert!(h.is_dimmed());
        assert!(h.drag_to(Vec2::new(300.0, 55.0), TRACK, 3, 30.0).is_some());
        assert!(!h.is_dimmed());
    }

    // ── release ───────────────────────────────────────────────────────────

    #[test]
    fn release_while_dimmed_removes_and_detaches() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 500.0), TRACK, 3, 30.0);
        assert_eq!(h.release(), Some(StopOp::Remove { id: h.id() }));
        assert!(h.is_removed());
        assert!(!capture.is_captured());
    }

    #[test]
    fn release_after_drag_returns_to_idle_and_detaches() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 55.0), TRACK, 3, 30.0);
        assert_eq!(h.release(), None);
        assert!(matches!(h.state(), HandleState::Idle));
        assert!(!capture.is_captured());
        assert!(!h.is_open());
    }

    #[test]
    fn removed_handle_ignores_everything() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 500.0), TRACK, 3, 30.0);
        h.release();
        assert!(!h.press(&capture));
        assert_eq!(h.pick_color(Rgba8::BLACK), None);
        h.click();
        assert!(!h.is_open());
    }

    #[test]
    fn stray_release_keeps_handle_removed() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 500.0), TRACK, 3, 30.0);
        assert_eq!(h.release(), Some(StopOp::Remove { id: h.id() }));
        assert_eq!(h.release(), None);
        assert!(h.is_removed());
        assert!(!h.press(&capture));
        assert!(!capture.is_captured());
        assert_eq!(h.pick_color(Rgba8::BLACK), None);
    }

    // ── click / color ─────────────────────────────────────────────────────

    #[test]
    fn press_release_without_move_toggles_popover() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.release();
        assert!(h.is_open());
        h.press(&capture);
        h.release();
        assert!(!h.is_open());
    }

    #[test]
    fn color_pick_emits_update() {
        let h = handle();
        assert_eq!(
            h.pick_color(Rgba8::BLACK),
            Some(StopOp::Update { id: h.id(), patch: StopPatch::color(Rgba8::BLACK) })
        );
    }

    #[test]
    fn color_pick_suppressed_after_drag() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 55.0), TRACK, 3, 30.0);
        h.release();
        assert_eq!(h.pick_color(Rgba8::BLACK), None);
        // The next press clears the drag marker.
        h.press(&capture);
        h.release();
        assert!(h.pick_color(Rgba8::BLACK).is_some());
    }

    // ── reset ─────────────────────────────────────────────────────────────

    #[test]
    fn reset_abandons_gesture_and_detaches() {
        let capture = PointerCapture::new();
        let mut h = handle();
        h.press(&capture);
        h.drag_to(Vec2::new(200.0, 500.0), TRACK, 3, 30.0);
        h.reset();
        assert!(matches!(h.state(), HandleState::Idle));
        assert!(!capture.is_captured());
        assert_eq!(h.release(), None);
    }
}
