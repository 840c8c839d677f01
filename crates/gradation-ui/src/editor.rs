use std::collections::HashMap;

use gradation_engine::Result;
use gradation_engine::coords::{Rect, Vec2};
use gradation_engine::input::InputEvent;
use gradation_engine::paint::{Gradation, Rgba8};

use crate::capture::PointerCapture;
use crate::event::{EventResult, UiEvent};
use crate::handle::{DEFAULT_REMOVE_THRESHOLD, Handle, StopOp};
use crate::store::{StopId, StopStore};

// ── configuration ─────────────────────────────────────────────────────────

/// Behavior knobs for [`GradationEditor`].
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Adds are ignored once this many stops exist. `None` means unbounded.
    pub max_stops: Option<usize>,
    /// Color given to stops created by clicking the add area.
    pub default_color: Rgba8,
    /// Vertical distance past the track edge that arms drag-to-remove.
    pub remove_threshold: f32,
    /// Disabled editors ignore all pointer input and color picks.
    pub disabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_stops: None,
            default_color: Rgba8::WHITE,
            remove_threshold: DEFAULT_REMOVE_THRESHOLD,
            disabled: false,
        }
    }
}

/// Where the editor sits on screen, in the host's pointer coordinates.
///
/// The track is the gradient preview bar; positions and the removal
/// threshold are measured against it. Handles hang in a row directly below
/// the track, and the empty part of that row is the add area.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EditorLayout {
    pub track: Rect,
    pub handle_width: f32,
    pub handle_height: f32,
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            track: Rect::new(4.0, 0.0, 400.0, 15.0),
            handle_width: 9.0,
            handle_height: 15.0,
        }
    }
}

impl EditorLayout {
    pub fn with_track(track: Rect) -> Self {
        Self { track, ..Self::default() }
    }

    /// Row under the track that accepts add-stop clicks.
    #[inline]
    pub fn add_area(&self) -> Rect {
        self.track.strip_below(self.handle_height)
    }

    /// Hit box of the handle for a stop at `position`, centered on it.
    pub fn handle_rect(&self, position: f32) -> Rect {
        let track = self.track.normalized();
        let cx = track.left() + position * track.size.x;
        Rect::new(
            cx - self.handle_width * 0.5,
            track.bottom(),
            self.handle_width,
            self.handle_height,
        )
    }
}

// ── render view ───────────────────────────────────────────────────────────

/// Everything a renderer needs to draw one stop handle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HandleView {
    /// Stable key for keyed rendering.
    pub id: StopId,
    pub position: f32,
    pub color: Rgba8,
    pub rect: Rect,
    /// Releasing the current drag would remove this stop.
    pub dimmed: bool,
    /// Color popover is showing.
    pub open: bool,
    pub disabled: bool,
}

// ── editor ────────────────────────────────────────────────────────────────

/// Gradient stop editor: a preview track with draggable stop handles.
///
/// - press + drag a handle to move its stop along the track
/// - drag it more than `remove_threshold` px above or below the track and
///   release to delete it (only while more than two stops exist)
/// - press + release a handle without moving to toggle its color popover
/// - click the row under the track to add a stop in `default_color`
///
/// # Example
/// ```
/// use gradation_engine::coords::Vec2;
/// use gradation_engine::paint::{ColorStop, Gradation, Rgba8};
/// use gradation_ui::{GradationEditor, UiEvent};
///
/// let value = Gradation::new(vec![
///     ColorStop::new(0.0, Rgba8::BLACK),
///     ColorStop::new(1.0, Rgba8::WHITE),
/// ]);
/// let mut editor = GradationEditor::new(&value).max_stops(Some(8));
///
/// // Default track spans x 4..404; the add row sits at y 15..30.
/// let at = Vec2::new(204.0, 20.0);
/// editor.on_event(&UiEvent::PointerDown { pos: at });
/// editor.on_event(&UiEvent::PointerUp { pos: at });
/// assert_eq!(editor.gradation().len(), 3);
/// assert_eq!(editor.gradation()[1].position, 0.5);
/// ```
pub struct GradationEditor {
    store: StopStore,
    handles: HashMap<StopId, Handle>,
    layout: EditorLayout,
    config: EditorConfig,
    capture: PointerCapture,
    /// A press landed on the add area; the matching release adds a stop.
    add_armed: bool,
    /// Called after every committed change with the new value.
    on_change: Option<Box<dyn FnMut(&Gradation)>>,
}

impl GradationEditor {
    pub fn new(value: &Gradation) -> Self {
        let store = StopStore::from_gradation(value);
        let handles = store.ids().map(|id| (id, Handle::new(id))).collect();
        Self {
            store,
            handles,
            layout: EditorLayout::default(),
            config: EditorConfig::default(),
            capture: PointerCapture::new(),
            add_armed: false,
            on_change: None,
        }
    }

    pub fn layout(mut self, layout: EditorLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.store.set_max_stops(config.max_stops);
        let disabled = config.disabled;
        self.config = config;
        self.set_disabled(disabled);
        self
    }

    pub fn max_stops(mut self, max_stops: Option<usize>) -> Self {
        self.set_max_stops(max_stops);
        self
    }

    pub fn default_color(mut self, color: Rgba8) -> Self {
        self.config.default_color = color;
        self
    }

    pub fn remove_threshold(mut self, px: f32) -> Self {
        self.config.remove_threshold = px;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&Gradation) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Current value, sorted by position.
    pub fn gradation(&self) -> Gradation {
        self.store.gradation()
    }

    #[inline]
    pub fn store(&self) -> &StopStore {
        &self.store
    }

    #[inline]
    pub fn editor_layout(&self) -> &EditorLayout {
        &self.layout
    }

    #[inline]
    pub fn editor_config(&self) -> &EditorConfig {
        &self.config
    }

    /// Shared handle on the global-listener slot; clone it to route
    /// document-level pointer events while a drag is in progress.
    #[inline]
    pub fn capture(&self) -> &PointerCapture {
        &self.capture
    }

    pub fn handle(&self, id: StopId) -> Option<&Handle> {
        self.handles.get(&id)
    }

    /// One view per stop, in position order.
    pub fn handles(&self) -> Vec<HandleView> {
        self.store
            .entries()
            .iter()
            .map(|entry| {
                let handle = self.handles.get(&entry.id);
                HandleView {
                    id: entry.id,
                    position: entry.stop.position,
                    color: entry.stop.color,
                    rect: self.layout.handle_rect(entry.stop.position),
                    dimmed: handle.is_some_and(Handle::is_dimmed),
                    open: handle.is_some_and(Handle::is_open),
                    disabled: self.config.disabled,
                }
            })
            .collect()
    }

    /// CSS background for the preview track.
    pub fn css_background(&self) -> String {
        self.store.gradation().to_css()
    }

    /// # Errors
    /// Fails when the editor holds no stops.
    pub fn color_at(&self, position: f32) -> Result<Rgba8> {
        self.store.gradation().color_at(position)
    }

    /// # Errors
    /// Fails when the editor holds no stops.
    pub fn sample(&self, steps: usize) -> Result<Vec<u32>> {
        self.store.gradation().sample(steps)
    }

    // ── host-driven updates ───────────────────────────────────────────────

    /// Adopts an externally supplied value without firing `on_change`.
    ///
    /// Stops that are unchanged keep their ids and gesture state; handles for
    /// stops that disappeared are dropped, which ends their gestures.
    pub fn set_value(&mut self, value: &Gradation) {
        self.store.sync(value);
        self.reconcile_handles();
    }

    pub fn set_layout(&mut self, layout: EditorLayout) {
        self.layout = layout;
    }

    pub fn set_max_stops(&mut self, max_stops: Option<usize>) {
        self.config.max_stops = max_stops;
        self.store.set_max_stops(max_stops);
    }

    /// Disabling abandons any gesture without committing and closes popovers.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled {
            self.add_armed = false;
            self.handles.values_mut().for_each(Handle::reset);
        }
    }

    // ── events ────────────────────────────────────────────────────────────

    pub fn on_input(&mut self, ev: &InputEvent) -> EventResult {
        match UiEvent::from_input(ev) {
            Some(event) => self.on_event(&event),
            None => EventResult::Ignored,
        }
    }

    /// Routes one pointer event. Events must arrive in temporal order.
    ///
    /// While a handle holds the capture, moves and the release go to it no
    /// matter where the pointer is.
    pub fn on_event(&mut self, event: &UiEvent) -> EventResult {
        if self.config.disabled {
            return EventResult::Ignored;
        }
        match *event {
            UiEvent::PointerDown { pos } => self.pointer_down(pos),
            UiEvent::PointerMove { pos } => self.pointer_move(pos),
            UiEvent::PointerUp { pos } => self.pointer_up(pos),
        }
    }

    /// Applies a color chosen in `id`'s popover.
    ///
    /// Ignored while disabled, for unknown ids, and right after a drag.
    pub fn pick_color(&mut self, id: StopId, color: Rgba8) -> bool {
        if self.config.disabled {
            return false;
        }
        match self.handles.get(&id).and_then(|h| h.pick_color(color)) {
            Some(op) => self.apply(op),
            None => false,
        }
    }

    fn pointer_down(&mut self, pos: Vec2) -> EventResult {
        if self.capture.is_captured() {
            return EventResult::Ignored;
        }
        if let Some(id) = self.hit_test(pos) {
            if let Some(handle) = self.handles.get_mut(&id) {
                handle.press(&self.capture);
            }
            return EventResult::Consumed;
        }
        if self.layout.add_area().contains(pos) {
            self.add_armed = true;
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn pointer_move(&mut self, pos: Vec2) -> EventResult {
        let Some(id) = self.capture.owner() else {
            return EventResult::Ignored;
        };
        let num_stops = self.store.len();
        let track = self.layout.track;
        let threshold = self.config.remove_threshold;
        let op = self
            .handles
            .get_mut(&id)
            .and_then(|h| h.drag_to(pos, track, num_stops, threshold));
        if let Some(op) = op {
            self.apply(op);
        }
        EventResult::Consumed
    }

    fn pointer_up(&mut self, pos: Vec2) -> EventResult {
        if let Some(id) = self.capture.owner() {
            let op = self.handles.get_mut(&id).and_then(Handle::release);
            if let Some(op) = op {
                self.apply(op);
            }
            return EventResult::Consumed;
        }
        if std::mem::take(&mut self.add_armed) && self.layout.add_area().contains(pos) {
            self.add_stop_at(pos.x);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    /// Topmost handle under `pos`. Later stops are drawn above earlier ones.
    fn hit_test(&self, pos: Vec2) -> Option<StopId> {
        self.store
            .entries()
            .iter()
            .rev()
            .find(|e| self.layout.handle_rect(e.stop.position).contains(pos))
            .map(|e| e.id)
    }

    fn add_stop_at(&mut self, x: f32) {
        if self.store.is_full() {
            log::debug!("add ignored: max_stops reached");
            return;
        }
        let position = self.layout.track.horizontal_fraction(x);
        if let Some(id) = self.store.add_stop(position, self.config.default_color) {
            self.handles.insert(id, Handle::new(id));
            self.emit_change();
        }
    }

    fn apply(&mut self, op: StopOp) -> bool {
        let changed = match op {
            StopOp::Update { id, patch } => self.store.update_stop(id, patch),
            StopOp::Remove { id } => {
                self.handles.remove(&id);
                self.store.remove_stop(id)
            }
        };
        if changed {
            self.emit_change();
        }
        changed
    }

    fn reconcile_handles(&mut self) {
        let store = &self.store;
        self.handles.retain(|id, _| store.contains(*id));
        for id in self.store.ids() {
            self.handles.entry(id).or_insert_with(|| Handle::new(id));
        }
    }

    fn emit_change(&mut self) {
        if let Some(f) = &mut self.on_change {
            let value = self.store.gradation();
            f(&value);
        }
    }
}
