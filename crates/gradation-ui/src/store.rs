use std::fmt;

use gradation_engine::paint::{ColorStop, Gradation, Rgba8};

/// Stable identity of a stop inside one [`StopStore`].
///
/// Ids survive position/color edits but not removal: a stop re-added at the
/// same place gets a fresh id. Ids come from a per-store monotonic counter
/// and are never handed out twice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct StopId(u64);

impl StopId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop#{}", self.0)
    }
}

/// Partial update applied by [`StopStore::update_stop`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct StopPatch {
    pub position: Option<f32>,
    pub color: Option<Rgba8>,
}

impl StopPatch {
    pub fn position(position: f32) -> Self {
        Self { position: Some(position), color: None }
    }

    pub fn color(color: Rgba8) -> Self {
        Self { position: None, color: Some(color) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.color.is_none()
    }
}

/// A stop together with its identity.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StopEntry {
    pub id: StopId,
    pub stop: ColorStop,
}

/// Owner of the canonical gradation and every mutation on it.
///
/// Invariants held after every call:
/// - entries are sorted ascending by position (stable among equal positions)
/// - ids are unique
/// - positions lie in [0, 1]
///
/// Unknown ids and adds beyond `max_stops` are silent no-ops.
#[derive(Debug, Clone)]
pub struct StopStore {
    entries: Vec<StopEntry>,
    next_id: u64,
    max_stops: Option<usize>,
}

impl Default for StopStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StopStore {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 1, max_stops: None }
    }

    /// Adopts `gradation`, assigning ids in stop order.
    pub fn from_gradation(gradation: &Gradation) -> Self {
        let mut store = Self::new();
        let entries: Vec<StopEntry> = gradation
            .iter()
            .map(|stop| StopEntry { id: store.alloc_id(), stop: sanitize(*stop) })
            .collect();
        store.entries = entries;
        store.sort();
        store
    }

    pub fn with_max_stops(mut self, max_stops: Option<usize>) -> Self {
        self.max_stops = max_stops;
        self
    }

    pub fn set_max_stops(&mut self, max_stops: Option<usize>) {
        self.max_stops = max_stops;
    }

    #[inline]
    pub fn max_stops(&self) -> Option<usize> {
        self.max_stops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the stop cap is reached; further adds are no-ops.
    pub fn is_full(&self) -> bool {
        self.max_stops.is_some_and(|max| self.entries.len() >= max)
    }

    #[inline]
    pub fn entries(&self) -> &[StopEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = StopId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn get(&self, id: StopId) -> Option<&ColorStop> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.stop)
    }

    #[inline]
    pub fn contains(&self, id: StopId) -> bool {
        self.get(id).is_some()
    }

    /// Value snapshot of the current stops, ids stripped.
    pub fn gradation(&self) -> Gradation {
        // Already sorted; `Gradation::new` re-sorting a sorted list is a no-op.
        self.entries.iter().map(|e| e.stop).collect()
    }

    /// Inserts a stop and returns its id, or `None` when the cap is reached.
    pub fn add_stop(&mut self, position: f32, color: Rgba8) -> Option<StopId> {
        if self.is_full() {
            log::debug!("add_stop ignored: {} stops reached the cap", self.entries.len());
            return None;
        }
        let id = self.alloc_id();
        self.entries.push(StopEntry { id, stop: sanitize(ColorStop::new(position, color)) });
        self.sort();
        log::debug!("added {id} at {position} ({color})");
        Some(id)
    }

    /// Applies `patch` to the stop named `id`. Returns `false` for an unknown
    /// id or an empty patch.
    pub fn update_stop(&mut self, id: StopId, patch: StopPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            log::debug!("update_stop ignored: unknown {id}");
            return false;
        };
        if let Some(position) = patch.position {
            entry.stop.position = sanitize_position(position);
        }
        if let Some(color) = patch.color {
            entry.stop.color = color;
        }
        log::trace!("updated {id}: {:?}", entry.stop);
        if patch.position.is_some() {
            self.sort();
        }
        true
    }

    /// Removes the stop named `id`. Returns `false` for an unknown id.
    ///
    /// Other stops keep their ids.
    pub fn remove_stop(&mut self, id: StopId) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.id == id) else {
            log::debug!("remove_stop ignored: unknown {id}");
            return false;
        };
        self.entries.remove(index);
        log::debug!("removed {id}");
        true
    }

    /// Replaces the stops with an externally supplied value.
    ///
    /// Incoming stops that equal a current stop (matched in order, each
    /// current stop used at most once) keep that stop's id; everything else
    /// gets a fresh id. This lets a host echo back the value it was handed
    /// without disturbing a gesture in progress.
    pub fn sync(&mut self, gradation: &Gradation) {
        let mut previous: Vec<Option<StopEntry>> = self.entries.drain(..).map(Some).collect();
        let mut entries = Vec::with_capacity(gradation.len());
        for stop in gradation.iter().map(|s| sanitize(*s)) {
            let reused = previous
                .iter_mut()
                .find(|slot| slot.is_some_and(|e| e.stop == stop))
                .and_then(Option::take);
            let id = match reused {
                Some(entry) => entry.id,
                None => self.alloc_id(),
            };
            entries.push(StopEntry { id, stop });
        }
        self.entries = entries;
        self.sort();
    }

    fn alloc_id(&mut self) -> StopId {
        let id = StopId(self.next_id);
        self.next_id += 1;
        id
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.stop.position.total_cmp(&b.stop.position));
    }
}

fn sanitize(stop: ColorStop) -> ColorStop {
    ColorStop { position: sanitize_position(stop.position), ..stop }
}

fn sanitize_position(position: f32) -> f32 {
    if position.is_nan() {
        log::warn!("NaN stop position replaced with 0");
        0.0
    } else {
        position.clamp(0.0, 1.0)
    }
}
