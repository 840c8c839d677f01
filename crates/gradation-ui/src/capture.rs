use std::cell::Cell;
use std::rc::Rc;

use crate::store::StopId;

/// Records which stop currently owns the document-level move/up listeners.
///
/// A drag gesture keeps receiving pointer events after the pointer leaves the
/// handle, so the host attaches global listeners on press and must detach them
/// when the gesture ends. Here that pairing is a [`CaptureLease`]: holding one
/// means the listeners are attached, dropping it detaches them. Only one
/// gesture can hold the capture at a time.
///
/// Cloning shares the same slot, so the host can keep a clone and query
/// [`owner`](Self::owner) to decide where to route global events.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    slot: Rc<Cell<Option<StopId>>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the global listeners on behalf of `id`.
    ///
    /// Returns `None` if another gesture already holds the capture.
    pub fn acquire(&self, id: StopId) -> Option<CaptureLease> {
        if let Some(owner) = self.slot.get() {
            log::debug!("capture for {id} refused: held by {owner}");
            return None;
        }
        self.slot.set(Some(id));
        log::trace!("capture attached for {id}");
        Some(CaptureLease { slot: Rc::clone(&self.slot), id })
    }

    #[inline]
    pub fn owner(&self) -> Option<StopId> {
        self.slot.get()
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.slot.get().is_some()
    }
}

/// Proof that the global listeners are attached for one gesture.
///
/// Dropping the lease detaches them; there is no other way to release.
#[derive(Debug)]
pub struct CaptureLease {
    slot: Rc<Cell<Option<StopId>>>,
    id: StopId,
}

impl CaptureLease {
    #[inline]
    pub fn id(&self) -> StopId {
        self.id
    }
}

impl Drop for CaptureLease {
    fn drop(&mut self) {
        if self.slot.get() == Some(self.id) {
            self.slot.set(None);
            log::trace!("capture detached for {}", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StopStore;
    use gradation_engine::paint::Rgba8;

    fn two_ids() -> (StopId, StopId) {
        let mut store = StopStore::new();
        let a = store.add_stop(0.0, Rgba8::WHITE).unwrap();
        let b = store.add_stop(1.0, Rgba8::WHITE).unwrap();
        (a, b)
    }

    #[test]
    fn lease_attaches_and_drop_detaches() {
        let (a, _) = two_ids();
        let capture = PointerCapture::new();
        let lease = capture.acquire(a).unwrap();
        assert_eq!(capture.owner(), Some(a));
        assert_eq!(lease.id(), a);
        drop(lease);
        assert!(!capture.is_captured());
    }

    #[test]
    fn second_acquire_is_refused_while_held() {
        let (a, b) = two_ids();
        let capture = PointerCapture::new();
        let _lease = capture.acquire(a).unwrap();
        assert!(capture.acquire(b).is_none());
        assert_eq!(capture.owner(), Some(a));
    }

    #[test]
    fn clones_share_the_slot() {
        let (a, b) = two_ids();
        let capture = PointerCapture::new();
        let host_view = capture.clone();
        {
            let _lease = capture.acquire(a).unwrap();
            assert_eq!(host_view.owner(), Some(a));
        }
        assert!(host_view.acquire(b).is_some());
    }
}
