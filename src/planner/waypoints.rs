//! The ordered waypoint list.
//!
//! Pure data structure: slot resolution, insertion, removal and reordering.
//! Marker bookkeeping and events are handled by the planner on top of it.

use crate::data::LandmarkId;
use crate::geo::LatLng;
use crate::map::MarkerHandle;

/// Start and end rows are always present.
pub const MIN_SLOTS: usize = 2;

/// One point of the route plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoint {
    /// Text shown in the waypoint's input row.
    pub display_name: String,
    /// `None` until the point is resolved.
    pub coordinates: Option<LatLng>,
    /// Set when the point was chosen from the catalog.
    pub landmark_id: Option<LandmarkId>,
    /// Marker placed for this point, owned by the planner.
    pub(crate) marker: Option<MarkerHandle>,
}

impl Waypoint {
    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }

    /// Marker currently shown for this point.
    pub fn marker(&self) -> Option<MarkerHandle> {
        self.marker
    }

    /// Reset to an empty slot, returning the marker that must be removed.
    pub(crate) fn reset(&mut self) -> Option<MarkerHandle> {
        self.display_name.clear();
        self.coordinates = None;
        self.landmark_id = None;
        self.marker.take()
    }
}

/// Ordered sequence of waypoints with at least [`MIN_SLOTS`] entries.
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointList {
    slots: Vec<Waypoint>,
}

impl Default for WaypointList {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointList {
    /// Two empty slots: start and end.
    pub fn new() -> Self {
        Self {
            slots: vec![Waypoint::default(); MIN_SLOTS],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.slots.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Waypoint> {
        self.slots.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Waypoint] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waypoint> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Waypoint> {
        self.slots.iter_mut()
    }

    pub fn last_index(&self) -> usize {
        self.slots.len() - 1
    }

    /// Start and end rows cannot be removed, only cleared.
    pub fn is_fixed(&self, index: usize) -> bool {
        index == 0 || index == self.last_index()
    }

    /// Coordinates of resolved waypoints in route order.
    pub fn resolved_coordinates(&self) -> Vec<LatLng> {
        self.slots.iter().filter_map(|w| w.coordinates).collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|w| w.is_resolved()).count()
    }

    /// Pick the slot a new point goes into, creating it if needed.
    ///
    /// Order of preference: `target` when in range; the start slot if empty;
    /// the end slot if empty; a new leading slot when `prepend`; otherwise a
    /// new trailing slot.
    pub fn resolve_slot(&mut self, target: Option<usize>, prepend: bool) -> usize {
        if let Some(index) = target.filter(|&i| i < self.slots.len()) {
            return index;
        }

        let last = self.last_index();
        if let Some(index) = [0, last].into_iter().find(|&i| !self.slots[i].is_resolved()) {
            return index;
        }

        if prepend {
            self.slots.insert(0, Waypoint::default());
            0
        } else {
            self.slots.push(Waypoint::default());
            self.last_index()
        }
    }

    /// Insert an empty slot right after `index` (clamped to the end).
    /// Returns the index of the new slot.
    pub fn add_slot_after(&mut self, index: usize) -> usize {
        let at = (index + 1).min(self.slots.len());
        self.slots.insert(at, Waypoint::default());
        at
    }

    /// Remove an interior slot, or clear a start/end slot.
    ///
    /// Returns the marker of the removed or cleared waypoint, and `None` for
    /// an out-of-range index.
    pub fn remove_slot(&mut self, index: usize) -> Option<Option<MarkerHandle>> {
        if index >= self.slots.len() {
            return None;
        }
        if self.is_fixed(index) {
            Some(self.slots[index].reset())
        } else {
            Some(self.slots.remove(index).marker)
        }
    }

    /// Clear a slot's contents without removing it.
    pub fn clear_slot(&mut self, index: usize) -> Option<Option<MarkerHandle>> {
        self.slots.get_mut(index).map(Waypoint::reset)
    }

    /// Move the waypoint at `from` to position `to`; others shift.
    /// Returns false (and does nothing) when either index is out of range.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.slots.len() || to >= self.slots.len() {
            return false;
        }
        if from != to {
            let waypoint = self.slots.remove(from);
            self.slots.insert(to, waypoint);
        }
        true
    }

    /// Reset to two empty slots, returning the markers that were attached.
    pub fn clear(&mut self) -> Vec<MarkerHandle> {
        let markers = self.slots.iter().filter_map(|w| w.marker).collect();
        self.slots = vec![Waypoint::default(); MIN_SLOTS];
        markers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(name: &str, lat: f64, lng: f64) -> Waypoint {
        Waypoint {
            display_name: name.to_string(),
            coordinates: Some(LatLng::new(lat, lng)),
            ..Default::default()
        }
    }

    fn fill(list: &mut WaypointList, index: usize, waypoint: Waypoint) {
        *list.get_mut(index).unwrap() = waypoint;
    }

    #[test]
    fn test_new_list_has_two_empty_slots() {
        let list = WaypointList::new();
        assert_eq!(list.len(), 2);
        assert_eq!(list.resolved_count(), 0);
        assert!(list.is_fixed(0) && list.is_fixed(1));
    }

    #[test]
    fn test_resolve_slot_prefers_empty_start_then_end() {
        let mut list = WaypointList::new();
        assert_eq!(list.resolve_slot(None, false), 0);
        fill(&mut list, 0, resolved("a", 1.0, 1.0));
        assert_eq!(list.resolve_slot(None, false), 1);
        fill(&mut list, 1, resolved("b", 2.0, 2.0));

        // Both filled: append a new trailing slot.
        assert_eq!(list.resolve_slot(None, false), 2);
        assert_eq!(list.len(), 3);
        assert!(!list.get(2).unwrap().is_resolved());
    }

    #[test]
    fn test_resolve_slot_prepend() {
        let mut list = WaypointList::new();
        fill(&mut list, 0, resolved("a", 1.0, 1.0));
        fill(&mut list, 1, resolved("b", 2.0, 2.0));
        assert_eq!(list.resolve_slot(None, true), 0);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).unwrap().display_name, "a");
    }

    #[test]
    fn test_resolve_slot_explicit_target() {
        let mut list = WaypointList::new();
        fill(&mut list, 0, resolved("a", 1.0, 1.0));
        assert_eq!(list.resolve_slot(Some(0), false), 0);

        // Out of range falls back to default resolution.
        assert_eq!(list.resolve_slot(Some(7), false), 1);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_add_slot_after() {
        let mut list = WaypointList::new();
        assert_eq!(list.add_slot_after(0), 1);
        assert_eq!(list.len(), 3);
        assert_eq!(list.add_slot_after(99), 3);
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_remove_fixed_rows_clears_them() {
        let mut list = WaypointList::new();
        fill(&mut list, 0, resolved("a", 1.0, 1.0));
        fill(&mut list, 1, resolved("b", 2.0, 2.0));

        assert!(list.remove_slot(0).is_some());
        assert!(list.remove_slot(1).is_some());
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap(), &Waypoint::default());
        assert_eq!(list.get(1).unwrap(), &Waypoint::default());
    }

    #[test]
    fn test_remove_interior_row() {
        let mut list = WaypointList::new();
        list.add_slot_after(0);
        list.add_slot_after(1);
        fill(&mut list, 1, resolved("via", 3.0, 3.0));
        assert_eq!(list.len(), 4);

        assert!(list.remove_slot(1).is_some());
        assert_eq!(list.len(), 3);
        assert!(list.remove_slot(10).is_none());
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_reorder_preserves_contents() {
        let mut list = WaypointList::new();
        fill(&mut list, 0, resolved("a", 1.0, 1.0));
        fill(&mut list, 1, resolved("b", 2.0, 2.0));
        let c = list.resolve_slot(None, false);
        fill(&mut list, c, resolved("c", 3.0, 3.0));

        assert!(list.reorder(0, 2));
        let names: Vec<_> = list.iter().map(|w| w.display_name.as_str()).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
        assert_eq!(
            list.resolved_coordinates(),
            vec![LatLng::new(2.0, 2.0), LatLng::new(3.0, 3.0), LatLng::new(1.0, 1.0)]
        );

        assert!(!list.reorder(0, 3));
        assert!(list.reorder(1, 1));
    }

    #[test]
    fn test_clear_returns_markers() {
        let mut list = WaypointList::new();
        let mut a = resolved("a", 1.0, 1.0);
        a.marker = Some(MarkerHandle(7));
        fill(&mut list, 0, a);
        list.add_slot_after(0);

        assert_eq!(list.clear(), vec![MarkerHandle(7)]);
        assert_eq!(list, WaypointList::new());
    }
}
