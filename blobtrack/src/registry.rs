//! Live track storage for one stream

use crate::bbox::BoundingBox;
use crate::error::TrackError;
use crate::track::Track;
use std::collections::BTreeMap;

/// Owns every live track of a stream, keyed by id.
///
/// Ids are handed out in increasing order starting at 1 and are never
/// reassigned, even after the track holding them has been pruned.
#[derive(Debug, Clone)]
pub struct TrackRegistry {
    next_track_id: u32,
    tracks: BTreeMap<u32, Track>,
}

impl Default for TrackRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self {
            next_track_id: 1,
            tracks: BTreeMap::new(),
        }
    }

    /// Snapshot of the live tracks, in id order
    pub fn all_tracks(&self) -> Vec<Track> {
        self.tracks.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Track> {
        self.tracks.values_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: u32) -> Option<&mut Track> {
        self.tracks.get_mut(&id)
    }

    /// Start a new track for `bbox` under the next free id
    pub fn add(&mut self, bbox: BoundingBox) -> &Track {
        let id = self.next_track_id;
        self.next_track_id += 1;

        let previous = self.tracks.insert(id, Track::new(id, bbox));
        assert!(previous.is_none(), "{}", TrackError::DuplicateIdentifier(id));

        &self.tracks[&id]
    }

    /// Remove a track by id; a missing id is a no-op
    pub fn remove(&mut self, id: u32) -> Option<Track> {
        self.tracks.remove(&id)
    }

    /// Drop every track lost for more than `max_lost` frames, returning them
    pub fn prune(&mut self, max_lost: u32) -> Vec<Track> {
        let stale: Vec<u32> = self
            .tracks
            .values()
            .filter(|track| track.frames_lost() > max_lost)
            .map(Track::id)
            .collect();

        stale
            .into_iter()
            .filter_map(|id| self.tracks.remove(&id))
            .collect()
    }

    /// Forget every track. Id allocation continues where it left off.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Id the next call to `add` will assign
    pub fn next_id(&self) -> u32 {
        self.next_track_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x: i32) -> BoundingBox {
        BoundingBox::new(x, 0, 10, 10)
    }

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut registry = TrackRegistry::new();
        assert_eq!(registry.add(bbox(0)).id(), 1);
        assert_eq!(registry.add(bbox(50)).id(), 2);

        let track = registry.get(2).unwrap();
        assert_eq!(track.age_seen(), 1);
        assert_eq!(track.frames_lost(), 0);
        assert!(!track.counted());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut registry = TrackRegistry::new();
        registry.add(bbox(0));
        registry.add(bbox(50));
        assert!(registry.remove(2).is_some());
        registry.clear();

        assert_eq!(registry.add(bbox(100)).id(), 3);
    }

    #[test]
    fn test_remove_on_empty_registry() {
        let mut registry = TrackRegistry::new();
        assert!(registry.remove(42).is_none());
        assert!(registry.prune(0).is_empty());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune_only_exceeding_tracks() {
        let mut registry = TrackRegistry::new();
        registry.add(bbox(0));
        registry.add(bbox(50));
        registry.add(bbox(100));

        for _ in 0..3 {
            registry.get_mut(1).unwrap().mark_lost();
        }
        for _ in 0..2 {
            registry.get_mut(2).unwrap().mark_lost();
        }

        let pruned = registry.prune(2);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].id(), 1);

        let ids: Vec<u32> = registry.all_tracks().iter().map(Track::id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_prune_zero_keeps_fresh_tracks() {
        let mut registry = TrackRegistry::new();
        registry.add(bbox(0));
        registry.add(bbox(50));
        registry.get_mut(1).unwrap().mark_lost();

        registry.prune(0);
        assert!(registry.get(1).is_none());
        assert!(registry.get(2).is_some());
    }
}
