use std::collections::HashSet;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::clients::entities::Track;

/// Upcoming tracks, head first. Track ids are unique within the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<Track>,
}

impl Queue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Same as [`Queue::replace`] on an empty queue.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut queue = Self::new();
        queue.replace(tracks);
        queue
    }

    /// Replace the whole queue. Later duplicates of an id are dropped.
    pub fn replace(&mut self, tracks: Vec<Track>) {
        let mut seen = HashSet::with_capacity(tracks.len());
        self.tracks = tracks
            .into_iter()
            .filter(|t| {
                let fresh = seen.insert(t.id.clone());
                if !fresh {
                    warn!("Dropping duplicate track {} ({})", t.id, t.name);
                }
                fresh
            })
            .collect();
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn front(&self) -> Option<&Track> {
        self.tracks.first()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Out-of-range indices leave the queue alone.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        Some(self.tracks.remove(index))
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.tracks.shuffle(rng);
    }

    /// Drop one row at a new position. `to` past the end means "last".
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tracks.len() {
            return false;
        }
        let track = self.tracks.remove(from);
        let to = to.min(self.tracks.len());
        self.tracks.insert(to, track);
        true
    }

    /// Rebuild the queue in the order of `ids`. Unknown ids are skipped and
    /// tracks missing from `ids` are dropped.
    pub fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) {
        let mut remaining = std::mem::take(&mut self.tracks);
        for id in ids {
            let id: &str = id.as_ref();
            if let Some(pos) = remaining.iter().position(|t| t.id == id) {
                self.tracks.push(remaining.remove(pos));
            } else {
                debug!("Reorder skipped unknown track {id}");
            }
        }
        if !remaining.is_empty() {
            debug!("Reorder dropped {} unlisted tracks", remaining.len());
        }
    }

    /// Remove and return the head.
    pub fn pop_front(&mut self) -> Option<Track> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.tracks.remove(0))
        }
    }

    /// Follow the player when it moved on by itself: if it is now playing
    /// the second track, the head has finished and is dropped.
    pub fn reconcile(&mut self, current_id: &str) -> bool {
        if current_id.is_empty() {
            return false;
        }
        let advanced = match (self.tracks.first(), self.tracks.get(1)) {
            (Some(head), Some(second)) => head.id != current_id && second.id == current_id,
            _ => false,
        };
        if advanced {
            let head = self.tracks.remove(0);
            debug!("Natural advance detected, dropping {}", head.id);
        }
        advanced
    }

    /// Total running time in seconds.
    pub fn total_duration(&self) -> u64 {
        self.tracks
            .iter()
            .fold(0u64, |total, t| total.saturating_add(t.duration))
    }
}
