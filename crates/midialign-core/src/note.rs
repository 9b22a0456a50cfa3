//! Note model and deterministic id assignment
//!
//! Ids are the join key for every alignment tuple and selection reference.
//! They are assigned here, not by the MIDI decoder: notes are sorted by
//! `(start ascending, pitch ascending)` with an onset tolerance, then
//! numbered `0..N-1`. Any change to the sort or tie-break silently breaks
//! every alignment file referencing the collection.

use std::cmp::Ordering;

/// Tolerance for treating two note onsets as simultaneous during id
/// assignment. Changing this changes ids, and therefore the meaning of
/// every downstream alignment reference.
pub const ONSET_EPSILON: f64 = 1e-4;

/// Which of the two compared sequences a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// The reference sequence (top panel).
    Score,
    /// The rendition being aligned to the score (bottom panel).
    Perf,
}

impl Panel {
    /// The paired panel.
    pub fn other(self) -> Panel {
        match self {
            Panel::Score => Panel::Perf,
            Panel::Perf => Panel::Score,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Panel::Score => "SCORE",
            Panel::Perf => "PERFORMANCE",
        }
    }
}

/// A selected note reference: one id within one panel's collection.
///
/// Carries the pitch for the status readout. Must be cleared (or
/// re-validated) whenever the referenced collection is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedNote {
    pub panel: Panel,
    pub id: usize,
    pub pitch: u8,
}

/// A single note event with its collection-local id.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Contiguous id within the owning collection (`0..N-1`).
    pub id: usize,
    /// MIDI pitch (0-127).
    pub pitch: u8,
    /// Onset in seconds.
    pub start: f64,
    /// Length in seconds.
    pub duration: f64,
    /// MIDI velocity (0-127).
    pub velocity: u8,
}

impl Note {
    /// End of the note in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether `time` falls within `[start, start + duration]`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end()
    }
}

/// A decoded note event before id assignment.
#[derive(Debug, Clone, Copy)]
pub struct NoteEvent {
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
}

/// An immutable, ordered note sequence for one panel.
///
/// Replaced wholesale on every load; never patched in place. The vector
/// index of each note equals its id, so id lookups are O(1).
#[derive(Debug, Clone, Default)]
pub struct NoteCollection {
    notes: Vec<Note>,
    total_duration: f64,
}

impl NoteCollection {
    /// Build a collection from raw decoded events, assigning ids.
    pub fn from_events(events: Vec<NoteEvent>) -> Self {
        let mut events = events;
        sort_for_ids(&mut events);

        let notes: Vec<Note> = events
            .into_iter()
            .enumerate()
            .map(|(id, e)| Note {
                id,
                pitch: e.pitch,
                start: e.start,
                duration: e.duration,
                velocity: e.velocity,
            })
            .collect();

        let total_duration = notes.iter().map(Note::end).fold(0.0, f64::max);

        Self {
            notes,
            total_duration,
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// O(1) id lookup; ids equal vector indices by construction.
    pub fn get(&self, id: usize) -> Option<&Note> {
        self.notes.get(id)
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// First note whose time span contains `time` and whose pitch row
    /// contains `pitch`. Used for click selection; first match wins.
    pub fn hit_test(&self, time: f64, pitch: f64) -> Option<&Note> {
        self.notes
            .iter()
            .find(|n| n.contains(time) && pitch.floor() == n.pitch as f64)
    }

    /// First note whose `[start, start + duration]` interval contains
    /// `time`, regardless of pitch. Used by playback sync.
    pub fn note_at_time(&self, time: f64) -> Option<&Note> {
        self.notes.iter().find(|n| n.contains(time))
    }
}

/// Order events for id assignment: onset ascending, with onsets closer
/// than [`ONSET_EPSILON`] treated as ties broken by pitch ascending.
///
/// The epsilon relation is not transitive (a chain of near-ties can span
/// more than epsilon end to end), so [`compare_onsets`] is not a total
/// order and must not be handed to `sort_by`, which may panic on one.
/// Instead: a total presort by `(start, pitch)`, then an insertion pass
/// with the epsilon comparator. After the presort only within-epsilon
/// neighbors are out of order, so the pass stays near-linear, and it
/// leaves every adjacent pair ordered per [`compare_onsets`].
fn sort_for_ids(events: &mut [NoteEvent]) {
    events.sort_by(|a, b| {
        a.start
            .partial_cmp(&b.start)
            .unwrap_or(Ordering::Equal)
            .then(a.pitch.cmp(&b.pitch))
    });

    for i in 1..events.len() {
        let mut j = i;
        while j > 0 && compare_onsets(&events[j - 1], &events[j]) == Ordering::Greater {
            events.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// The id-assignment comparator. Antisymmetric but not transitive; see
/// [`sort_for_ids`].
fn compare_onsets(a: &NoteEvent, b: &NoteEvent) -> Ordering {
    if (a.start - b.start).abs() > ONSET_EPSILON {
        a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal)
    } else {
        a.pitch.cmp(&b.pitch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(pitch: u8, start: f64) -> NoteEvent {
        NoteEvent {
            pitch,
            start,
            duration: 0.5,
            velocity: 80,
        }
    }

    #[test]
    fn test_id_assignment_is_deterministic() {
        let events = vec![ev(64, 1.0), ev(60, 0.0), ev(62, 1.0)];
        let a = NoteCollection::from_events(events.clone());
        let b = NoteCollection::from_events(events);

        assert_eq!(a.len(), 3);
        for (x, y) in a.notes().iter().zip(b.notes()) {
            assert_eq!(x, y);
        }
        for (i, n) in a.notes().iter().enumerate() {
            assert_eq!(n.id, i);
        }
    }

    #[test]
    fn test_id_order_property() {
        // Onsets within epsilon tie-break by pitch; otherwise by start.
        let events = vec![ev(70, 2.0), ev(60, 0.00005), ev(55, 0.0), ev(40, 2.5)];
        let coll = NoteCollection::from_events(events);

        let notes = coll.notes();
        for pair in notes.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let earlier = a.start + ONSET_EPSILON < b.start;
            let tied = (a.start - b.start).abs() <= ONSET_EPSILON && a.pitch <= b.pitch;
            assert!(earlier || tied, "order violated between {:?} and {:?}", a, b);
        }
        // 55 and 60 start within epsilon of each other: pitch decides.
        assert_eq!(notes[0].pitch, 55);
        assert_eq!(notes[1].pitch, 60);
    }

    #[test]
    fn test_long_near_tie_chain_keeps_adjacent_order() {
        // Onsets 0.6 * epsilon apart: every adjacent pair is a near-tie
        // but the chain spans far more than epsilon end to end, the case
        // where the comparator alone is not a total order.
        let events: Vec<NoteEvent> = (0..200)
            .map(|i| NoteEvent {
                pitch: (127 - i % 128) as u8,
                start: i as f64 * ONSET_EPSILON * 0.6,
                duration: 0.5,
                velocity: 80,
            })
            .collect();
        let coll = NoteCollection::from_events(events);

        assert_eq!(coll.len(), 200);
        for pair in coll.notes().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let earlier = a.start + ONSET_EPSILON < b.start;
            let tied = (a.start - b.start).abs() <= ONSET_EPSILON && a.pitch <= b.pitch;
            assert!(earlier || tied, "order violated between {:?} and {:?}", a, b);
        }
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let coll = NoteCollection::from_events(vec![ev(60, 0.0), ev(60, 0.3)]);
        // 0.3..0.5 is covered by both notes; the lower id wins.
        let hit = coll.hit_test(0.4, 60.2).unwrap();
        assert_eq!(hit.id, 0);
        assert!(coll.hit_test(0.4, 61.2).is_none());
        assert!(coll.hit_test(9.0, 60.2).is_none());
    }

    #[test]
    fn test_total_duration() {
        let coll = NoteCollection::from_events(vec![ev(60, 0.0), ev(62, 3.0)]);
        assert!((coll.total_duration() - 3.5).abs() < 1e-9);
    }
}
