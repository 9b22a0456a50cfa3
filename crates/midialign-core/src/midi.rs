//! Standard MIDI File ingestion
//!
//! Decodes an SMF byte buffer into a [`NoteCollection`]: all tracks are
//! flattened into one event list, tick times are converted to seconds via
//! the tempo map, and ids are assigned by the deterministic onset sort in
//! [`crate::note`]. Decode failure is ingestion-fatal: the caller keeps its
//! prior state and surfaces the error once; no partial collection is ever
//! produced.

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use thiserror::Error;

use crate::note::{NoteCollection, NoteEvent};

/// Default tempo when the file carries no tempo event (120 BPM).
const DEFAULT_US_PER_BEAT: f64 = 500_000.0;

#[derive(Debug, Error)]
pub enum MidiIngestError {
    /// The buffer is not a parsable Standard MIDI File (bad signature,
    /// truncated chunk, malformed event).
    #[error("not a valid Standard MIDI file: {0}")]
    Parse(#[from] midly::Error),
}

/// Decode an SMF buffer into a note collection with assigned ids.
pub fn decode_midi(bytes: &[u8]) -> Result<NoteCollection, MidiIngestError> {
    let smf = Smf::parse(bytes)?;
    let tempo_map = TempoMap::from_smf(&smf);

    let mut events: Vec<NoteEvent> = Vec::new();
    for track in &smf.tracks {
        collect_track_notes(track, &tempo_map, &mut events);
    }

    let collection = NoteCollection::from_events(events);
    log::info!(
        "decoded MIDI: {} notes over {:.2}s ({} track(s))",
        collection.len(),
        collection.total_duration(),
        smf.tracks.len()
    );
    Ok(collection)
}

/// Flatten one track's note on/off events into [`NoteEvent`]s.
///
/// Sounding notes are keyed by (channel, key); a note-on with velocity 0 is
/// treated as note-off per the MIDI spec. Overlapping same-key notes close
/// oldest-first. Unterminated notes at end of track are dropped.
fn collect_track_notes(
    track: &[midly::TrackEvent<'_>],
    tempo_map: &TempoMap,
    out: &mut Vec<NoteEvent>,
) {
    // (channel, key) -> sounding note onsets, oldest first.
    let mut sounding: std::collections::HashMap<(u8, u8), Vec<(f64, u8)>> =
        std::collections::HashMap::new();
    let mut tick = 0u64;

    for event in track {
        tick += u64::from(u32::from(event.delta));

        let TrackEventKind::Midi { channel, message } = event.kind else {
            continue;
        };
        let channel = u8::from(channel);

        match message {
            MidiMessage::NoteOn { key, vel } if u8::from(vel) > 0 => {
                let start = tempo_map.seconds_at(tick);
                sounding
                    .entry((channel, u8::from(key)))
                    .or_default()
                    .push((start, u8::from(vel)));
            }
            MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                let key = u8::from(key);
                if let Some(stack) = sounding.get_mut(&(channel, key)) {
                    if !stack.is_empty() {
                        let (start, velocity) = stack.remove(0);
                        let end = tempo_map.seconds_at(tick);
                        out.push(NoteEvent {
                            pitch: key,
                            start,
                            duration: (end - start).max(0.0),
                            velocity,
                        });
                    }
                }
            }
            _ => {}
        }
    }
}

/// Tick-to-seconds conversion across tempo changes.
///
/// Tempo events are merged from every track (format 1 files keep them in
/// the first track, but nothing guarantees it) and each change point
/// carries the accumulated wall-clock seconds up to that tick.
struct TempoMap {
    /// (tick, seconds at tick, seconds per tick from here on), ascending.
    segments: Vec<(u64, f64, f64)>,
}

impl TempoMap {
    fn from_smf(smf: &Smf<'_>) -> Self {
        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(tpb) => f64::from(u16::from(tpb)),
            Timing::Timecode(fps, subframe) => {
                // SMPTE timing: ticks map to wall clock directly, no tempo.
                let ticks_per_second = f64::from(fps.as_f32()) * f64::from(subframe);
                return Self {
                    segments: vec![(0, 0.0, 1.0 / ticks_per_second)],
                };
            }
        };

        let mut changes: Vec<(u64, f64)> = Vec::new();
        for track in &smf.tracks {
            let mut tick = 0u64;
            for event in track {
                tick += u64::from(u32::from(event.delta));
                if let TrackEventKind::Meta(MetaMessage::Tempo(us_per_beat)) = event.kind {
                    changes.push((tick, f64::from(u32::from(us_per_beat))));
                }
            }
        }
        changes.sort_by_key(|&(tick, _)| tick);

        let mut segments = Vec::with_capacity(changes.len() + 1);
        let mut seconds = 0.0;
        let mut last_tick = 0u64;
        let mut sec_per_tick = DEFAULT_US_PER_BEAT / 1e6 / ticks_per_beat;
        segments.push((0, 0.0, sec_per_tick));

        for (tick, us_per_beat) in changes {
            seconds += (tick - last_tick) as f64 * sec_per_tick;
            sec_per_tick = us_per_beat / 1e6 / ticks_per_beat;
            segments.push((tick, seconds, sec_per_tick));
            last_tick = tick;
        }

        Self { segments }
    }

    fn seconds_at(&self, tick: u64) -> f64 {
        let idx = self
            .segments
            .partition_point(|&(t, _, _)| t <= tick)
            .saturating_sub(1);
        let (seg_tick, seg_seconds, sec_per_tick) = self.segments[idx];
        seg_seconds + (tick - seg_tick) as f64 * sec_per_tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Format-0 file, 480 ticks per beat, one track.
    fn smf(track_body: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MThd");
        bytes.extend_from_slice(&6u32.to_be_bytes());
        bytes.extend_from_slice(&0u16.to_be_bytes()); // format 0
        bytes.extend_from_slice(&1u16.to_be_bytes()); // one track
        bytes.extend_from_slice(&480u16.to_be_bytes());
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(track_body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(track_body);
        bytes
    }

    #[test]
    fn test_rejects_non_midi() {
        assert!(decode_midi(b"score_id,perf_id\n0,0\n").is_err());
        assert!(decode_midi(&[]).is_err());
    }

    #[test]
    fn test_decodes_single_note() {
        // Note on C4 at tick 0, note off at tick 480 (one beat = 0.5s at
        // the default 120 BPM), end of track.
        let bytes = smf(&[
            0x00, 0x90, 0x3C, 0x40, // delta 0, on, key 60, vel 64
            0x83, 0x60, 0x80, 0x3C, 0x40, // delta 480, off
            0x00, 0xFF, 0x2F, 0x00, // end of track
        ]);

        let coll = decode_midi(&bytes).unwrap();
        assert_eq!(coll.len(), 1);
        let note = coll.get(0).unwrap();
        assert_eq!(note.pitch, 60);
        assert_eq!(note.velocity, 64);
        assert!((note.start - 0.0).abs() < 1e-9);
        assert!((note.duration - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tempo_change_scales_seconds() {
        // Set tempo to 60 BPM (1_000_000 us/beat) before the note: one
        // beat now lasts a full second.
        let bytes = smf(&[
            0x00, 0xFF, 0x51, 0x03, 0x0F, 0x42, 0x40, // tempo 1e6
            0x00, 0x90, 0x3C, 0x40, //
            0x83, 0x60, 0x80, 0x3C, 0x00, // delta 480, zero-vel off
            0x00, 0xFF, 0x2F, 0x00,
        ]);

        let coll = decode_midi(&bytes).unwrap();
        assert_eq!(coll.len(), 1);
        assert!((coll.get(0).unwrap().duration - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ids_follow_onset_order_across_events() {
        // Two notes: E4 at beat 1, C4 at beat 0. Ids must follow onsets.
        let bytes = smf(&[
            0x00, 0x90, 0x3C, 0x50, // C4 on at 0
            0x83, 0x60, 0x90, 0x40, 0x50, // E4 on at 480
            0x83, 0x60, 0x80, 0x3C, 0x00, // C4 off at 960
            0x00, 0x80, 0x40, 0x00, // E4 off at 960
            0x00, 0xFF, 0x2F, 0x00,
        ]);

        let coll = decode_midi(&bytes).unwrap();
        assert_eq!(coll.len(), 2);
        assert_eq!(coll.get(0).unwrap().pitch, 60);
        assert_eq!(coll.get(1).unwrap().pitch, 64);
        assert!(coll.get(0).unwrap().start < coll.get(1).unwrap().start);
    }
}
