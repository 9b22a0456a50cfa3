//! Alignment tuples, text parsing, and the derived alignment index
//!
//! The alignment file relates score note ids to performance note ids. The
//! index derives everything rendering needs once per data change: mapped and
//! unmapped id sets per panel, ground-truth classification, and first-match
//! counterpart lookup tables so the per-frame sync path never rescans the
//! tuple list.

use std::collections::{HashMap, HashSet};

use crate::note::{NoteCollection, Panel};

/// Sentinel id meaning "this side intentionally has no counterpart".
/// Distinct from a note simply being absent from the alignment.
pub const NO_ID: i32 = -1;

/// One row of an alignment mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentTuple {
    pub score_id: i32,
    /// Intermediary annotation id. Carried through, never interpreted.
    pub annot_id: i32,
    pub perf_id: i32,
}

impl AlignmentTuple {
    /// Both sides reference a real note.
    pub fn is_mapped(&self) -> bool {
        self.score_id != NO_ID && self.perf_id != NO_ID
    }

    pub fn side(&self, panel: Panel) -> i32 {
        match panel {
            Panel::Score => self.score_id,
            Panel::Perf => self.perf_id,
        }
    }
}

/// Parse alignment text, one record per line.
///
/// A record is at least two integers separated by commas or whitespace:
/// `score_id [annot_id] perf_id`. Two-integer records are read as
/// `(score_id, perf_id)`. A line is skipped whenever any of its tokens
/// fails to parse as an integer or it yields fewer than two integers
/// (headers, comments, garbage); a partially-numeric line never produces
/// a tuple. This never fails.
pub fn parse_alignment(text: &str) -> Vec<AlignmentTuple> {
    let mut tuples = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Option<Vec<i32>> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<i32>().ok())
            .collect();

        match fields.as_deref() {
            None | Some([]) | Some([_]) => skipped += 1,
            Some([score_id, perf_id]) => tuples.push(AlignmentTuple {
                score_id: *score_id,
                annot_id: NO_ID,
                perf_id: *perf_id,
            }),
            Some([score_id, annot_id, perf_id, ..]) => tuples.push(AlignmentTuple {
                score_id: *score_id,
                annot_id: *annot_id,
                perf_id: *perf_id,
            }),
        }
    }

    if skipped > 0 {
        log::warn!(
            "parse_alignment: skipped {} unparsable line(s), kept {}",
            skipped,
            tuples.len()
        );
    }

    tuples
}

/// Correctness of a mapped pair against the ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchClass {
    /// No ground truth loaded; nothing to verify against.
    Unverified,
    /// The identical (score_id, perf_id) pair exists in the ground truth.
    Correct,
    Incorrect,
}

/// Per-panel derived id sets.
#[derive(Debug, Clone, Default)]
struct SideSets {
    mapped: HashSet<usize>,
    /// Ids whose tuple carries the sentinel on the other side.
    explicitly_unmapped: HashSet<usize>,
    /// Explicitly unmapped ids plus ids absent from the alignment.
    unmapped: HashSet<usize>,
    /// First-match counterpart on the other side, keyed by this side's id.
    /// The value is the raw tuple field and may be [`NO_ID`].
    first_counterpart: HashMap<usize, i32>,
}

/// Immutable snapshot derived from the working alignment, the ground truth,
/// and both note collections. Rebuilt whenever any of those change.
#[derive(Debug, Clone, Default)]
pub struct AlignmentIndex {
    score: SideSets,
    perf: SideSets,
    working_pairs: HashSet<(i32, i32)>,
    gt_pairs: HashSet<(i32, i32)>,
}

impl AlignmentIndex {
    pub fn build(
        working: &[AlignmentTuple],
        ground_truth: &[AlignmentTuple],
        score: &NoteCollection,
        perf: &NoteCollection,
    ) -> Self {
        let mut index = AlignmentIndex::default();

        for tuple in working {
            if tuple.is_mapped() {
                index.score.mapped.insert(tuple.score_id as usize);
                index.perf.mapped.insert(tuple.perf_id as usize);
                index.working_pairs.insert((tuple.score_id, tuple.perf_id));
            } else if tuple.score_id != NO_ID {
                index.score.explicitly_unmapped.insert(tuple.score_id as usize);
                index.score.unmapped.insert(tuple.score_id as usize);
            } else if tuple.perf_id != NO_ID {
                index.perf.explicitly_unmapped.insert(tuple.perf_id as usize);
                index.perf.unmapped.insert(tuple.perf_id as usize);
            }

            if tuple.score_id != NO_ID {
                index
                    .score
                    .first_counterpart
                    .entry(tuple.score_id as usize)
                    .or_insert(tuple.perf_id);
            }
            if tuple.perf_id != NO_ID {
                index
                    .perf
                    .first_counterpart
                    .entry(tuple.perf_id as usize)
                    .or_insert(tuple.score_id);
            }
        }

        // Absence from the alignment counts as unmapped; silence is not
        // neutral. With no alignment loaded at all the sets stay empty.
        if !working.is_empty() {
            for note in score.notes() {
                if !index.score.mapped.contains(&note.id) {
                    index.score.unmapped.insert(note.id);
                }
            }
            for note in perf.notes() {
                if !index.perf.mapped.contains(&note.id) {
                    index.perf.unmapped.insert(note.id);
                }
            }
        }

        for tuple in ground_truth {
            index.gt_pairs.insert((tuple.score_id, tuple.perf_id));
        }

        log::debug!(
            "alignment index: {} working pairs, {} gt pairs, unmapped score/perf {}/{}",
            index.working_pairs.len(),
            index.gt_pairs.len(),
            index.score.unmapped.len(),
            index.perf.unmapped.len()
        );

        index
    }

    fn side(&self, panel: Panel) -> &SideSets {
        match panel {
            Panel::Score => &self.score,
            Panel::Perf => &self.perf,
        }
    }

    pub fn mapped(&self, panel: Panel) -> &HashSet<usize> {
        &self.side(panel).mapped
    }

    /// Ids a tuple explicitly declares as having no counterpart.
    pub fn explicitly_unmapped(&self, panel: Panel) -> &HashSet<usize> {
        &self.side(panel).explicitly_unmapped
    }

    /// Explicitly unmapped ids plus ids the alignment never mentions.
    pub fn unmapped(&self, panel: Panel) -> &HashSet<usize> {
        &self.side(panel).unmapped
    }

    pub fn is_unmapped(&self, panel: Panel, id: usize) -> bool {
        self.side(panel).unmapped.contains(&id)
    }

    pub fn has_ground_truth(&self) -> bool {
        !self.gt_pairs.is_empty()
    }

    /// Classify a mapped pair against the ground truth.
    pub fn classify(&self, score_id: i32, perf_id: i32) -> MatchClass {
        if self.gt_pairs.is_empty() {
            MatchClass::Unverified
        } else if self.gt_pairs.contains(&(score_id, perf_id)) {
            MatchClass::Correct
        } else {
            MatchClass::Incorrect
        }
    }

    /// Counterpart id on the other side, from the first tuple whose
    /// `panel` side matches `id`. `None` if the id never appears or the
    /// first match carries the sentinel.
    pub fn counterpart(&self, panel: Panel, id: usize) -> Option<usize> {
        match self.side(panel).first_counterpart.get(&id) {
            Some(&other) if other != NO_ID => Some(other as usize),
            _ => None,
        }
    }

    /// First ground-truth tuple referencing `id` on `panel` with both sides
    /// valid but no identical pair in the working alignment. Flags a match
    /// the working alignment is missing for the selected note.
    pub fn ground_truth_only_pair_for<'a>(
        &self,
        ground_truth: &'a [AlignmentTuple],
        panel: Panel,
        id: usize,
    ) -> Option<&'a AlignmentTuple> {
        ground_truth
            .iter()
            .find(|gt| gt.side(panel) == id as i32)
            .filter(|gt| gt.is_mapped())
            .filter(|gt| !self.working_pairs.contains(&(gt.score_id, gt.perf_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteEvent;

    fn tuple(score_id: i32, annot_id: i32, perf_id: i32) -> AlignmentTuple {
        AlignmentTuple {
            score_id,
            annot_id,
            perf_id,
        }
    }

    fn collection(n: usize) -> NoteCollection {
        NoteCollection::from_events(
            (0..n)
                .map(|i| NoteEvent {
                    pitch: 60,
                    start: i as f64,
                    duration: 0.5,
                    velocity: 80,
                })
                .collect(),
        )
    }

    #[test]
    fn test_csv_tolerance() {
        let tuples = parse_alignment("0,0,0\n1,1,-1\nbadline\n");
        assert_eq!(tuples, vec![tuple(0, 0, 0), tuple(1, 1, -1)]);
    }

    #[test]
    fn test_two_field_records_and_header() {
        let tuples = parse_alignment("score_id perf_id\n3 7\n4\t-1\n");
        assert_eq!(tuples, vec![tuple(3, -1, 7), tuple(4, -1, -1)]);
    }

    #[test]
    fn test_partial_integer_line_is_skipped() {
        // A non-integer token invalidates the whole record: the leading
        // integers must not collapse into a shorter (score, perf) pair.
        let tuples = parse_alignment("12 34 x\n0 1\n");
        assert_eq!(tuples, vec![tuple(0, -1, 1)]);
        assert!(parse_alignment("12 34 x\n").is_empty());
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        let tuples = parse_alignment("\n  0, 1 ,2\n\n");
        assert_eq!(tuples, vec![tuple(0, 1, 2)]);
    }

    #[test]
    fn test_unmapped_derivation() {
        let score = collection(3);
        let perf = collection(6);
        let working = vec![tuple(0, 0, 5), tuple(1, 1, -1)];
        let index = AlignmentIndex::build(&working, &[], &score, &perf);

        assert!(index.mapped(Panel::Score).contains(&0));
        assert_eq!(index.mapped(Panel::Score).len(), 1);
        // 1 is explicitly unmapped, 2 is absent from the alignment.
        assert!(index.is_unmapped(Panel::Score, 1));
        assert!(index.is_unmapped(Panel::Score, 2));
        assert!(!index.is_unmapped(Panel::Score, 0));
        assert!(index.explicitly_unmapped(Panel::Score).contains(&1));
        assert!(!index.explicitly_unmapped(Panel::Score).contains(&2));
    }

    #[test]
    fn test_empty_alignment_yields_empty_sets() {
        let score = collection(3);
        let perf = collection(3);
        let index = AlignmentIndex::build(&[], &[], &score, &perf);
        assert!(index.unmapped(Panel::Score).is_empty());
        assert!(index.unmapped(Panel::Perf).is_empty());
    }

    #[test]
    fn test_ground_truth_classification() {
        let score = collection(2);
        let perf = collection(8);
        let working = vec![tuple(0, 0, 5), tuple(1, 1, 6)];
        let gt = vec![tuple(0, 0, 5)];

        let index = AlignmentIndex::build(&working, &gt, &score, &perf);
        assert_eq!(index.classify(0, 5), MatchClass::Correct);
        assert_eq!(index.classify(1, 6), MatchClass::Incorrect);

        let unverified = AlignmentIndex::build(&working, &[], &score, &perf);
        assert_eq!(unverified.classify(0, 5), MatchClass::Unverified);
        assert_eq!(unverified.classify(1, 6), MatchClass::Unverified);
    }

    #[test]
    fn test_counterpart_first_match_and_sentinel() {
        let score = collection(3);
        let perf = collection(3);
        let working = vec![tuple(0, 0, 2), tuple(0, 0, 1), tuple(1, 0, -1)];
        let index = AlignmentIndex::build(&working, &[], &score, &perf);

        // First tuple wins the lookup.
        assert_eq!(index.counterpart(Panel::Score, 0), Some(2));
        assert_eq!(index.counterpart(Panel::Perf, 2), Some(0));
        // Sentinel on the first match means no counterpart.
        assert_eq!(index.counterpart(Panel::Score, 1), None);
        assert_eq!(index.counterpart(Panel::Score, 2), None);
    }

    #[test]
    fn test_ground_truth_only_pair_for() {
        let score = collection(3);
        let perf = collection(8);
        let working = vec![tuple(0, 0, 5)];
        let gt = vec![tuple(0, 0, 5), tuple(1, 0, 6)];
        let index = AlignmentIndex::build(&working, &gt, &score, &perf);

        // (0,5) is already in the working alignment: nothing to flag.
        assert!(index
            .ground_truth_only_pair_for(&gt, Panel::Score, 0)
            .is_none());
        // (1,6) exists only in the ground truth.
        let missed = index
            .ground_truth_only_pair_for(&gt, Panel::Score, 1)
            .unwrap();
        assert_eq!((missed.score_id, missed.perf_id), (1, 6));
        let missed = index
            .ground_truth_only_pair_for(&gt, Panel::Perf, 6)
            .unwrap();
        assert_eq!(missed.score_id, 1);
    }
}
