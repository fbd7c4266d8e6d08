//! Voice leading for the chords the surface selects.
//!
//! Pitches are MIDI note numbers. The root comes from the hex pads and the
//! chord quality arrives as a list of intervals above it; this module moves
//! the voices of the sounding chord to the new one with as little motion as
//! it can find.

use thiserror::Error;

pub const MAX_VOICES: usize = 8;
pub const OCTAVE: i32 = 12;
/// Cost of pairing a voice with nothing when chord sizes differ.
pub const MISSING_VOICE_COST: u32 = 1000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoicingError {
    #[error("Chord has no voices")]
    Empty,
    #[error("Too many voices: {0} (max {MAX_VOICES})")]
    TooManyVoices(usize),
    #[error("Voice count mismatch: {current} current, {target} target")]
    SizeMismatch { current: usize, target: usize },
    #[error("Cost matrix row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
}

pub fn pitch_class(pitch: i32) -> u8 {
    pitch.rem_euclid(OCTAVE) as u8
}

/// Signed shortest motion between two pitch classes, in `-5..=6`.
pub fn interval_path(from: u8, to: u8) -> i32 {
    let up = (i32::from(to) - i32::from(from)).rem_euclid(OCTAVE);
    if up > OCTAVE / 2 { up - OCTAVE } else { up }
}

/// Sorted pitch classes transposed so the lowest one is 0.
pub fn normal_form(chord: &[i32]) -> Vec<u8> {
    let mut pcs: Vec<u8> = chord.iter().map(|p| pitch_class(*p)).collect();
    pcs.sort_unstable();
    match pcs.first().copied() {
        Some(base) => pcs.into_iter().map(|pc| pc - base).collect(),
        None => pcs,
    }
}

fn check_size(len: usize) -> Result<(), VoicingError> {
    match len {
        0 => Err(VoicingError::Empty),
        n if n > MAX_VOICES => Err(VoicingError::TooManyVoices(n)),
        _ => Ok(()),
    }
}

fn check_sizes(current: usize, target: usize) -> Result<(), VoicingError> {
    check_size(current)?;
    check_size(target)?;
    if current != target {
        return Err(VoicingError::SizeMismatch { current, target });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoicePath {
    pub start: u8,
    pub motion: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLeading {
    pub paths: Vec<VoicePath>,
    /// Total semitones moved.
    pub cost: u32,
}

/// Smallest voice leading between two pitch-class sets of equal size.
///
/// Both sets are sorted and the target is tried under every cyclic rotation,
/// each voice taking its shortest path. Ties keep the earliest rotation,
/// starting from the unrotated pairing.
pub fn bijective(from: &[u8], to: &[u8]) -> Result<VoiceLeading, VoicingError> {
    check_sizes(from.len(), to.len())?;

    let mut from = from.to_vec();
    let mut to = to.to_vec();
    from.sort_unstable();
    to.sort_unstable();

    let n = to.len();
    let mut best: Option<VoiceLeading> = None;
    for rotation in 0..n {
        let paths: Vec<VoicePath> = from
            .iter()
            .enumerate()
            .map(|(i, &start)| VoicePath {
                start,
                motion: interval_path(start, to[(i + rotation) % n]),
            })
            .collect();
        let cost: u32 = paths.iter().map(|p| p.motion.unsigned_abs()).sum();

        if best.as_ref().is_none_or(|b| cost < b.cost) {
            best = Some(VoiceLeading { paths, cost });
        }
    }
    best.ok_or(VoicingError::Empty)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voicing {
    /// One pitch per input voice, in input order.
    pub chord: Vec<i32>,
    pub cost: u32,
}

impl Voicing {
    pub fn bass(&self) -> Option<i32> {
        self.chord.first().copied()
    }
}

/// Moves each pitch of `current` along the minimal bijective voice leading
/// to `target` pitch classes. Voices keep their order and octave register.
pub fn voice_lead(current: &[i32], target: &[u8]) -> Result<Voicing, VoicingError> {
    let pcs: Vec<u8> = current.iter().map(|p| pitch_class(*p)).collect();
    let target: Vec<u8> = target.iter().map(|pc| pc % OCTAVE as u8).collect();
    let leading = bijective(&pcs, &target)?;

    let mut used = vec![false; leading.paths.len()];
    let chord = current
        .iter()
        .zip(&pcs)
        .filter_map(|(&pitch, &pc)| {
            let (i, path) = leading
                .paths
                .iter()
                .enumerate()
                .find(|(i, path)| !used[*i] && path.start == pc)?;
            used[i] = true;
            Some(pitch + path.motion)
        })
        .collect();

    Ok(Voicing {
        chord,
        cost: leading.cost,
    })
}

/// Semitone distance from every current voice (rows) to every target note
/// (columns). The matrix is square; missing voices cost
/// [`MISSING_VOICE_COST`].
pub fn distance_matrix(current: &[i32], target: &[i32]) -> Vec<Vec<u32>> {
    let n = current.len().max(target.len());
    (0..n)
        .map(|row| {
            (0..n)
                .map(|col| match (current.get(row), target.get(col)) {
                    (Some(a), Some(b)) => a.abs_diff(*b),
                    _ => MISSING_VOICE_COST,
                })
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Column chosen for each row.
    pub columns: Vec<usize>,
    pub cost: u32,
}

/// Minimum-cost pairing of rows to columns. On ties the pairing that is
/// lexicographically first by column wins.
pub fn assign(costs: &[Vec<u32>]) -> Result<Assignment, VoicingError> {
    let n = costs.len();
    check_size(n)?;
    if let Some((row, r)) = costs.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(VoicingError::NotSquare {
            row,
            len: r.len(),
            expected: n,
        });
    }

    let mut search = AssignmentSearch {
        costs,
        used: vec![false; n],
        columns: Vec::with_capacity(n),
        best: None,
    };
    search.run(0, 0);
    search.best.ok_or(VoicingError::Empty)
}

struct AssignmentSearch<'a> {
    costs: &'a [Vec<u32>],
    used: Vec<bool>,
    columns: Vec<usize>,
    best: Option<Assignment>,
}

impl AssignmentSearch<'_> {
    fn run(&mut self, row: usize, partial: u32) {
        if self.best.as_ref().is_some_and(|b| partial >= b.cost) {
            return;
        }
        if row == self.costs.len() {
            self.best = Some(Assignment {
                columns: self.columns.clone(),
                cost: partial,
            });
            return;
        }
        for col in 0..self.costs.len() {
            if self.used[col] {
                continue;
            }
            self.used[col] = true;
            self.columns.push(col);
            self.run(row + 1, partial + self.costs[row][col]);
            self.columns.pop();
            self.used[col] = false;
        }
    }
}

/// Reassigns concrete target pitches to the current voices so the total
/// semitone motion is smallest.
pub fn nearest_voicing(current: &[i32], target: &[i32]) -> Result<Voicing, VoicingError> {
    check_sizes(current.len(), target.len())?;
    let assignment = assign(&distance_matrix(current, target))?;
    Ok(Voicing {
        chord: assignment.columns.iter().map(|&col| target[col]).collect(),
        cost: assignment.cost,
    })
}

/// The sounding chord plus the root it is transposed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceLeader {
    current: Vec<i32>,
    root: u8,
    feedback: bool,
}

impl VoiceLeader {
    pub fn new(current: Vec<i32>) -> Result<Self, VoicingError> {
        check_size(current.len())?;
        Ok(Self {
            current,
            root: 0,
            feedback: true,
        })
    }

    pub fn current(&self) -> &[i32] {
        &self.current
    }

    pub fn root(&self) -> u8 {
        self.root
    }

    pub fn set_root(&mut self, root: i32) {
        self.root = pitch_class(root);
    }

    /// When on, each led chord becomes the chord the next one leads from.
    pub fn set_feedback(&mut self, on: bool) {
        self.feedback = on;
    }

    /// Leads the current chord to the pitch classes `root + interval`.
    pub fn lead(&mut self, intervals: &[i32]) -> Result<Voicing, VoicingError> {
        let target: Vec<u8> = intervals
            .iter()
            .map(|i| pitch_class(i32::from(self.root) + i))
            .collect();
        let voicing = voice_lead(&self.current, &target)?;
        log::debug!(
            "Led {:?} to {:?} (cost {})",
            self.current,
            voicing.chord,
            voicing.cost
        );

        if self.feedback {
            self.current = voicing.chord.clone();
        }
        Ok(voicing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_wraps_negative() {
        assert_eq!(pitch_class(60), 0);
        assert_eq!(pitch_class(-1), 11);
        assert_eq!(pitch_class(71), 11);
    }

    #[test]
    fn test_interval_path_takes_short_way() {
        assert_eq!(interval_path(0, 4), 4);
        assert_eq!(interval_path(0, 11), -1);
        assert_eq!(interval_path(11, 0), 1);
        assert_eq!(interval_path(0, 6), 6);
        assert_eq!(interval_path(0, 7), -5);
        assert_eq!(interval_path(5, 5), 0);
    }

    #[test]
    fn test_normal_form() {
        assert_eq!(normal_form(&[67, 60, 64]), vec![0, 4, 7]);
        assert_eq!(normal_form(&[62, 65, 69]), vec![0, 3, 7]);
        assert!(normal_form(&[]).is_empty());
    }

    #[test]
    fn test_bijective_c_major_to_a_minor() {
        // C E G -> A C E: only G moves, up two semitones.
        let leading = bijective(&[0, 4, 7], &[9, 0, 4]).unwrap();
        assert_eq!(leading.cost, 2);
        assert!(leading.paths.contains(&VoicePath {
            start: 7,
            motion: 2
        }));
        assert_eq!(
            leading.paths.iter().filter(|p| p.motion == 0).count(),
            2
        );
    }

    #[test]
    fn test_bijective_identity_costs_nothing() {
        let leading = bijective(&[0, 4, 7, 10], &[10, 7, 4, 0]).unwrap();
        assert_eq!(leading.cost, 0);
    }

    #[test]
    fn test_bijective_rejects_bad_sizes() {
        assert_eq!(bijective(&[], &[]), Err(VoicingError::Empty));
        assert_eq!(
            bijective(&[0, 4, 7], &[0, 4]),
            Err(VoicingError::SizeMismatch {
                current: 3,
                target: 2
            })
        );
        assert_eq!(
            bijective(&[0; 9], &[0; 9]),
            Err(VoicingError::TooManyVoices(9))
        );
    }

    #[test]
    fn test_voice_lead_keeps_register_and_order() {
        // G3 C4 E4 to F major: C stays, E -> F, G -> A.
        let voicing = voice_lead(&[55, 60, 64], &[5, 9, 0]).unwrap();
        assert_eq!(voicing.chord, vec![57, 60, 65]);
        assert_eq!(voicing.cost, 3);
        assert_eq!(voicing.bass(), Some(57));
    }

    #[test]
    fn test_voice_lead_with_doubled_pitch_class() {
        let voicing = voice_lead(&[48, 60, 64, 67], &[0, 0, 5, 9]).unwrap();
        assert_eq!(voicing.chord.len(), 4);
        assert_eq!(voicing.cost, 3);
        let mut pcs: Vec<u8> = voicing.chord.iter().map(|p| pitch_class(*p)).collect();
        pcs.sort_unstable();
        assert_eq!(pcs, vec![0, 0, 5, 9]);
    }

    #[test]
    fn test_distance_matrix_pads_missing_voices() {
        let m = distance_matrix(&[60, 64], &[59, 65, 67]);
        assert_eq!(
            m,
            vec![
                vec![1, 5, 7],
                vec![5, 1, 3],
                vec![MISSING_VOICE_COST; 3],
            ]
        );
    }

    #[test]
    fn test_assign_finds_minimum() {
        let costs = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        let assignment = assign(&costs).unwrap();
        assert_eq!(assignment.columns, vec![1, 0, 2]);
        assert_eq!(assignment.cost, 5);
    }

    #[test]
    fn test_assign_rejects_ragged_matrix() {
        let costs = vec![vec![1, 2], vec![3]];
        assert_eq!(
            assign(&costs),
            Err(VoicingError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(assign(&[]), Err(VoicingError::Empty));
    }

    #[test]
    fn test_nearest_voicing_crosses_nothing() {
        let voicing = nearest_voicing(&[60, 64, 67], &[69, 60, 65]).unwrap();
        assert_eq!(voicing.chord, vec![60, 65, 69]);
        assert_eq!(voicing.cost, 3);
    }

    #[test]
    fn test_leader_feeds_back_and_transposes() {
        let mut leader = VoiceLeader::new(vec![60, 64, 67]).unwrap();
        leader.set_root(-3);
        assert_eq!(leader.root(), 9);

        // A minor over the C major voicing.
        let voicing = leader.lead(&[0, 3, 7]).unwrap();
        assert_eq!(voicing.chord, vec![60, 64, 69]);
        assert_eq!(leader.current(), &[60, 64, 69]);

        leader.set_feedback(false);
        leader.set_root(5);
        let voicing = leader.lead(&[0, 4, 7]).unwrap();
        assert_eq!(voicing.chord, vec![60, 65, 69]);
        assert_eq!(leader.current(), &[60, 64, 69]);
    }

    #[test]
    fn test_leader_requires_voices() {
        assert_eq!(VoiceLeader::new(Vec::new()), Err(VoicingError::Empty));
        let mut leader = VoiceLeader::new(vec![60, 64, 67]).unwrap();
        assert!(matches!(
            leader.lead(&[0, 4]),
            Err(VoicingError::SizeMismatch { .. })
        ));
    }
}
