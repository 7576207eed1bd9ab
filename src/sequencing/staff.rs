use std::fmt;

use super::duration::Duration;
use super::note::Note;
use super::pitch::Pitch;

/// One line of a score: an ordered list of time groups.
///
/// Every note in a group starts at the same time. The next group starts once
/// the longest note of the current one has finished, so a group holding a
/// single note is a melody step and a group holding several is a chord.
///
/// ```
/// use tonestream::sequencing::{pitch::*, Duration, Staff};
///
/// let staff = Staff::new()
///     .note(C4, Duration::QUARTER)
///     .rest(Duration::EIGHTH)
///     .chord(&[C4, E4, G4], Duration::HALF);
/// assert_eq!(staff.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Staff {
    groups: Vec<Vec<Note>>,
}

impl Staff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single pitched note.
    pub fn note(self, pitch: Pitch, duration: Duration) -> Self {
        self.group(vec![Note::new(pitch, duration)])
    }

    /// Append a rest.
    pub fn rest(self, duration: Duration) -> Self {
        self.group(vec![Note::rest(duration)])
    }

    /// Append several pitches sounding together for the same duration.
    pub fn chord(self, pitches: &[Pitch], duration: Duration) -> Self {
        self.group(pitches.iter().map(|&p| Note::new(p, duration)).collect())
    }

    /// Append an arbitrary group of simultaneous notes.
    pub fn group(mut self, notes: Vec<Note>) -> Self {
        self.groups.push(notes);
        self
    }

    pub fn groups(&self) -> &[Vec<Note>] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total musical length: the sum of each group's longest note.
    pub fn duration(&self) -> Duration {
        self.groups
            .iter()
            .filter_map(|group| {
                group
                    .iter()
                    .map(|n| n.duration)
                    .max_by(|a, b| a.as_f64().total_cmp(&b.as_f64()))
            })
            .fold(
                Duration {
                    numerator: 0,
                    denominator: 1,
                },
                Duration::add,
            )
    }
}

impl From<Vec<Vec<Note>>> for Staff {
    fn from(groups: Vec<Vec<Note>>) -> Self {
        Self { groups }
    }
}

impl fmt::Display for Staff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            for (j, note) in group.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{note}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::pitch::{C4, E4, G4};

    #[test]
    fn builder_appends_groups_in_order() {
        let staff = Staff::new()
            .note(C4, Duration::QUARTER)
            .rest(Duration::EIGHTH)
            .chord(&[C4, E4, G4], Duration::HALF);

        let groups = staff.groups();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], vec![Note::new(C4, Duration::QUARTER)]);
        assert!(groups[1][0].is_rest());
        assert_eq!(groups[2].len(), 3);
        assert!(groups[2].iter().all(|n| n.duration == Duration::HALF));
    }

    #[test]
    fn duration_sums_the_longest_note_per_group() {
        let staff = Staff::new()
            .note(C4, Duration::QUARTER)
            .group(vec![
                Note::new(E4, Duration::EIGHTH),
                Note::new(G4, Duration::HALF),
            ]);
        assert_eq!(
            staff.duration(),
            Duration {
                numerator: 3,
                denominator: 4
            }
        );
        assert_eq!(Staff::new().duration().numerator, 0);
    }

    #[test]
    fn display_lists_groups() {
        let staff = Staff::new()
            .note(C4, Duration::QUARTER)
            .chord(&[E4, G4], Duration::EIGHTH);
        assert_eq!(staff.to_string(), "♩ C4 | ♪ E4, ♪ G4");
    }
}
