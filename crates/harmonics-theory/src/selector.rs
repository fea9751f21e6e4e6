//! Random note selection and fifth-above harmonic derivation.

use serde::Serialize;

use crate::error::{TheoryError, TheoryResult};
use crate::pitch::Pitch;
use crate::rng::IndexSource;
use crate::scale::SCALE_DEGREES;

/// Maximum number of pitches in a note set.
pub const NOTE_SET_SIZE: usize = 12;

/// Minimum number of selected pitches in a generated note set.
pub const MIN_SELECTED: usize = 1;

/// Maximum number of selected pitches in a generated note set.
pub const MAX_SELECTED: usize = 5;

/// Interval between a selected pitch and its harmonic (a perfect fifth).
pub const HARMONIC_INTERVAL: i32 = 7;

/// Draws `count` pitches from `candidates` without replacement.
///
/// At each draw every remaining candidate is equally likely, as judged by
/// `source`.
///
/// # Errors
/// [`TheoryError::InvalidArgument`] unless `1 <= count <= candidates.len()`.
pub fn select_notes<S: IndexSource + ?Sized>(
    candidates: &[Pitch],
    count: usize,
    source: &mut S,
) -> TheoryResult<Vec<Pitch>> {
    if count < 1 || count > candidates.len() {
        return Err(TheoryError::invalid_arg(
            "count",
            format!("{} is not in 1..={}", count, candidates.len()),
        ));
    }

    let mut remaining = candidates.to_vec();
    let mut selected = Vec::with_capacity(count);
    while selected.len() < count {
        let idx = source.next_index(remaining.len());
        selected.push(remaining.remove(idx));
    }
    Ok(selected)
}

/// Derives `need` harmonics, cycling through `selected` as seeds.
///
/// `harmonics[i]` is `selected[i % selected.len()]` raised by a fifth.
///
/// # Errors
/// - [`TheoryError::InvalidArgument`] if `selected` is empty and `need > 0`.
/// - [`TheoryError::OutOfRange`] if a harmonic would exceed MIDI 127.
pub fn derive_harmonics(selected: &[Pitch], need: usize) -> TheoryResult<Vec<Pitch>> {
    if need == 0 {
        return Ok(Vec::new());
    }
    if selected.is_empty() {
        return Err(TheoryError::invalid_arg(
            "selected",
            "at least one seed pitch is required",
        ));
    }
    (0..need)
        .map(|i| selected[i % selected.len()].transpose(HARMONIC_INTERVAL))
        .collect()
}

/// An ordered set of selected pitches followed by their harmonics.
///
/// Produced wholesale by [`NoteSet::generate`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSet {
    selected: Vec<Pitch>,
    harmonics: Vec<Pitch>,
}

impl NoteSet {
    /// Generates a note set from the degrees of a scale.
    ///
    /// Only the first seven entries of `scale` are candidates. `count`
    /// pitches are selected, then `12 - count` harmonics fill the set.
    ///
    /// # Errors
    /// [`TheoryError::InvalidArgument`] unless `1 <= count <= 5` and the
    /// scale offers at least `count` candidates; [`TheoryError::OutOfRange`]
    /// if a harmonic leaves the MIDI range.
    pub fn generate<S: IndexSource + ?Sized>(
        scale: &[Pitch],
        count: usize,
        source: &mut S,
    ) -> TheoryResult<Self> {
        if !(MIN_SELECTED..=MAX_SELECTED).contains(&count) {
            return Err(TheoryError::invalid_arg(
                "count",
                format!("{} is not in {}..={}", count, MIN_SELECTED, MAX_SELECTED),
            ));
        }
        let candidates = &scale[..scale.len().min(SCALE_DEGREES)];
        let selected = select_notes(candidates, count, source)?;
        let harmonics = derive_harmonics(&selected, NOTE_SET_SIZE - count)?;
        Ok(Self::from_parts(selected, harmonics))
    }

    /// Assembles a note set, truncating the harmonics so the total never
    /// exceeds twelve pitches.
    pub fn from_parts(selected: Vec<Pitch>, mut harmonics: Vec<Pitch>) -> Self {
        harmonics.truncate(NOTE_SET_SIZE.saturating_sub(selected.len()));
        let mut selected = selected;
        selected.truncate(NOTE_SET_SIZE);
        Self {
            selected,
            harmonics,
        }
    }

    /// The randomly selected prefix.
    pub fn selected(&self) -> &[Pitch] {
        &self.selected
    }

    /// The derived harmonic suffix.
    pub fn harmonics(&self) -> &[Pitch] {
        &self.harmonics
    }

    /// All pitches in order: selected, then harmonics.
    pub fn iter(&self) -> impl Iterator<Item = Pitch> + '_ {
        self.selected.iter().chain(self.harmonics.iter()).copied()
    }

    /// All pitches collected into a vector.
    pub fn to_vec(&self) -> Vec<Pitch> {
        self.iter().collect()
    }

    /// Number of pitches.
    pub fn len(&self) -> usize {
        self.selected.len() + self.harmonics.len()
    }

    /// Returns true if the set holds no pitches.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
