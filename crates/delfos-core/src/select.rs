use crate::bank::Profile;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("cannot draw {requested} distinct questions from a profile of {available}")]
    InvalidCount { requested: usize, available: usize },
}

/// Draws `count` distinct question ids from `profile`, uniformly and without
/// replacement, by rejection sampling: draw an ordinal, skip it if it was
/// already accepted. Output order is acceptance order. The precondition
/// `1 <= count <= profile.size` bounds the loop; without it a draw larger
/// than the population would retry forever.
pub fn select_question_ids<R: Rng>(
    profile: &Profile,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, SelectError> {
    if count == 0 || count > profile.size {
        return Err(SelectError::InvalidCount {
            requested: count,
            available: profile.size,
        });
    }

    let mut accepted = HashSet::with_capacity(count);
    let mut ids = Vec::with_capacity(count);
    while ids.len() < count {
        let ordinal = rng.gen_range(1..=profile.size);
        if accepted.insert(ordinal) {
            ids.push(profile.question_id(ordinal));
        }
    }
    Ok(ids)
}
