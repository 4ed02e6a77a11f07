use alloc::vec::Vec;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of a single pick, so the view layer knows whether anything changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    NoChange,
    Selected,
    Swapped,
    Solved,
}

impl PickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The whole mutable state of one puzzle session.
///
/// `arrangement[slot]` holds the original tile index currently shown in
/// `slot`; it is a permutation of `0..tile_count` at all times. `pick` is the
/// only mutator. Once `solved` flips to true the state is frozen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PuzzleState {
    config: PuzzleConfig,
    arrangement: Vec<TileIndex>,
    selected: Option<SlotIndex>,
    solved: bool,
}

impl PuzzleState {
    /// Starts a session with a uniformly shuffled deal. A deal that happens to
    /// come out as the identity permutation is reported solved immediately.
    pub fn shuffled(config: PuzzleConfig, rng: &mut impl Rng) -> Self {
        let arrangement = shuffled_arrangement(config, rng);
        Self::from_parts(config, arrangement)
    }

    /// Seeded variant of [`PuzzleState::shuffled`] for reproducible deals.
    pub fn from_seed(config: PuzzleConfig, seed: u64) -> Self {
        log::trace!("dealing {} tiles with seed {seed}", config.tile_count());
        Self::shuffled(config, &mut SmallRng::seed_from_u64(seed))
    }

    /// Restores a session from a stored arrangement, e.g. a local snapshot.
    pub fn from_arrangement(config: PuzzleConfig, arrangement: Vec<TileIndex>) -> Result<Self> {
        if arrangement.len() != config.tile_count() as usize {
            return Err(PuzzleError::InvalidArrangement);
        }
        let mut seen = [false; TileIndex::MAX as usize + 1];
        for &tile in &arrangement {
            if tile >= config.tile_count() || seen[tile as usize] {
                return Err(PuzzleError::InvalidArrangement);
            }
            seen[tile as usize] = true;
        }
        Ok(Self::from_parts(config, arrangement))
    }

    fn from_parts(config: PuzzleConfig, arrangement: Vec<TileIndex>) -> Self {
        let solved = is_identity(&arrangement);
        Self {
            config,
            arrangement,
            selected: None,
            solved,
        }
    }

    pub fn config(&self) -> PuzzleConfig {
        self.config
    }

    pub fn arrangement(&self) -> &[TileIndex] {
        &self.arrangement
    }

    pub fn tile_at(&self, slot: SlotIndex) -> Result<TileIndex> {
        let slot = self.config.validate_slot(slot)?;
        Ok(self.arrangement[slot as usize])
    }

    pub fn selected(&self) -> Option<SlotIndex> {
        self.selected
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Applies one tap of the tap-tap-swap interaction model.
    ///
    /// The first pick selects a slot; the second swaps the selected slot with
    /// the picked one (a self-swap is legal and leaves the arrangement as it
    /// was), clears the selection and re-derives `solved`. Picking on a solved
    /// puzzle is a no-op. An out-of-range slot is a caller bug and fails with
    /// [`PuzzleError::InvalidSlot`].
    pub fn pick(&mut self, slot: SlotIndex) -> Result<PickOutcome> {
        let slot = self.config.validate_slot(slot)?;

        if self.solved {
            return Ok(PickOutcome::NoChange);
        }

        match self.selected.take() {
            None => {
                self.selected = Some(slot);
                Ok(PickOutcome::Selected)
            }
            Some(first) => {
                self.arrangement.swap(first as usize, slot as usize);
                self.solved = is_identity(&self.arrangement);
                if self.solved {
                    Ok(PickOutcome::Solved)
                } else {
                    Ok(PickOutcome::Swapped)
                }
            }
        }
    }
}

fn is_identity(arrangement: &[TileIndex]) -> bool {
    arrangement
        .iter()
        .enumerate()
        .all(|(slot, &tile)| slot == tile as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn state_from(arrangement: Vec<TileIndex>) -> PuzzleState {
        PuzzleState::from_arrangement(PuzzleConfig::default(), arrangement).unwrap()
    }

    #[test]
    fn identity_deal_is_solved_before_any_pick() {
        let state = state_from((0..9).collect());
        assert!(state.is_solved());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn first_pick_selects_without_swapping() {
        let mut state = state_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let before = state.arrangement().to_vec();

        assert_eq!(state.pick(3), Ok(PickOutcome::Selected));
        assert_eq!(state.selected(), Some(3));
        assert_eq!(state.arrangement(), before);
    }

    #[test]
    fn double_tap_on_one_slot_is_a_self_swap_no_op() {
        let mut state = state_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);
        let before = state.arrangement().to_vec();

        assert_eq!(state.pick(4), Ok(PickOutcome::Selected));
        assert_eq!(state.pick(4), Ok(PickOutcome::Swapped));
        assert_eq!(state.selected(), None);
        assert_eq!(state.arrangement(), before);
    }

    #[test]
    fn two_picks_swap_exactly_the_two_positions() {
        let mut state = state_from(vec![2, 1, 0, 3, 4, 5, 6, 8, 7]);

        assert_eq!(state.pick(0), Ok(PickOutcome::Selected));
        assert_eq!(state.pick(2), Ok(PickOutcome::Swapped));

        assert_eq!(state.arrangement(), &[0, 1, 2, 3, 4, 5, 6, 8, 7]);
        assert_eq!(state.selected(), None);
        assert!(!state.is_solved());
    }

    #[test]
    fn final_swap_flips_to_solved() {
        let mut state = state_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);

        assert_eq!(state.pick(0), Ok(PickOutcome::Selected));
        assert_eq!(state.pick(1), Ok(PickOutcome::Solved));

        assert_eq!(state.arrangement(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(state.is_solved());
    }

    #[test]
    fn solved_puzzle_is_frozen() {
        let mut state = state_from((0..9).collect());
        let before = state.clone();

        assert_eq!(state.pick(0), Ok(PickOutcome::NoChange));
        assert_eq!(state.pick(5), Ok(PickOutcome::NoChange));
        assert_eq!(state, before);
    }

    #[test]
    fn out_of_range_slot_fails_loudly() {
        let mut state = state_from(vec![1, 0, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(state.pick(9), Err(PuzzleError::InvalidSlot));
        assert_eq!(state.pick(TileIndex::MAX), Err(PuzzleError::InvalidSlot));
    }

    #[test]
    fn restore_rejects_non_permutations() {
        let config = PuzzleConfig::default();
        assert_eq!(
            PuzzleState::from_arrangement(config, vec![0, 0, 2, 3, 4, 5, 6, 7, 8]),
            Err(PuzzleError::InvalidArrangement)
        );
        assert_eq!(
            PuzzleState::from_arrangement(config, vec![0, 1, 2]),
            Err(PuzzleError::InvalidArrangement)
        );
        assert_eq!(
            PuzzleState::from_arrangement(config, vec![0, 1, 2, 3, 4, 5, 6, 7, 9]),
            Err(PuzzleError::InvalidArrangement)
        );
    }

    #[test]
    fn seeded_deals_are_reproducible_and_valid() {
        let config = PuzzleConfig::default();
        let a = PuzzleState::from_seed(config, 123);
        let b = PuzzleState::from_seed(config, 123);
        assert_eq!(a, b);

        let mut sorted = a.arrangement().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..9).collect::<Vec<_>>());
    }
}
