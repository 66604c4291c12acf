use rand::prelude::*;

use crate::*;
pub use grid_fill::*;
pub use matrix_difference::*;
pub use pair_matching::*;

mod grid_fill;
mod matrix_difference;
mod pair_matching;

/// Lays out server payloads into playable puzzle instances.
pub trait PuzzleGenerator {
    fn grid_fill(&mut self, payload: &GridFillPayload, geometry: Geometry)
    -> Result<GridFillLayout>;

    fn matrix_difference(
        &mut self,
        payload: &MatrixDifferencePayload,
        geometry: Geometry,
    ) -> Result<MatrixLayout>;

    fn pair_matching(&mut self, payload: &PairMatchingPayload) -> Result<PairLayout>;
}

/// Generation strategy backed by a seeded small RNG, so a seed fully determines every layout.
#[derive(Clone, Debug)]
pub struct RandomPuzzleGenerator {
    seed: u64,
    rng: SmallRng,
}

impl RandomPuzzleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl PuzzleGenerator for RandomPuzzleGenerator {
    fn grid_fill(
        &mut self,
        payload: &GridFillPayload,
        geometry: Geometry,
    ) -> Result<GridFillLayout> {
        generate_grid_fill(&mut self.rng, payload, geometry)
    }

    fn matrix_difference(
        &mut self,
        payload: &MatrixDifferencePayload,
        geometry: Geometry,
    ) -> Result<MatrixLayout> {
        generate_matrix_difference(&mut self.rng, payload, geometry)
    }

    fn pair_matching(&mut self, payload: &PairMatchingPayload) -> Result<PairLayout> {
        generate_pair_matching(&mut self.rng, payload)
    }
}

/// In-place Fisher-Yates shuffle.
pub(crate) fn shuffle<T>(rng: &mut SmallRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_keeps_every_element() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..32).collect();

        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();

        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_layout() {
        let payload = GridFillPayload {
            target_word: "国泰民安".into(),
        };
        let geometry = Geometry::new(5, 5, 64., 6.);

        let a = RandomPuzzleGenerator::new(42).grid_fill(&payload, geometry).unwrap();
        let b = RandomPuzzleGenerator::new(42).grid_fill(&payload, geometry).unwrap();

        assert_eq!(a, b);
    }
}
