use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Ordinary food variants. The presentation layer picks a model per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Sphere,
    Cube,
    Diamond,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [FoodKind::Sphere, FoodKind::Cube, FoodKind::Diamond];

    /// Segments added to the snake when eaten
    pub fn growth(&self) -> usize {
        match self {
            FoodKind::Sphere => 1,
            FoodKind::Cube => 2,
            FoodKind::Diamond => 3,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            FoodKind::Sphere => 10,
            FoodKind::Cube => 20,
            FoodKind::Diamond => 30,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// The single ordinary food item on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

impl Food {
    pub fn new(cell: Cell, kind: FoodKind) -> Self {
        Self { cell, kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_food_values() {
        assert_eq!((FoodKind::Sphere.growth(), FoodKind::Sphere.score()), (1, 10));
        assert_eq!((FoodKind::Cube.growth(), FoodKind::Cube.score()), (2, 20));
        assert_eq!((FoodKind::Diamond.growth(), FoodKind::Diamond.score()), (3, 30));
    }

    #[test]
    fn test_random_kind_covers_all_variants() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(FoodKind::random(&mut rng));
        }
        assert_eq!(seen.len(), FoodKind::ALL.len());
    }
}
