//! Identifier allocation for new books.
//!
//! Allocation always runs under the store's write guard, with `taken` holding
//! every live id, so a returned id is unique at the moment it is inserted.

use std::collections::HashSet;

use libris_kernel::settings::{CatalogSettings, IdStrategy};
use rand::Rng;

use super::error::StoreError;
use super::models::BookId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdAllocator {
    /// Monotonic counter; ids are never handed out twice.
    Sequential { next: BookId },
    /// Uniform draws from `[0, upper_bound)`, then a linear scan.
    Random {
        upper_bound: BookId,
        max_attempts: u32,
    },
}

impl IdAllocator {
    pub fn sequential() -> Self {
        Self::Sequential { next: 1 }
    }

    pub fn random(upper_bound: BookId, max_attempts: u32) -> Self {
        Self::Random {
            upper_bound,
            max_attempts,
        }
    }

    pub fn from_settings(settings: &CatalogSettings) -> Self {
        match settings.id_strategy {
            IdStrategy::Sequential => Self::sequential(),
            IdStrategy::Random => Self::random(settings.max_id, settings.max_id_attempts),
        }
    }

    /// Pick an id absent from `taken`.
    pub fn allocate(&mut self, taken: &HashSet<BookId>) -> Result<BookId, StoreError> {
        self.allocate_with(taken, &mut rand::thread_rng())
    }

    pub fn allocate_with<R: Rng>(
        &mut self,
        taken: &HashSet<BookId>,
        rng: &mut R,
    ) -> Result<BookId, StoreError> {
        match self {
            Self::Sequential { next } => loop {
                let candidate = *next;
                *next = next.checked_add(1).ok_or(StoreError::IdSpaceExhausted {
                    upper_bound: BookId::MAX,
                })?;
                if !taken.contains(&candidate) {
                    return Ok(candidate);
                }
            },
            Self::Random {
                upper_bound,
                max_attempts,
            } => draw_free_id(*upper_bound, *max_attempts, taken, rng),
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::sequential()
    }
}

fn draw_free_id<R: Rng>(
    upper_bound: BookId,
    max_attempts: u32,
    taken: &HashSet<BookId>,
    rng: &mut R,
) -> Result<BookId, StoreError> {
    let exhausted = StoreError::IdSpaceExhausted { upper_bound };
    if upper_bound <= 0 {
        return Err(exhausted);
    }

    let in_range = taken
        .iter()
        .filter(|id| (0..upper_bound).contains(*id))
        .count() as i128;
    if in_range >= upper_bound as i128 {
        return Err(exhausted);
    }

    for _ in 0..max_attempts {
        let candidate = rng.gen_range(0..upper_bound);
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }

    // Every draw collided; walk the range once from a random start.
    let start = rng.gen_range(0..upper_bound);
    (0..upper_bound)
        .map(|offset| ((start as i128 + offset as i128) % upper_bound as i128) as BookId)
        .find(|candidate| !taken.contains(candidate))
        .ok_or(exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn sequential_starts_at_one_and_counts_up() {
        let mut allocator = IdAllocator::sequential();
        let taken = HashSet::new();
        assert_eq!(allocator.allocate(&taken).unwrap(), 1);
        assert_eq!(allocator.allocate(&taken).unwrap(), 2);
        assert_eq!(allocator, IdAllocator::Sequential { next: 3 });
    }

    #[test]
    fn sequential_skips_taken_ids() {
        let mut allocator = IdAllocator::sequential();
        let taken = HashSet::from([1, 2]);
        assert_eq!(allocator.allocate(&taken).unwrap(), 3);
    }

    #[test]
    fn sequential_overflow_is_exhaustion() {
        let mut allocator = IdAllocator::Sequential { next: BookId::MAX };
        assert_eq!(
            allocator.allocate(&HashSet::new()),
            Err(StoreError::IdSpaceExhausted {
                upper_bound: BookId::MAX
            })
        );
    }

    #[test]
    fn random_stays_in_range() {
        let mut allocator = IdAllocator::random(10, 4);
        let mut taken = HashSet::new();
        let mut rng = rng();
        for _ in 0..10 {
            let id = allocator.allocate_with(&taken, &mut rng).unwrap();
            assert!((0..10).contains(&id));
            assert!(taken.insert(id), "id {id} handed out twice");
        }
    }

    #[test]
    fn random_scan_finds_last_free_id() {
        let mut allocator = IdAllocator::random(100, 1);
        let taken: HashSet<BookId> = (0..100).filter(|id| *id != 63).collect();
        assert_eq!(allocator.allocate_with(&taken, &mut rng()).unwrap(), 63);
    }

    #[test]
    fn random_fails_closed_when_full() {
        let mut allocator = IdAllocator::random(5, 8);
        let taken: HashSet<BookId> = (0..5).collect();
        assert_eq!(
            allocator.allocate_with(&taken, &mut rng()),
            Err(StoreError::IdSpaceExhausted { upper_bound: 5 })
        );
    }

    #[test]
    fn from_settings_honours_strategy() {
        let settings = CatalogSettings {
            id_strategy: IdStrategy::Random,
            max_id: 250,
            max_id_attempts: 3,
            seed_sample_books: false,
        };
        assert_eq!(
            IdAllocator::from_settings(&settings),
            IdAllocator::random(250, 3)
        );
        assert_eq!(
            IdAllocator::from_settings(&CatalogSettings::default()),
            IdAllocator::sequential()
        );
    }
}
