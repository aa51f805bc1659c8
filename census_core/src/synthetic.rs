//! Seeded synthetic populations for demos, benches and tests.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::agent::{Traits, TraitValue, AGE_TRAIT};
use crate::ingest::AgentRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticPopulation {
    pub seed: u64,
    pub count: usize,
}

impl SyntheticPopulation {
    pub fn new(seed: u64, count: usize) -> Self {
        Self { seed, count }
    }

    /// Deterministic for a given seed. Income rises and agreeableness falls
    /// with age, with some noise on both.
    pub fn records(&self) -> Vec<AgentRecord> {
        let mut rng = SmallRng::seed_from_u64(self.seed ^ 0x6c3e_51a9);
        (0..self.count)
            .map(|_| {
                let longitude = rng.gen_range(-180.0..180.0);
                let latitude = rng.gen_range(-90.0..90.0);
                let age: u32 = rng.gen_range(0..100);
                let income = (age as f64 * 350.0 + rng.gen_range(0.0..5_000.0)).round();
                let agreeableness =
                    (1.0 - age as f64 / 200.0 + rng.gen_range(-0.1..0.1)).clamp(0.0, 1.0);

                let mut traits = Traits::new();
                traits.insert(AGE_TRAIT.to_string(), TraitValue::Number(age as f64));
                traits.insert("income".to_string(), TraitValue::Number(income));
                traits.insert(
                    "agreeableness".to_string(),
                    TraitValue::Number(agreeableness),
                );
                AgentRecord {
                    longitude,
                    latitude,
                    traits,
                }
            })
            .collect()
    }
}
