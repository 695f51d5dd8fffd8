//! Perturbation added to every leaf evaluation.

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NoiseModel {
    Off,
    /// A fresh uniform draw in `[-range, range]` from the engine's stream at
    /// every leaf visit, so the same line can score differently twice.
    Uniform { range: f64 },
    /// A value in `[-range, range]` derived from the leaf's position key.
    /// Identical leaves always get identical noise and no stream draws are
    /// consumed, whatever order or number of times they are visited.
    Keyed { range: f64, seed: u64 },
}

impl NoiseModel {
    pub fn uniform(range: f64) -> Self {
        if range > 0.0 {
            NoiseModel::Uniform { range }
        } else {
            NoiseModel::Off
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, key: u64, rng: &mut R) -> f64 {
        match *self {
            NoiseModel::Off => 0.0,
            NoiseModel::Uniform { range } if range > 0.0 => rng.gen_range(-range..=range),
            NoiseModel::Uniform { .. } => 0.0,
            NoiseModel::Keyed { range, seed } => {
                let unit = (splitmix64(key ^ seed) >> 11) as f64 / (1u64 << 53) as f64;
                (unit * 2.0 - 1.0) * range
            }
        }
    }
}

impl Default for NoiseModel {
    fn default() -> Self {
        NoiseModel::Uniform { range: 5.0 }
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = NoiseModel::uniform(5.0);
        let samples: Vec<f64> = (0..5_000).map(|_| noise.sample(0, &mut rng)).collect();
        assert!(samples.iter().all(|s| (-5.0..=5.0).contains(s)));
        assert!(samples.iter().any(|&s| s < -4.0));
        assert!(samples.iter().any(|&s| s > 4.0));
    }

    #[test]
    fn test_zero_range_is_off() {
        assert_eq!(NoiseModel::uniform(0.0), NoiseModel::Off);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(NoiseModel::Off.sample(42, &mut rng), 0.0);
    }

    #[test]
    fn test_keyed_is_a_function_of_the_key() {
        let noise = NoiseModel::Keyed {
            range: 5.0,
            seed: 9,
        };
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let x = noise.sample(1234, &mut a);
        assert_eq!(x, noise.sample(1234, &mut b));
        assert!((-5.0..=5.0).contains(&x));
        assert_ne!(x, noise.sample(1235, &mut a));
    }
}
