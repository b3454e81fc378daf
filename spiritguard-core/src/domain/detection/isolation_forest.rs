// spiritguard-core/src/domain/detection/isolation_forest.rs
//
// Isolation Forest over a single numeric feature (Liu, Ting & Zhou 2008).
// Scores follow the `score_samples` convention: -2^(-E[h(x)] / c(psi)),
// so lower means more isolated.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use validator::Validate;

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForestParams {
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_n_estimators")]
    pub n_estimators: usize,

    #[validate(range(min = 2))]
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_n_estimators() -> usize {
    100
}
fn default_max_samples() -> usize {
    256
}
fn default_seed() -> u64 {
    42
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: default_n_estimators(),
            max_samples: default_max_samples(),
            seed: default_seed(),
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf { size: usize },
    Split { threshold: f64, left: Box<Node>, right: Box<Node> },
}

#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
}

/// Average path length of an unsuccessful BST search over `n` points, c(n).
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

impl IsolationForest {
    /// Grows `n_estimators` trees, each on a sub-sample drawn without replacement.
    /// Deterministic for a given seed.
    pub fn fit(values: &[f64], params: &ForestParams) -> Self {
        let sample_size = params.max_samples.min(values.len());
        let height_limit = (sample_size.max(2) as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(params.seed);

        let trees = (0..params.n_estimators)
            .map(|_| {
                let sample: Vec<f64> =
                    rand::seq::index::sample(&mut rng, values.len(), sample_size)
                        .iter()
                        .map(|i| values[i])
                        .collect();
                grow(&sample, 0, height_limit, &mut rng)
            })
            .collect();

        Self { trees, sample_size }
    }

    pub fn score_samples(&self, values: &[f64]) -> Vec<f64> {
        let norm = average_path_length(self.sample_size).max(1.0);
        let n_trees = self.trees.len().max(1) as f64;

        values
            .iter()
            .map(|&x| {
                let total: f64 = self.trees.iter().map(|t| path_length(t, x, 0)).sum();
                -(2f64).powf(-(total / n_trees) / norm)
            })
            .collect()
    }
}

fn grow(sample: &[f64], depth: usize, height_limit: usize, rng: &mut StdRng) -> Node {
    if depth >= height_limit || sample.len() <= 1 {
        return Node::Leaf { size: sample.len() };
    }

    let (min, max) = sample
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if max <= min {
        // Every point identical: nothing left to isolate
        return Node::Leaf { size: sample.len() };
    }

    let threshold = rng.gen_range(min..max);
    let (left, right): (Vec<f64>, Vec<f64>) = sample.iter().copied().partition(|&v| v <= threshold);

    Node::Split {
        threshold,
        left: Box::new(grow(&left, depth + 1, height_limit, rng)),
        right: Box::new(grow(&right, depth + 1, height_limit, rng)),
    }
}

fn path_length(node: &Node, x: f64, depth: usize) -> f64 {
    match node {
        Node::Leaf { size } => depth as f64 + average_path_length(*size),
        Node::Split {
            threshold,
            left,
            right,
        } => {
            if x <= *threshold {
                path_length(left, x, depth + 1)
            } else {
                path_length(right, x, depth + 1)
            }
        }
    }
}

/// Linear-interpolated percentile (`q` in 0..=100), the numpy default.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        let c256 = average_path_length(256);
        assert!((c256 - 10.2447).abs() < 1e-3, "c(256) = {}", c256);
    }

    #[test]
    fn test_isolated_point_scores_lowest() {
        let values = [0.1, -0.2, 0.0, 0.15, -0.1, 0.05, 8.0, -0.05];
        let forest = IsolationForest::fit(&values, &ForestParams::default());
        let scores = forest.score_samples(&values);

        let (argmin, _) = scores
            .iter()
            .enumerate()
            .fold((0, f64::INFINITY), |(bi, bs), (i, &s)| {
                if s < bs { (i, s) } else { (bi, bs) }
            });
        assert_eq!(argmin, 6);
        assert!(scores.iter().all(|s| (-1.0..0.0).contains(s)));
    }

    #[test]
    fn test_fit_is_deterministic_for_a_seed() {
        let values = [1.0, 2.0, 3.0, 4.0, 50.0];
        let params = ForestParams::default();
        let a = IsolationForest::fit(&values, &params).score_samples(&values);
        let b = IsolationForest::fit(&values, &params).score_samples(&values);
        assert_eq!(a, b);
    }

    #[test]
    fn test_constant_feature_scores_uniformly() {
        let values = [3.0; 6];
        let scores = IsolationForest::fit(&values, &ForestParams::default()).score_samples(&values);
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_percentile_interpolates() {
        let v = [4.0, 1.0, 3.0, 2.0, 5.0];
        assert_eq!(percentile(&v, 0.0), 1.0);
        assert_eq!(percentile(&v, 50.0), 3.0);
        assert!((percentile(&v, 10.0) - 1.4).abs() < 1e-12);
        assert_eq!(percentile(&v, 100.0), 5.0);
    }
}
