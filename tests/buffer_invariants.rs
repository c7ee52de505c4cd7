// ==============================================
// CROSS-POLICY BUFFER INVARIANT TESTS (integration)
// ==============================================
//
// Behavioral properties that span the storage core, the statistics cache and
// the shared handle. Each randomized run drives a real buffer and a plain
// Vec-based oracle through the same operation sequence and requires the
// observable state to stay identical.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use samplekit::prelude::*;

// ==============================================
// Oracle model
// ==============================================

/// Reference model: a linear Vec with the policy rules applied literally.
struct ModelBuffer {
    data: Vec<f64>,
    cap: usize,
    policy: RetentionPolicy,
}

impl ModelBuffer {
    fn new(cap: usize, policy: RetentionPolicy) -> Self {
        Self {
            data: Vec::new(),
            cap,
            policy,
        }
    }

    fn push(&mut self, v: f64) {
        match self.policy {
            RetentionPolicy::Open => {
                self.data.push(v);
                self.cap = self.cap.max(self.data.len());
            },
            RetentionPolicy::Fixed => {
                if self.data.len() < self.cap {
                    self.data.push(v);
                }
            },
            RetentionPolicy::Circular => {
                if self.cap == 0 {
                    return;
                }
                self.data.push(v);
                if self.data.len() > self.cap {
                    self.data.remove(0);
                }
            },
        }
    }

    fn set_capacity(&mut self, c: usize) {
        match self.policy {
            RetentionPolicy::Open | RetentionPolicy::Fixed => {
                self.data.truncate(c);
            },
            RetentionPolicy::Circular => {
                if self.data.len() > c {
                    self.data.drain(..self.data.len() - c);
                }
            },
        }
        self.cap = c;
    }

    fn clear(&mut self) {
        self.data.clear();
    }
}

fn assert_matches_model(buf: &SampleBuffer, model: &ModelBuffer, step: usize) {
    assert_eq!(buf.len(), model.data.len(), "len diverged at step {step}");
    assert!(
        buf.len() <= buf.capacity(),
        "len {} exceeds capacity {} at step {step}",
        buf.len(),
        buf.capacity()
    );
    assert_eq!(buf.to_vec(), model.data, "contents diverged at step {step}");
    buf.with_contiguous(|view| {
        assert_eq!(view, model.data.as_slice(), "contiguous view diverged at step {step}");
    });
}

fn random_ops_match_oracle(policy: RetentionPolicy, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let cap = rng.gen_range(0..16);

    let buf = SampleBuffer::with_policy(cap, policy);
    let mut model = ModelBuffer::new(cap, policy);
    let mut next = 0.0f64;

    for step in 0..2000 {
        match rng.gen_range(0..100) {
            0..=59 => {
                buf.push(next);
                model.push(next);
                next += 1.0;
            },
            60..=79 => {
                let chunk: Vec<f64> = (0..rng.gen_range(0..24))
                    .map(|_| {
                        next += 1.0;
                        next
                    })
                    .collect();
                buf.push_batch(&chunk);
                for &v in &chunk {
                    model.push(v);
                }
            },
            80..=89 => {
                // Interleave reads so linearization happens mid-sequence.
                if !model.data.is_empty() {
                    let i = rng.gen_range(0..model.data.len());
                    assert_eq!(buf.get(i), Ok(model.data[i]), "get({i}) diverged at step {step}");
                }
                assert!(buf.get(model.data.len()).is_err());
            },
            90..=95 => {
                let c = rng.gen_range(0..16);
                buf.set_capacity(c);
                model.set_capacity(c);
            },
            _ => {
                buf.clear();
                model.clear();
            },
        }
        assert_matches_model(&buf, &model, step);
    }
}

#[test]
fn open_policy_matches_oracle() {
    for seed in 0..8 {
        random_ops_match_oracle(RetentionPolicy::Open, seed);
    }
}

#[test]
fn fixed_policy_matches_oracle() {
    for seed in 0..8 {
        random_ops_match_oracle(RetentionPolicy::Fixed, 100 + seed);
    }
}

#[test]
fn circular_policy_matches_oracle() {
    for seed in 0..8 {
        random_ops_match_oracle(RetentionPolicy::Circular, 200 + seed);
    }
}

#[test]
fn policy_changes_preserve_contents() {
    let mut rng = StdRng::seed_from_u64(42);
    let policies = [
        RetentionPolicy::Open,
        RetentionPolicy::Fixed,
        RetentionPolicy::Circular,
    ];

    let buf = SampleBuffer::with_policy(8, RetentionPolicy::Circular);
    buf.push_batch(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

    for _ in 0..50 {
        let before = buf.to_vec();
        let policy = policies[rng.gen_range(0..policies.len())];
        buf.set_policy(policy);
        assert_eq!(buf.to_vec(), before, "set_policy({policy}) changed contents");
        assert!(buf.len() <= buf.capacity());
    }
}

// ==============================================
// Spec'd policy semantics
// ==============================================

#[test]
fn open_policy_retains_every_push() {
    let buf = SampleBuffer::with_policy(0, RetentionPolicy::Open);
    for i in 0..1000 {
        buf.push(i as f64);
    }
    assert_eq!(buf.len(), 1000);
    assert_eq!(buf.get(999), Ok(999.0));
}

#[test]
fn fixed_window_of_two_drops_third_push() {
    let buf = SampleBuffer::new(2);
    buf.push(10.0);
    buf.push(20.0);
    buf.push(30.0);
    assert_eq!(buf.to_vec(), vec![10.0, 20.0]);
}

#[test]
fn circular_window_of_three_keeps_newest() {
    let buf = SampleBuffer::with_policy(3, RetentionPolicy::Circular);
    for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
        buf.push(v);
    }
    assert_eq!(buf.to_vec(), vec![3.0, 4.0, 5.0]);
    assert_eq!(buf.min(), 3.0);
    assert_eq!(buf.max(), 5.0);
    assert_eq!(buf.mean(), 4.0);
}

// ==============================================
// Aliasing and detachment
// ==============================================

#[test]
fn aliased_handles_observe_mutations_until_detach() {
    let a = SampleBuffer::with_policy(8, RetentionPolicy::Circular);
    let b = a.clone();

    b.push(1.0);
    assert_eq!(a.to_vec(), vec![1.0]); // aliased: A sees B's push

    let c = a.detach();
    a.push(2.0);
    assert_eq!(b.to_vec(), vec![1.0, 2.0]); // still aliased with A
    assert_eq!(c.to_vec(), vec![1.0]); // detached copy unaffected
}

// ==============================================
// Statistics vs. direct recomputation
// ==============================================

#[test]
fn statistics_match_direct_recomputation() {
    let mut rng = StdRng::seed_from_u64(7);
    let normal = Normal::new(5.0, 2.5).unwrap();

    let buf = SampleBuffer::with_policy(256, RetentionPolicy::Circular);
    for _ in 0..1000 {
        buf.push(normal.sample(&mut rng));

        let contents = buf.to_vec();
        let n = contents.len() as f64;
        let mean = contents.iter().sum::<f64>() / n;
        let var = contents.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        assert!((buf.mean() - mean).abs() < 1e-9, "mean drifted from oracle");
        assert!((buf.std() - var.sqrt()).abs() < 1e-9, "std drifted from oracle");
        assert!(buf.std() >= 0.0);

        let direct_min = contents.iter().cloned().fold(f64::INFINITY, f64::min);
        let direct_max = contents.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(buf.min(), direct_min);
        assert_eq!(buf.max(), direct_max);
    }
}

// ==============================================
// Persistence round-trip
// ==============================================

#[test]
fn bulk_replace_of_contiguous_view_round_trips() {
    let original = SampleBuffer::with_policy(5, RetentionPolicy::Circular);
    original.push_batch(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);

    let restored = SampleBuffer::with_policy(5, RetentionPolicy::Circular);
    original.with_contiguous(|view| restored.replace(view));

    assert_eq!(original, restored);
    assert_eq!(restored.to_vec(), vec![4.0, 5.0, 6.0, 7.0, 8.0]);

    // The restored buffer keeps circular semantics over its new contents.
    restored.push(9.0);
    assert_eq!(restored.to_vec(), vec![5.0, 6.0, 7.0, 8.0, 9.0]);
}
