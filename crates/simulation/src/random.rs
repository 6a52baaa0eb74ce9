//! Random decisions shared by the rules, the scheduler and the brush.
//!
//! Every tie-break draws fresh at the point of decision. Any `rand::Rng`
//! works as a source: seeded `SmallRng` in production, `StepRng` in tests
//! that need a fixed outcome.

use rand::Rng;

pub trait RandomSource {
    /// Fair coin.
    fn coin(&mut self) -> bool;

    /// Bernoulli trial with success probability `p` in `[0, 1]`.
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform value in `[-span / 2, span / 2)`.
    fn jitter(&mut self, span: f32) -> f32;

    /// Uniform lateral direction over `{-1, +1}`.
    fn direction(&mut self) -> i32 {
        if self.coin() {
            -1
        } else {
            1
        }
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn coin(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p)
    }

    fn jitter(&mut self, span: f32) -> f32 {
        (self.gen::<f32>() - 0.5) * span
    }
}
