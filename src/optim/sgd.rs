/// How a backward step turns a gradient signal into a parameter change.
///
/// `signal` is `delta[i]` for a bias and `prev.data[j] * delta[i]` for a
/// weight; `step` is the learning rate passed to `Network::backward_with`.
pub trait UpdateRule {
    fn apply(&self, param: &mut f32, signal: f32, step: f32);
}

/// Plain fixed-rate gradient descent: `param += signal * step`.
///
/// The sign is positive because deltas are computed as
/// `target - output`, already pointing downhill.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgd;

impl Sgd {
    pub fn new() -> Sgd {
        Sgd
    }
}

impl UpdateRule for Sgd {
    fn apply(&self, param: &mut f32, signal: f32, step: f32) {
        *param += signal * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_scaled_signal() {
        let mut p = 1.0;
        Sgd::new().apply(&mut p, 0.5, 0.25);
        assert_eq!(p, 1.125);
    }
}
