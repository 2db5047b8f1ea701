use serde::{Serialize, Deserialize};

/// Slope applied to negative inputs by `LeakyReLU`.
pub const LEAKY_RELU_ALPHA: f32 = 0.005;

/// Per-unit nonlinearity of a layer.
///
/// The discriminants are the ordinals written to model files and must not
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Activation {
    None = 0,
    Sigmoid = 1,
    #[serde(rename = "leaky_relu")]
    LeakyReLU = 2,
}

impl Activation {
    /// Element-wise activation of a pre-activation sum.
    pub fn function(&self, x: f32) -> f32 {
        match self {
            Activation::None => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::LeakyReLU => x.max(0.0) + LEAKY_RELU_ALPHA * x.min(0.0),
        }
    }

    /// Derivative expressed in terms of the *activated* value `a = f(x)`.
    ///
    /// The backward pass only keeps activated outputs, so callers must pass
    /// `a`, never the raw sum.
    ///
    /// Two variants keep the engine's historical shortcuts: `None` returns
    /// `a` itself rather than 1, and `LeakyReLU` returns the constant
    /// `LEAKY_RELU_ALPHA` regardless of the sign of the input. Trained model
    /// files depend on these, so they are not corrected here.
    pub fn derivative(&self, a: f32) -> f32 {
        match self {
            Activation::None => a,
            Activation::Sigmoid => a * (1.0 - a),
            Activation::LeakyReLU => LEAKY_RELU_ALPHA,
        }
    }

    pub fn ordinal(&self) -> i32 {
        *self as i32
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Activation> {
        match ordinal {
            0 => Some(Activation::None),
            1 => Some(Activation::Sigmoid),
            2 => Some(Activation::LeakyReLU),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_identity() {
        assert_eq!(Activation::None.function(-3.5), -3.5);
        assert_eq!(Activation::None.function(2.0), 2.0);
    }

    #[test]
    fn sigmoid_values() {
        assert_eq!(Activation::Sigmoid.function(0.0), 0.5);
        assert!(Activation::Sigmoid.function(10.0) > 0.99);
        assert!(Activation::Sigmoid.function(-10.0) < 0.01);
    }

    #[test]
    fn leaky_relu_values() {
        assert_eq!(Activation::LeakyReLU.function(3.0), 3.0);
        assert!((Activation::LeakyReLU.function(-2.0) - (-0.01)).abs() < 1e-7);
        assert_eq!(Activation::LeakyReLU.function(0.0), 0.0);
    }

    #[test]
    fn sigmoid_derivative_uses_activated_value() {
        assert_eq!(Activation::Sigmoid.derivative(0.5), 0.25);
        assert_eq!(Activation::Sigmoid.derivative(1.0), 0.0);
    }

    // Historical shortcuts, kept for compatibility with trained models.
    #[test]
    fn none_derivative_returns_its_argument() {
        assert_eq!(Activation::None.derivative(0.7), 0.7);
    }

    #[test]
    fn leaky_relu_derivative_is_constant_slope() {
        assert_eq!(Activation::LeakyReLU.derivative(5.0), LEAKY_RELU_ALPHA);
        assert_eq!(Activation::LeakyReLU.derivative(-5.0), LEAKY_RELU_ALPHA);
    }

    #[test]
    fn ordinals_match_file_format() {
        for act in [Activation::None, Activation::Sigmoid, Activation::LeakyReLU] {
            assert_eq!(Activation::from_ordinal(act.ordinal()), Some(act));
        }
        assert_eq!(Activation::LeakyReLU.ordinal(), 2);
        assert_eq!(Activation::from_ordinal(3), None);
        assert_eq!(Activation::from_ordinal(-1), None);
    }
}
