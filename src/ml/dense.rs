//! Dense neural network inference (CPU-only).
//!
//! Small MLPs loaded from JSON. The last layer decides how the output is
//! read: one sigmoid unit gives the positive-class probability, two softmax
//! units give both class probabilities.
//!
//! Shapes are validated up front so a bad artifact fails at load time and the
//! caller can fall back.

use serde::{Deserialize, Serialize};

use crate::error::{CardioError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    #[default]
    Linear,
    Relu,
    Tanh,
    Sigmoid,
    /// Applied across the whole layer output, not per unit.
    Softmax,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseLayer {
    /// Weights shape: [out_dim][in_dim]
    pub weights: Vec<Vec<f64>>,
    /// Bias shape: [out_dim]
    pub bias: Vec<f64>,
    #[serde(default)]
    pub activation: Activation,
}

impl DenseLayer {
    fn in_dim(&self) -> usize {
        self.weights.first().map(|r| r.len()).unwrap_or(0)
    }

    fn out_dim(&self) -> usize {
        self.weights.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseNetwork {
    /// Expected input dimension.
    pub input_dim: usize,

    /// Optional z-score normalization.
    #[serde(default)]
    pub input_mean: Option<Vec<f64>>,
    #[serde(default)]
    pub input_std: Option<Vec<f64>>,

    pub layers: Vec<DenseLayer>,
}

impl DenseNetwork {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input_dim == 0 {
            return Err("input_dim must be > 0".to_string());
        }
        if self.layers.is_empty() {
            return Err("layers must not be empty".to_string());
        }
        if let (Some(mean), Some(std)) = (&self.input_mean, &self.input_std) {
            if mean.len() != self.input_dim {
                return Err(format!(
                    "input_mean length {} != input_dim {}",
                    mean.len(),
                    self.input_dim
                ));
            }
            if std.len() != self.input_dim {
                return Err(format!(
                    "input_std length {} != input_dim {}",
                    std.len(),
                    self.input_dim
                ));
            }
            if std.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                return Err("input_std must be finite and > 0".to_string());
            }
        } else if self.input_mean.is_some() || self.input_std.is_some() {
            return Err("input_mean and input_std must be provided together".to_string());
        }

        let mut expected_in = self.input_dim;
        for (idx, layer) in self.layers.iter().enumerate() {
            if layer.out_dim() == 0 {
                return Err(format!("layer[{idx}] out_dim must be > 0"));
            }
            if layer.bias.len() != layer.out_dim() {
                return Err(format!(
                    "layer[{idx}] bias len {} != out_dim {}",
                    layer.bias.len(),
                    layer.out_dim()
                ));
            }
            for (r, row) in layer.weights.iter().enumerate() {
                if row.len() != expected_in {
                    return Err(format!(
                        "layer[{idx}] weights row {r} len {} != expected in_dim {expected_in}",
                        row.len()
                    ));
                }
                if row.iter().any(|v| !v.is_finite()) {
                    return Err(format!("layer[{idx}] weights contain non-finite values"));
                }
            }
            if layer.bias.iter().any(|v| !v.is_finite()) {
                return Err(format!("layer[{idx}] bias contain non-finite values"));
            }
            expected_in = layer.out_dim();
        }
        Ok(())
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map(|l| l.out_dim()).unwrap_or(0)
    }

    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_dim {
            return Err(CardioError::Validation(format!(
                "DenseNetwork input dim mismatch: got {}, expected {}",
                input.len(),
                self.input_dim
            )));
        }

        let mut x: Vec<f64> = input.to_vec();

        if let (Some(mean), Some(std)) = (&self.input_mean, &self.input_std) {
            for i in 0..x.len() {
                let denom = std[i].max(1e-12);
                x[i] = (x[i] - mean[i]) / denom;
            }
        }

        for layer in &self.layers {
            let mut y: Vec<f64> = layer
                .weights
                .iter()
                .zip(&layer.bias)
                .map(|(row, bias)| {
                    debug_assert_eq!(row.len(), layer.in_dim());
                    bias + row.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>()
                })
                .collect();

            if layer.activation == Activation::Softmax {
                softmax_in_place(&mut y);
            } else {
                for v in y.iter_mut() {
                    *v = apply_activation(*v, layer.activation);
                }
            }
            x = y;
        }

        Ok(x)
    }
}

fn apply_activation(x: f64, act: Activation) -> f64 {
    match act {
        Activation::Linear | Activation::Softmax => x,
        Activation::Relu => x.max(0.0),
        Activation::Tanh => x.tanh(),
        Activation::Sigmoid => sigmoid(x),
    }
}

fn sigmoid(x: f64) -> f64 {
    // Numerically-stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_layer(weights: Vec<Vec<f64>>, bias: Vec<f64>, activation: Activation) -> DenseNetwork {
        DenseNetwork {
            input_dim: weights[0].len(),
            input_mean: None,
            input_std: None,
            layers: vec![DenseLayer {
                weights,
                bias,
                activation,
            }],
        }
    }

    #[test]
    fn forward_sigmoid() {
        let net = single_layer(vec![vec![1.0, 2.0]], vec![0.0], Activation::Sigmoid);
        net.validate().unwrap();

        let p0 = net.forward(&[0.0, 0.0]).unwrap();
        assert!((p0[0] - 0.5).abs() < 1e-12);

        let p1 = net.forward(&[1.0, 0.0]).unwrap();
        assert!(p1[0] > 0.5);
    }

    #[test]
    fn forward_softmax_sums_to_one() {
        let net = single_layer(
            vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            vec![0.0, 0.0],
            Activation::Softmax,
        );
        let out = net.forward(&[2.0, 0.5]).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(out[0] > out[1]);
    }

    #[test]
    fn applies_zscore_before_layers() {
        let mut net = single_layer(vec![vec![1.0]], vec![0.0], Activation::Linear);
        net.input_mean = Some(vec![10.0]);
        net.input_std = Some(vec![2.0]);
        net.validate().unwrap();
        assert_eq!(net.forward(&[14.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn validates_shapes() {
        let mut bad = single_layer(vec![vec![1.0, 2.0]], vec![0.0], Activation::Linear);
        bad.input_dim = 3; // in_dim mismatch
        assert!(bad.validate().is_err());
    }

    #[test]
    fn rejects_wrong_input_len() {
        let net = single_layer(vec![vec![1.0, 2.0]], vec![0.0], Activation::Linear);
        assert!(net.forward(&[1.0]).is_err());
    }
}
