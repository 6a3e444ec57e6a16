use burn::nn::{BatchNorm, BatchNormConfig};
use burn::prelude::*;
use burn::tensor::activation::relu;

/// Batch normalization followed by a ReLU.
#[derive(Module, Debug)]
pub struct BnRelu<B: Backend> {
    pub bn: BatchNorm<B, 2>,
}

#[derive(Config, Debug)]
pub struct BnReluConfig {
    pub num_features: usize,

    #[config(default = 1e-5)]
    pub epsilon: f64,
}

impl BnReluConfig {
    /// Returns the initialized module.
    pub fn init<B: Backend>(&self, device: &B::Device) -> BnRelu<B> {
        BnRelu {
            bn: BatchNormConfig::new(self.num_features)
                .with_epsilon(self.epsilon)
                .init(device),
        }
    }
}

impl<B: Backend> BnRelu<B> {
    /// # Shapes
    ///   - Input [batch, channels, height, width]
    ///   - Output [batch, channels, height, width]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        relu(self.bn.forward(input))
    }
}
