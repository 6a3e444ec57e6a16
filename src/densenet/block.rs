use crate::densenet::{DenseLayer, DenseLayerConfig, Transition, TransitionConfig};
use crate::mpusim::MpuSimScope;
use burn::prelude::*;

/// A run of dense layers, compressed by a transition unless the block is the
/// last of the network.
#[derive(Module, Debug)]
pub struct DenseBlock<B: Backend> {
    pub layers: Vec<DenseLayer<B>>,
    pub transition: Option<Transition<B>>,
}

#[derive(Config, Debug)]
pub struct DenseBlockConfig {
    pub in_channels: usize,

    pub num_layers: usize,

    #[config(default = 32)]
    pub growth_rate: usize,

    #[config(default = 0.5)]
    pub reduction: f64,

    /// The last block keeps its channels; every other block ends in a
    /// transition.
    #[config(default = false)]
    pub last: bool,
}

impl DenseBlockConfig {
    pub fn out_channels(&self) -> usize {
        let grown = self.in_channels + self.num_layers * self.growth_rate;
        if self.last {
            grown
        } else {
            TransitionConfig::new(grown)
                .with_reduction(self.reduction)
                .out_channels()
        }
    }

    /// Returns the initialized block; `name` prefixes its operator names in
    /// the statistics log.
    pub fn init<B: Backend>(
        &self,
        name: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> DenseBlock<B> {
        let mut layers = Vec::with_capacity(self.num_layers);
        let mut channels = self.in_channels;
        for i in 0..self.num_layers {
            let config = DenseLayerConfig::new(channels).with_growth_rate(self.growth_rate);
            channels = config.out_channels();
            layers.push(config.init(&format!("{name}/dense_layer.{i}"), scope, device));
        }

        let transition = (!self.last).then(|| {
            TransitionConfig::new(channels)
                .with_reduction(self.reduction)
                .init(&format!("{name}/transition"), scope, device)
        });

        DenseBlock { layers, transition }
    }
}

impl<B: Backend> DenseBlock<B> {
    /// # Shapes
    ///   - Input [batch, in_channels, height, width]
    ///   - Output [batch, out_channels, height_out, width_out]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let mut x = input;
        for layer in self.layers.iter() {
            x = layer.forward(x);
        }

        match &self.transition {
            Some(transition) => transition.forward(x),
            None => x,
        }
    }
}
