use crate::mpusim::{MpuSimConv2d, MpuSimConv2dConfig, MpuSimScope};
use burn::nn::pool::{AvgPool2d, AvgPool2dConfig};
use burn::prelude::*;

/// Compresses the channel count with a 1x1 convolution, then halves the
/// spatial resolution with a 2x2 average pool.
#[derive(Module, Debug)]
pub struct Transition<B: Backend> {
    pub conv: MpuSimConv2d<B>,
    pub pool: AvgPool2d,
}

#[derive(Config, Debug)]
pub struct TransitionConfig {
    pub in_channels: usize,

    #[config(default = 0.5)]
    pub reduction: f64,
}

impl TransitionConfig {
    pub fn out_channels(&self) -> usize {
        (self.in_channels as f64 * self.reduction).floor() as usize
    }

    /// Returns the initialized module; `name` prefixes its operator name in the
    /// statistics log.
    pub fn init<B: Backend>(
        &self,
        name: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> Transition<B> {
        Transition {
            conv: MpuSimConv2dConfig::new([self.in_channels, self.out_channels()], [1, 1])
                .init(&format!("{name}/conv1"), scope, device),
            pool: AvgPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
        }
    }
}

impl<B: Backend> Transition<B> {
    /// # Shapes
    ///   - Input [batch, in_channels, height, width]
    ///   - Output [batch, floor(in_channels * reduction), height / 2, width / 2]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, _, height, width] = input.dims();

        let x = self.conv.forward(input);
        let out = self.pool.forward(x);

        let [out_batch, _, out_height, out_width] = out.dims();
        debug_assert_eq!([batch, height / 2, width / 2], [out_batch, out_height, out_width]);

        out
    }
}
