use crate::mpusim::MpuSimScope;
use burn::module::Ignored;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{Initializer, PaddingConfig2d};
use burn::prelude::*;

/// Depthwise 2-D convolution routed through the simulated MPU.
///
/// Each channel is convolved independently (channel multiplier one), so the
/// per-channel reduction depth is just the kernel area.
#[derive(Module, Debug)]
pub struct MpuSimDepthwiseConv2d<B: Backend> {
    pub conv: Conv2d<B>,
    pub operation: Ignored<String>,
    pub scope: Ignored<MpuSimScope>,
}

#[derive(Config, Debug)]
pub struct MpuSimDepthwiseConv2dConfig {
    /// Channels in and out.
    pub channels: usize,

    pub kernel_size: [usize; 2],

    #[config(default = "[1, 1]")]
    pub strides: [usize; 2],

    #[config(default = false)]
    pub bias: bool,
}

impl MpuSimDepthwiseConv2dConfig {
    /// Returns the initialized operator, registered under `operation` in the
    /// scope's statistics log.
    pub fn init<B: Backend>(
        &self,
        operation: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> MpuSimDepthwiseConv2d<B> {
        // half-kernel padding, as for the full convolution
        let conv = Conv2dConfig::new([self.channels, self.channels], self.kernel_size)
            .with_stride(self.strides)
            .with_groups(self.channels)
            .with_padding(PaddingConfig2d::Explicit(
                self.kernel_size[0] / 2,
                self.kernel_size[1] / 2,
            ))
            .with_bias(self.bias)
            .with_initializer(Initializer::Constant { value: 1.0 })
            .init(device);

        MpuSimDepthwiseConv2d {
            conv,
            operation: Ignored(operation.to_owned()),
            scope: Ignored(scope.clone()),
        }
    }
}

impl<B: Backend> MpuSimDepthwiseConv2d<B> {
    /// # Shapes
    ///   - Input [batch, channels, height, width]
    ///   - Output [batch, channels, height_out, width_out]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, channels, _, _] = input.dims();
        // weight is [channels, 1, kernel_h, kernel_w]
        let [_, _, kernel_h, kernel_w] = self.conv.weight.dims();

        let output = self.conv.forward(input);
        let [_, out_channels, out_h, out_w] = output.dims();
        debug_assert_eq!(channels, out_channels);

        self.scope.0.record_matmul(
            &self.operation.0,
            batch * out_h * out_w,
            channels,
            kernel_h * kernel_w,
        );

        output
    }
}
