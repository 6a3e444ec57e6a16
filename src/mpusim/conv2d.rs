use crate::mpusim::MpuSimScope;
use burn::module::Ignored;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::{Initializer, PaddingConfig2d};
use burn::prelude::*;

/// 2-D convolution routed through the simulated MPU.
///
/// The wrapped convolution runs on the backend as usual; every forward also
/// records the GEMM the accelerator would execute for it.
#[derive(Module, Debug)]
pub struct MpuSimConv2d<B: Backend> {
    pub conv: Conv2d<B>,
    pub operation: Ignored<String>,
    pub scope: Ignored<MpuSimScope>,
}

#[derive(Config, Debug)]
pub struct MpuSimConv2dConfig {
    /// Input and output channels.
    pub channels: [usize; 2],

    pub kernel_size: [usize; 2],

    #[config(default = "[1, 1]")]
    pub strides: [usize; 2],

    #[config(default = false)]
    pub bias: bool,
}

impl MpuSimConv2dConfig {
    /// Returns the initialized operator, registered under `operation` in the
    /// scope's statistics log.
    pub fn init<B: Backend>(
        &self,
        operation: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> MpuSimConv2d<B> {
        // half-kernel padding keeps stride-one outputs at the input size and
        // strided outputs at ceil(size / stride), for odd kernels
        let conv = Conv2dConfig::new(self.channels, self.kernel_size)
            .with_stride(self.strides)
            .with_padding(PaddingConfig2d::Explicit(
                self.kernel_size[0] / 2,
                self.kernel_size[1] / 2,
            ))
            .with_bias(self.bias)
            .with_initializer(Initializer::Constant { value: 1.0 })
            .init(device);

        MpuSimConv2d {
            conv,
            operation: Ignored(operation.to_owned()),
            scope: Ignored(scope.clone()),
        }
    }
}

impl<B: Backend> MpuSimConv2d<B> {
    /// # Shapes
    ///   - Input [batch, channels_in, height, width]
    ///   - Output [batch, channels_out, height_out, width_out]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, channels_in, _, _] = input.dims();
        let [channels_out, _, kernel_h, kernel_w] = self.conv.weight.dims();

        let output = self.conv.forward(input);
        let [_, _, out_h, out_w] = output.dims();

        // im2col view of the convolution
        self.scope.0.record_matmul(
            &self.operation.0,
            batch * out_h * out_w,
            channels_out,
            kernel_h * kernel_w * channels_in,
        );

        output
    }
}
