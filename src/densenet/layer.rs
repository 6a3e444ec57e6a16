use crate::mpusim::{MpuSimConv2d, MpuSimConv2dConfig, MpuSimScope};
use crate::utils::bn_relu::{BnRelu, BnReluConfig};
use burn::prelude::*;

/// One densely connected layer: a 1x1 bottleneck into a 3x3 convolution whose
/// output is concatenated onto the layer input.
#[derive(Module, Debug)]
pub struct DenseLayer<B: Backend> {
    pub conv1x1: MpuSimConv2d<B>,
    pub bn_relu1: BnRelu<B>,
    pub conv3x3: MpuSimConv2d<B>,
    pub bn_relu2: BnRelu<B>,
}

#[derive(Config, Debug)]
pub struct DenseLayerConfig {
    pub in_channels: usize,

    #[config(default = 32)]
    pub growth_rate: usize,
}

impl DenseLayerConfig {
    pub fn out_channels(&self) -> usize {
        self.in_channels + self.growth_rate
    }

    /// Returns the initialized layer; `name` prefixes its operator names in the
    /// statistics log.
    pub fn init<B: Backend>(
        &self,
        name: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> DenseLayer<B> {
        let bottleneck = 4 * self.growth_rate;

        DenseLayer {
            conv1x1: MpuSimConv2dConfig::new([self.in_channels, bottleneck], [1, 1])
                .init(&format!("{name}/conv1x1"), scope, device),
            bn_relu1: BnReluConfig::new(bottleneck).init(device),
            conv3x3: MpuSimConv2dConfig::new([bottleneck, self.growth_rate], [3, 3])
                .init(&format!("{name}/conv3x3"), scope, device),
            bn_relu2: BnReluConfig::new(self.growth_rate).init(device),
        }
    }
}

impl<B: Backend> DenseLayer<B> {
    /// # Shapes
    ///   - Input [batch, in_channels, height, width]
    ///   - Output [batch, in_channels + growth_rate, height, width]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let [batch, in_channels, height, width] = input.dims();

        let x = self.conv1x1.forward(input.clone());
        let x = self.bn_relu1.forward(x);
        let x = self.conv3x3.forward(x);
        let x = self.bn_relu2.forward(x);
        let [_, growth_rate, _, _] = x.dims();

        let out = Tensor::cat(vec![x, input], 1);
        debug_assert_eq!([batch, in_channels + growth_rate, height, width], out.dims());

        out
    }
}
