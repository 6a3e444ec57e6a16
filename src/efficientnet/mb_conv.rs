use crate::mpusim::{
    MpuSimConv2d, MpuSimConv2dConfig, MpuSimDepthwiseConv2d, MpuSimDepthwiseConv2dConfig,
    MpuSimScope,
};
use crate::utils::swish::Swish;
use burn::nn::{BatchNorm, BatchNormConfig};
use burn::prelude::*;

/// Mobile inverted bottleneck block.
///
/// Expansion is skipped when the expand ratio is one; the residual shortcut is
/// only taken on stride-one, shape-preserving blocks.
#[derive(Module, Debug)]
pub struct MbConv<B: Backend> {
    pub expand_conv: Option<MpuSimConv2d<B>>,
    pub expand_bn: Option<BatchNorm<B, 2>>,
    pub depthwise_conv: MpuSimDepthwiseConv2d<B>,
    pub depthwise_bn: BatchNorm<B, 2>,
    pub project_conv: MpuSimConv2d<B>,
    pub project_bn: BatchNorm<B, 2>,
    pub skip: bool,
}

#[derive(Config, Debug)]
pub struct MbConvConfig {
    pub kernel_size: usize,

    #[config(default = "[1, 1]")]
    pub strides: [usize; 2],

    pub expand_ratio: usize,

    pub input_filters: usize,

    pub output_filters: usize,
}

impl MbConvConfig {
    /// Channel count after expansion.
    pub fn expanded_filters(&self) -> usize {
        self.input_filters * self.expand_ratio
    }

    /// Whether the block keeps a residual shortcut.
    pub fn has_skip(&self) -> bool {
        self.strides == [1, 1] && self.input_filters == self.output_filters
    }

    /// Returns the initialized block; `name` prefixes its operator names in
    /// the statistics log.
    pub fn init<B: Backend>(
        &self,
        name: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> MbConv<B> {
        let expanded = self.expanded_filters();

        let (expand_conv, expand_bn) = if self.expand_ratio != 1 {
            (
                Some(
                    MpuSimConv2dConfig::new([self.input_filters, expanded], [1, 1])
                        .init(&format!("{name}/expand"), scope, device),
                ),
                Some(BatchNormConfig::new(expanded).with_epsilon(1e-3).init(device)),
            )
        } else {
            (None, None)
        };

        MbConv {
            expand_conv,
            expand_bn,
            depthwise_conv: MpuSimDepthwiseConv2dConfig::new(expanded, [self.kernel_size; 2])
                .with_strides(self.strides)
                .init(&format!("{name}/depthwise"), scope, device),
            depthwise_bn: BatchNormConfig::new(expanded).with_epsilon(1e-3).init(device),
            project_conv: MpuSimConv2dConfig::new([expanded, self.output_filters], [1, 1])
                .init(&format!("{name}/project"), scope, device),
            project_bn: BatchNormConfig::new(self.output_filters)
                .with_epsilon(1e-3)
                .init(device),
            skip: self.has_skip(),
        }
    }
}

impl<B: Backend> MbConv<B> {
    /// # Shapes
    ///   - Input [batch, input_filters, height, width]
    ///   - Output [batch, output_filters, height_out, width_out]
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let swish = Swish::new();

        let mut x = input.clone();
        if let (Some(conv), Some(bn)) = (&self.expand_conv, &self.expand_bn) {
            x = swish.forward(bn.forward(conv.forward(x)));
        }

        let x = swish.forward(self.depthwise_bn.forward(self.depthwise_conv.forward(x)));
        let x = self.project_bn.forward(self.project_conv.forward(x));

        if self.skip {
            debug_assert_eq!(input.dims(), x.dims());
            x + input
        } else {
            x
        }
    }
}
