//! EfficientNet-B0 over the MPU operator set.

use crate::efficientnet::{MbConv, MbConvConfig};
use crate::mpusim::{MpuSimConv2d, MpuSimConv2dConfig, MpuSimFullyConnected, MpuSimFullyConnectedConfig, MpuSimScope};
use crate::training::ImageClassifier;
use crate::utils::swish::Swish;
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig};
use burn::prelude::*;

const STEM_FILTERS: usize = 32;
const HEAD_FILTERS: usize = 1280;

/// B0 block table: name, kernel size, stride, expand ratio, input and output
/// filters.
const MB_CONV_BLOCKS: [(&str, usize, usize, usize, usize, usize); 16] = [
    ("MBConv1", 3, 1, 1, 32, 16),
    ("MBConv2_1", 3, 2, 6, 16, 24),
    ("MBConv2_2", 3, 1, 6, 24, 24),
    ("MBConv3_1", 5, 2, 6, 24, 40),
    ("MBConv3_2", 3, 1, 6, 40, 40),
    ("MBConv4_1", 3, 2, 6, 40, 80),
    ("MBConv4_2", 3, 1, 6, 80, 80),
    ("MBConv4_3", 3, 1, 6, 80, 80),
    ("MBConv5_1", 5, 1, 6, 80, 112),
    ("MBConv5_2", 5, 1, 6, 112, 112),
    ("MBConv5_3", 5, 1, 6, 112, 112),
    ("MBConv6_1", 5, 2, 6, 112, 192),
    ("MBConv6_2", 5, 1, 6, 192, 192),
    ("MBConv6_3", 5, 1, 6, 192, 192),
    ("MBConv6_4", 5, 1, 6, 192, 192),
    ("MBConv7", 3, 1, 6, 192, 320),
];

#[derive(Module, Debug)]
pub struct EfficientNetB0<B: Backend> {
    pub stem: MpuSimConv2d<B>,
    pub stem_bn: BatchNorm<B, 2>,
    pub blocks: Vec<MbConv<B>>,
    pub head: MpuSimConv2d<B>,
    pub head_bn: BatchNorm<B, 2>,
    pub global_pool: AdaptiveAvgPool2d,
    pub classifier: MpuSimFullyConnected<B>,
}

#[derive(Config, Debug)]
pub struct EfficientNetB0Config {
    #[config(default = 3)]
    pub image_channels: usize,

    #[config(default = 1000)]
    pub num_classes: usize,
}

impl EfficientNetB0Config {
    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, scope: &MpuSimScope, device: &B::Device) -> EfficientNetB0<B> {
        let blocks = MB_CONV_BLOCKS
            .iter()
            .map(|&(name, kernel_size, stride, expand_ratio, input_filters, output_filters)| {
                MbConvConfig::new(kernel_size, expand_ratio, input_filters, output_filters)
                    .with_strides([stride, stride])
                    .init(name, scope, device)
            })
            .collect();
        let backbone_filters = MB_CONV_BLOCKS[MB_CONV_BLOCKS.len() - 1].5;

        EfficientNetB0 {
            stem: MpuSimConv2dConfig::new([self.image_channels, STEM_FILTERS], [3, 3])
                .with_strides([2, 2])
                .init("stem", scope, device),
            stem_bn: BatchNormConfig::new(STEM_FILTERS).with_epsilon(1e-3).init(device),
            blocks,
            head: MpuSimConv2dConfig::new([backbone_filters, HEAD_FILTERS], [1, 1])
                .init("head", scope, device),
            head_bn: BatchNormConfig::new(HEAD_FILTERS).with_epsilon(1e-3).init(device),
            global_pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            classifier: MpuSimFullyConnectedConfig::new(HEAD_FILTERS, self.num_classes)
                .init("fc", scope, device),
        }
    }
}

impl<B: Backend> EfficientNetB0<B> {
    /// # Shapes
    ///   - Input [batch, image_channels, height, width]
    ///   - Output [batch, num_classes]
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch, _, _, _] = images.dims();
        let swish = Swish::new();

        let x = self.stem.forward(images);
        let mut x = swish.forward(self.stem_bn.forward(x));

        for block in self.blocks.iter() {
            x = block.forward(x);
        }

        let x = self.head.forward(x);
        let x = swish.forward(self.head_bn.forward(x));
        let x = self.global_pool.forward(x);
        let features = x.flatten::<2>(1, 3);

        let logits = self.classifier.forward(features);
        let [logits_batch, _] = logits.dims();
        debug_assert_eq!(batch, logits_batch);

        logits
    }
}

impl<B: Backend> ImageClassifier<B> for EfficientNetB0<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        EfficientNetB0::forward(self, images)
    }
}
