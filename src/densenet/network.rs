//! DenseNet-264 backbone over the MPU operator set.

use crate::densenet::{DenseBlock, DenseBlockConfig};
use crate::mpusim::{MpuSimConv2d, MpuSimConv2dConfig, MpuSimFullyConnected, MpuSimFullyConnectedConfig, MpuSimScope};
use crate::training::ImageClassifier;
use crate::utils::bn_relu::{BnRelu, BnReluConfig};
use burn::nn::PaddingConfig2d;
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig};
use burn::prelude::*;

#[derive(Module, Debug)]
pub struct DenseNet<B: Backend> {
    pub conv1: MpuSimConv2d<B>,
    pub bn_relu1: BnRelu<B>,
    pub pool1: MaxPool2d,
    pub blocks: Vec<DenseBlock<B>>,
    pub bn_relu_last: BnRelu<B>,
    pub global_pool: AdaptiveAvgPool2d,
    pub classifier: MpuSimFullyConnected<B>,
}

#[derive(Config, Debug)]
pub struct DenseNetConfig {
    #[config(default = 3)]
    pub image_channels: usize,

    #[config(default = 32)]
    pub growth_rate: usize,

    #[config(default = 0.5)]
    pub reduction: f64,

    /// Dense layers per block; the default is the 264-layer arrangement.
    #[config(default = "vec![6, 12, 64, 48]")]
    pub block_layers: Vec<usize>,

    #[config(default = 1000)]
    pub num_classes: usize,
}

impl DenseNetConfig {
    fn block_configs(&self) -> Vec<DenseBlockConfig> {
        let mut configs = Vec::with_capacity(self.block_layers.len());
        let mut channels = 2 * self.growth_rate;
        let last = self.block_layers.len().saturating_sub(1);
        for (i, &num_layers) in self.block_layers.iter().enumerate() {
            let config = DenseBlockConfig::new(channels, num_layers)
                .with_growth_rate(self.growth_rate)
                .with_reduction(self.reduction)
                .with_last(i == last);
            channels = config.out_channels();
            configs.push(config);
        }
        configs
    }

    /// Channel count entering the classifier.
    pub fn feature_channels(&self) -> usize {
        self.block_configs()
            .last()
            .map(DenseBlockConfig::out_channels)
            .unwrap_or(2 * self.growth_rate)
    }

    /// Returns the initialized model.
    pub fn init<B: Backend>(&self, scope: &MpuSimScope, device: &B::Device) -> DenseNet<B> {
        let stem_channels = 2 * self.growth_rate;
        let blocks = self
            .block_configs()
            .iter()
            .enumerate()
            .map(|(i, config)| config.init(&format!("block{i}"), scope, device))
            .collect();
        let feature_channels = self.feature_channels();

        DenseNet {
            conv1: MpuSimConv2dConfig::new([self.image_channels, stem_channels], [7, 7])
                .with_strides([2, 2])
                .init("conv1", scope, device),
            bn_relu1: BnReluConfig::new(stem_channels).init(device),
            pool1: MaxPool2dConfig::new([3, 3])
                .with_strides([2, 2])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(),
            blocks,
            bn_relu_last: BnReluConfig::new(feature_channels).init(device),
            global_pool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            classifier: MpuSimFullyConnectedConfig::new(feature_channels, self.num_classes)
                .init("linear", scope, device),
        }
    }
}

impl<B: Backend> DenseNet<B> {
    /// # Shapes
    ///   - Input [batch, image_channels, height, width]
    ///   - Output [batch, num_classes]
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let [batch, _, _, _] = images.dims();

        let x = self.conv1.forward(images);
        let x = self.bn_relu1.forward(x);
        let mut x = self.pool1.forward(x);

        for block in self.blocks.iter() {
            x = block.forward(x);
        }

        let x = self.bn_relu_last.forward(x);
        let x = self.global_pool.forward(x);
        let features = x.flatten::<2>(1, 3);

        let logits = self.classifier.forward(features);
        let [logits_batch, _] = logits.dims();
        debug_assert_eq!(batch, logits_batch);

        logits
    }
}

impl<B: Backend> ImageClassifier<B> for DenseNet<B> {
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        DenseNet::forward(self, images)
    }
}
