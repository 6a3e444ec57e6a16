//! One-step training driver over synthetic data.
//!
//! Accelerator measurement only needs the full graph built and executed once,
//! so the driver feeds a constant image batch through a single forward,
//! backward and optimizer step per configured step.

use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::{GradientsParams, Optimizer, SgdConfig};
use burn::prelude::*;
use burn::tensor::ElementConversion;
use burn::tensor::backend::AutodiffBackend;

/// Anything the driver can train: a module mapping an image batch to class
/// logits.
pub trait ImageClassifier<B: Backend> {
    /// # Shapes
    ///   - Input [batch, channels, height, width]
    ///   - Output [batch, num_classes]
    fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2>;
}

#[derive(Config)]
pub struct TrainingConfig {
    pub optimizer: SgdConfig,

    #[config(default = 1)]
    pub steps_per_epoch: usize,

    #[config(default = 1)]
    pub max_epoch: usize,

    #[config(default = 1)]
    pub batch_size: usize,

    #[config(default = 224)]
    pub image_size: usize,

    #[config(default = 3)]
    pub image_channels: usize,

    #[config(default = "0.01 / 128.")]
    pub lr: f64,
}

/// Constant-valued stand-in for an input pipeline.
///
/// # Shapes
///   - images [batch_size, channels, size, size]
///   - targets [batch_size]
pub fn synthetic_batch<B: Backend>(
    batch_size: usize,
    channels: usize,
    size: usize,
    device: &B::Device,
) -> (Tensor<B, 4>, Tensor<B, 1, Int>) {
    let images = Tensor::ones([batch_size, channels, size, size], device);
    let targets = Tensor::zeros([batch_size], device);
    (images, targets)
}

/// Runs the configured number of synthetic training steps and returns the
/// updated model.
pub fn train<AutoB, M>(mut model: M, config: &TrainingConfig, device: &AutoB::Device) -> M
where
    AutoB: AutodiffBackend,
    M: ImageClassifier<AutoB> + AutodiffModule<AutoB>,
{
    let mut optim = config.optimizer.init::<AutoB, M>();
    let loss_fn = CrossEntropyLossConfig::new().init(device);

    for epoch in 1..=config.max_epoch {
        for step in 1..=config.steps_per_epoch {
            let (images, targets) = synthetic_batch::<AutoB>(
                config.batch_size,
                config.image_channels,
                config.image_size,
                device,
            );

            let logits = model.forward(images);
            let loss = loss_fn.forward(logits, targets);

            let loss_value: f64 = loss.clone().into_scalar().elem();
            tracing::info!(
                "epoch {epoch}/{}, step {step}/{}, loss {loss_value:.4}",
                config.max_epoch,
                config.steps_per_epoch,
            );

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(config.lr, model, grads);
        }
    }

    model
}
