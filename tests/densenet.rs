use burn::backend::ndarray::NdArrayDevice;
use burn::prelude::*;
use mpusim_models::densenet::{
    DenseBlockConfig, DenseLayerConfig, DenseNetConfig, TransitionConfig,
};
use mpusim_models::mpusim::{MpuSimConfig, MpuSimScope};

type B = burn::backend::NdArray<f32, i32>;

fn scope() -> MpuSimScope {
    MpuSimScope::new(MpuSimConfig::new("densenet_test".to_owned()))
}

#[test]
fn dense_layer_grows_channels_by_growth_rate() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let config = DenseLayerConfig::new(16).with_growth_rate(8);
    assert_eq!(24, config.out_channels());

    let layer = config.init::<B>("layer", &scope, &device);
    let output = layer.forward(Tensor::ones([1, 16, 8, 8], &device));
    assert_eq!([1, 24, 8, 8], output.dims());
}

#[test]
fn dense_layer_bottleneck_is_four_times_growth() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let layer = DenseLayerConfig::new(16)
        .with_growth_rate(8)
        .init::<B>("layer", &scope, &device);
    let _ = layer.forward(Tensor::ones([1, 16, 8, 8], &device));

    let entries = scope.log().entries();
    assert_eq!(2, entries.len());
    assert_eq!("layer/conv1x1", entries[0].operation);
    assert_eq!(32, entries[0].size_n);
    assert_eq!("layer/conv3x3", entries[1].operation);
    assert_eq!(8, entries[1].size_n);
    assert_eq!(3 * 3 * 32, entries[1].size_k);
}

#[test]
fn transition_halves_channels_rounding_down() {
    assert_eq!(128, TransitionConfig::new(256).out_channels());
    assert_eq!(127, TransitionConfig::new(255).out_channels());
}

#[test]
fn transition_halves_spatial_resolution() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let transition = TransitionConfig::new(6).init::<B>("transition", &scope, &device);

    let output = transition.forward(Tensor::ones([1, 6, 8, 8], &device));
    assert_eq!([1, 3, 4, 4], output.dims());
}

#[test]
fn block_stacks_layers_then_compresses() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let config = DenseBlockConfig::new(16, 3).with_growth_rate(8);
    assert_eq!(20, config.out_channels());

    let block = config.init::<B>("block", &scope, &device);
    let output = block.forward(Tensor::ones([1, 16, 8, 8], &device));
    assert_eq!([1, 20, 4, 4], output.dims());
}

#[test]
fn last_block_keeps_channels_and_resolution() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let config = DenseBlockConfig::new(16, 3).with_growth_rate(8).with_last(true);
    assert_eq!(40, config.out_channels());

    let block = config.init::<B>("block", &scope, &device);
    let output = block.forward(Tensor::ones([1, 16, 8, 8], &device));
    assert_eq!([1, 40, 8, 8], output.dims());
}

#[test]
fn densenet_264_classifier_sees_2688_channels() {
    assert_eq!(2688, DenseNetConfig::new().feature_channels());
}

#[test]
fn densenet_forward_logs_every_operator_in_graph_order() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let model = DenseNetConfig::new().init::<B>(&scope, &device);

    let logits = model.forward(Tensor::ones([1, 3, 32, 32], &device));
    assert_eq!([1, 1000], logits.dims());

    // stem + two convs per dense layer + three transitions + classifier
    let expected = 1 + 2 * (6 + 12 + 64 + 48) + 3 + 1;
    assert_eq!(expected, scope.log().len());

    let entries = scope.log().entries();
    assert_eq!("conv1", entries[0].operation);
    assert_eq!("block0/dense_layer.0/conv1x1", entries[1].operation);
    assert_eq!("block0/transition/conv1", entries[13].operation);
    assert_eq!("linear", entries.last().unwrap().operation);
    assert_eq!(2688, entries.last().unwrap().size_k);
    assert_eq!(1000, entries.last().unwrap().size_n);
}
