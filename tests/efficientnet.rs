use burn::backend::ndarray::NdArrayDevice;
use burn::prelude::*;
use mpusim_models::efficientnet::{EfficientNetB0Config, MbConvConfig};
use mpusim_models::mpusim::{MpuSimConfig, MpuSimScope};

type B = burn::backend::NdArray<f32, i32>;

fn scope() -> MpuSimScope {
    MpuSimScope::new(MpuSimConfig::new("efficientnet_test".to_owned()))
}

#[test]
fn mb_conv_expansion_arithmetic() {
    let config = MbConvConfig::new(3, 6, 16, 24).with_strides([2, 2]);
    assert_eq!(96, config.expanded_filters());
    assert!(!config.has_skip());

    assert!(MbConvConfig::new(3, 6, 24, 24).has_skip());
    assert!(!MbConvConfig::new(3, 6, 24, 24).with_strides([2, 2]).has_skip());
    assert!(!MbConvConfig::new(3, 6, 24, 40).has_skip());
}

#[test]
fn mb_conv_downsamples_and_projects() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let block = MbConvConfig::new(3, 6, 16, 24)
        .with_strides([2, 2])
        .init::<B>("block", &scope, &device);

    let output = block.forward(Tensor::ones([1, 16, 16, 16], &device));
    assert_eq!([1, 24, 8, 8], output.dims());

    let entries = scope.log().entries();
    assert_eq!(3, entries.len());
    assert_eq!("block/expand", entries[0].operation);
    assert_eq!(96, entries[0].size_n);
    assert_eq!("block/depthwise", entries[1].operation);
    assert_eq!(96, entries[1].size_n);
    assert_eq!(3 * 3, entries[1].size_k);
    assert_eq!("block/project", entries[2].operation);
    assert_eq!(24, entries[2].size_n);
    assert_eq!(96, entries[2].size_k);
}

#[test]
fn mb_conv_without_expansion_logs_two_gemms() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let block = MbConvConfig::new(3, 1, 8, 8).init::<B>("block", &scope, &device);

    let output = block.forward(Tensor::ones([1, 8, 8, 8], &device));
    assert_eq!([1, 8, 8, 8], output.dims());

    let entries = scope.log().entries();
    assert_eq!(2, entries.len());
    assert_eq!("block/depthwise", entries[0].operation);
    assert_eq!("block/project", entries[1].operation);
}

#[test]
fn efficientnet_b0_forward_logs_every_operator_in_graph_order() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let model = EfficientNetB0Config::new().init::<B>(&scope, &device);

    let logits = model.forward(Tensor::ones([1, 3, 64, 64], &device));
    assert_eq!([1, 1000], logits.dims());

    // stem + one expansion-free block of two convs + fifteen blocks of three
    // convs + head + classifier
    let expected = 1 + 2 + 15 * 3 + 1 + 1;
    assert_eq!(expected, scope.log().len());

    let entries = scope.log().entries();
    assert_eq!("stem", entries[0].operation);
    assert_eq!("MBConv1/depthwise", entries[1].operation);
    assert_eq!("MBConv2_1/expand", entries[3].operation);
    assert_eq!("head", entries[entries.len() - 2].operation);
    assert_eq!(1280, entries[entries.len() - 2].size_n);
    assert_eq!("fc", entries.last().unwrap().operation);
    assert_eq!(1280, entries.last().unwrap().size_k);
    assert_eq!(1000, entries.last().unwrap().size_n);
}

#[test]
fn efficientnet_b0_classifies_any_batch_size() {
    let device = NdArrayDevice::default();
    let scope = scope();
    let model = EfficientNetB0Config::new().init::<B>(&scope, &device);

    let logits = model.forward(Tensor::ones([3, 3, 64, 64], &device));
    assert_eq!([3, 1000], logits.dims());
}
