use burn::backend::Autodiff;
use burn::backend::ndarray::NdArrayDevice;
use burn::optim::SgdConfig;
use mpusim_models::densenet::DenseNetConfig;
use mpusim_models::mpusim::{MpuSimConfig, MpuSimScope};
use mpusim_models::training::{TrainingConfig, synthetic_batch, train};

type B = burn::backend::NdArray<f32, i32>;
type AutoB = Autodiff<B>;

#[test]
fn synthetic_batch_shapes() {
    let device = NdArrayDevice::default();
    let (images, targets) = synthetic_batch::<B>(2, 3, 16, &device);
    assert_eq!([2, 3, 16, 16], images.dims());
    assert_eq!([2], targets.dims());
}

#[test]
fn one_step_training_runs_the_whole_graph_once() {
    let device = NdArrayDevice::default();
    let scope = MpuSimScope::new(MpuSimConfig::new("training_test".to_owned()));
    let model = DenseNetConfig::new()
        .with_growth_rate(4)
        .with_block_layers(vec![2, 2])
        .with_num_classes(10)
        .init::<AutoB>(&scope, &device);

    let config = TrainingConfig::new(SgdConfig::new())
        .with_batch_size(2)
        .with_image_size(16);
    let _model = train::<AutoB, _>(model, &config, &device);

    // stem + four dense layers of two convs + one transition + classifier
    assert_eq!(1 + 8 + 1 + 1, scope.log().len());
}
