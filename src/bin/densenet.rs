use anyhow::Result;
use burn::optim::SgdConfig;
use burn::optim::momentum::MomentumConfig;
use mpusim_models::backend::{MainAutoBackend, main_device};
use mpusim_models::cli::AppArgs;
use mpusim_models::densenet::DenseNetConfig;
use mpusim_models::mpusim::MpuSimScope;
use mpusim_models::training::{TrainingConfig, train};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mpusim_models=info".parse()?)
                .add_directive("densenet=info".parse()?),
        )
        .init();

    let args = AppArgs::parse()?;
    let model_name = format!(
        "densenet_264_sys_arr_h_{}_sys_arr_w_{}_acc_arr_h_{}",
        args.systolic_array_height, args.systolic_array_width, args.accumulator_array_height,
    );
    let scope = MpuSimScope::new(args.sim_config(model_name));

    let device = main_device();
    let model_config = DenseNetConfig::new();
    tracing::info!(
        "building DenseNet-264, {} feature channels before the classifier",
        model_config.feature_channels(),
    );
    let model = model_config.init::<MainAutoBackend>(&scope, &device);

    let training_config = TrainingConfig::new(
        SgdConfig::new().with_momentum(Some(MomentumConfig::new())),
    );
    let _model = train::<MainAutoBackend, _>(model, &training_config, &device);

    let log_path = scope.flush()?;
    tracing::info!(
        "{} MPU operator statistics written to {}",
        scope.log().len(),
        log_path.display(),
    );

    Ok(())
}
