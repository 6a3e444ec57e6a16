use anyhow::Result;
use burn::optim::SgdConfig;
use burn::optim::momentum::MomentumConfig;
use mpusim_models::backend::{MainAutoBackend, main_device};
use mpusim_models::cli::AppArgs;
use mpusim_models::efficientnet::EfficientNetB0Config;
use mpusim_models::mpusim::MpuSimScope;
use mpusim_models::training::{TrainingConfig, train};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mpusim_models=info".parse()?)
                .add_directive("efficientnet_b0=info".parse()?),
        )
        .init();

    let args = AppArgs::parse()?;
    let model_name = format!(
        "efficientnet_b0_sys_arr_h_{}_sys_arr_w_{}",
        args.systolic_array_height, args.systolic_array_width,
    );
    let scope = MpuSimScope::new(args.sim_config(model_name));

    let device = main_device();
    let model = EfficientNetB0Config::new().init::<MainAutoBackend>(&scope, &device);

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
