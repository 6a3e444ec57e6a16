use crate::mpusim::MpuSimConfig;
use std::path::PathBuf;

pub const HELP: &str = "\
MPU simulator model runner

Builds the model graph on the simulated-MPU operator set, runs a one-step
training loop over synthetic data, and writes the operator statistics log.

USAGE:
    <model-binary> [OPTIONS]

FLAGS:
    -h, --help                             Show this help message and exit

OPTIONS:
    --activations-datatype-size-byte <N>   activations datatype size in byte [default: 1]
    --weights-datatype-size-byte <N>       weights datatype size in byte [default: 1]
    --results-datatype-size-byte <N>       results datatype size in byte [default: 4]
    --systolic-array-height <N>            systolic array height [default: 256]
    --systolic-array-width <N>             systolic array width [default: 256]
    --accumulator-array-height <N>         accumulator array height [default: 4096]
    --mpusim-logdir <PATH>                 MPU simulator log directory [default: .]
";

#[derive(Debug)]
pub struct AppArgs {
    pub activations_datatype_size_byte: usize,
    pub weights_datatype_size_byte: usize,
    pub results_datatype_size_byte: usize,
    pub systolic_array_height: usize,
    pub systolic_array_width: usize,
    pub accumulator_array_height: usize,
    pub mpusim_logdir: PathBuf,
}

impl AppArgs {
    pub fn parse() -> Result<Self, pico_args::Error> {
        let mut pargs = pico_args::Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            println!("{}", HELP);
            std::process::exit(0);
        }

        let args = AppArgs {
            activations_datatype_size_byte: pargs
                .opt_value_from_str("--activations-datatype-size-byte")?
                .unwrap_or(1),
            weights_datatype_size_byte: pargs
                .opt_value_from_str("--weights-datatype-size-byte")?
                .unwrap_or(1),
            results_datatype_size_byte: pargs
                .opt_value_from_str("--results-datatype-size-byte")?
                .unwrap_or(4),
            systolic_array_height: pargs
                .opt_value_from_str("--systolic-array-height")?
                .unwrap_or(256),
            systolic_array_width: pargs
                .opt_value_from_str("--systolic-array-width")?
                .unwrap_or(256),
            accumulator_array_height: pargs
                .opt_value_from_str("--accumulator-array-height")?
                .unwrap_or(4096),
            mpusim_logdir: pargs
                .opt_value_from_os_str("--mpusim-logdir", parse_path)?
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        // It's up to the caller what to do with the remaining arguments.
        let remaining = pargs.finish();
        if !remaining.is_empty() {
            panic!("unused arguments: {remaining:?}");
        }

        Ok(args)
    }

    /// Simulator scope configuration for this run; `model_name` keys the log
    /// file.
    pub fn sim_config(&self, model_name: String) -> MpuSimConfig {
        MpuSimConfig::new(model_name)
            .with_activations_datatype_size_byte(self.activations_datatype_size_byte)
            .with_weights_datatype_size_byte(self.weights_datatype_size_byte)
            .with_results_datatype_size_byte(self.results_datatype_size_byte)
            .with_systolic_array_height(self.systolic_array_height)
            .with_systolic_array_width(self.systolic_array_width)
            .with_accumulator_array_height(self.accumulator_array_height)
            .with_log_file_output_dir(self.mpusim_logdir.display().to_string())
    }
}

fn parse_path(s: &std::ffi::OsStr) -> Result<PathBuf, &'static str> {
    Ok(s.into())
}
