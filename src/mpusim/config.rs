use crate::mpusim::stats::{MpuStatisticsLog, MpuStatisticsLogEntry};
use burn::prelude::*;
use std::io;
use std::path::{Path, PathBuf};

/// Default arguments shared by every MPU operator in a model.
///
/// One bundle is built per model run and scoped over all operator
/// constructions, so each operator records its statistics under the same array
/// geometry and datatype widths.
#[derive(Config, Debug)]
pub struct MpuSimConfig {
    /// Name under which the statistics log file is written.
    pub model_name: String,

    #[config(default = 1)]
    pub activations_datatype_size_byte: usize,

    #[config(default = 1)]
    pub weights_datatype_size_byte: usize,

    #[config(default = 4)]
    pub results_datatype_size_byte: usize,

    #[config(default = 256)]
    pub systolic_array_height: usize,

    #[config(default = 256)]
    pub systolic_array_width: usize,

    #[config(default = 8)]
    pub activation_fifo_depth: usize,

    #[config(default = 4096)]
    pub accumulator_array_height: usize,

    /// Directory the statistics log is flushed into.
    #[config(default = "String::from(\".\")")]
    pub log_file_output_dir: String,
}

/// An [`MpuSimConfig`] paired with the live statistics log it scopes.
///
/// Cloned into every operator at construction; all clones append to the same
/// log, so one flush at the end of a run captures the whole graph.
#[derive(Clone, Debug)]
pub struct MpuSimScope {
    config: MpuSimConfig,
    log: MpuStatisticsLog,
}

impl MpuSimScope {
    pub fn new(config: MpuSimConfig) -> Self {
        Self {
            config,
            log: MpuStatisticsLog::new(),
        }
    }

    pub fn config(&self) -> &MpuSimConfig {
        &self.config
    }

    pub fn log(&self) -> &MpuStatisticsLog {
        &self.log
    }

    /// Records the GEMM an operator submitted to the array.
    pub fn record_matmul(&self, operation: &str, size_m: usize, size_n: usize, size_k: usize) {
        self.log.record(MpuStatisticsLogEntry {
            operation: operation.to_owned(),
            size_m,
            size_n,
            size_k,
            systolic_array_height: self.config.systolic_array_height,
            systolic_array_width: self.config.systolic_array_width,
            activation_fifo_depth: self.config.activation_fifo_depth,
            accumulator_array_height: self.config.accumulator_array_height,
            activations_datatype_size_byte: self.config.activations_datatype_size_byte,
            weights_datatype_size_byte: self.config.weights_datatype_size_byte,
            results_datatype_size_byte: self.config.results_datatype_size_byte,
        });
    }

    /// Flushes the log to `<log_file_output_dir>/<model_name>.log`.
    pub fn flush(&self) -> io::Result<PathBuf> {
        self.log.write_to(
            Path::new(&self.config.log_file_output_dir),
            &self.config.model_name,
        )
    }
}
