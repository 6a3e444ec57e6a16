use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One row of the accelerator statistics log.
///
/// Columns: quoted operation name, then the GEMM dimensions and the array
/// parameters the operation ran under, tab-separated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MpuStatisticsLogEntry {
    pub operation: String,
    pub size_m: usize,
    pub size_n: usize,
    pub size_k: usize,
    pub systolic_array_height: usize,
    pub systolic_array_width: usize,
    pub activation_fifo_depth: usize,
    pub accumulator_array_height: usize,
    pub activations_datatype_size_byte: usize,
    pub weights_datatype_size_byte: usize,
    pub results_datatype_size_byte: usize,
}

impl MpuStatisticsLogEntry {
    pub fn render(&self) -> String {
        format!(
            "\"{}\"\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.operation,
            self.size_m,
            self.size_n,
            self.size_k,
            self.systolic_array_height,
            self.systolic_array_width,
            self.activation_fifo_depth,
            self.accumulator_array_height,
            self.activations_datatype_size_byte,
            self.weights_datatype_size_byte,
            self.results_datatype_size_byte,
        )
    }
}

/// Shared, append-only record of every MPU operator invocation.
///
/// Clones share the same underlying buffer. Appends are serialized, so entry
/// order equals operator execution order.
#[derive(Clone, Debug, Default)]
pub struct MpuStatisticsLog {
    entries: Arc<Mutex<Vec<MpuStatisticsLogEntry>>>,
}

impl MpuStatisticsLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: MpuStatisticsLogEntry) {
        self.entries
            .lock()
            .expect("statistics log lock poisoned")
            .push(entry);
    }

    pub fn entries(&self) -> Vec<MpuStatisticsLogEntry> {
        self.entries
            .lock()
            .expect("statistics log lock poisoned")
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("statistics log lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes all recorded entries to `<dir>/<model_name>.log`, creating the
    /// directory if needed, and returns the path written.
    pub fn write_to(&self, dir: &Path, model_name: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{model_name}.log"));

        let mut contents = String::new();
        for entry in self.entries() {
            contents.push_str(&entry.render());
            contents.push('\n');
        }
        fs::write(&path, contents)?;

        Ok(path)
    }
}
