mod config;
mod conv2d;
mod depthwise_conv2d;
mod fully_connected;
mod stats;

pub use config::{MpuSimConfig, MpuSimScope};
pub use conv2d::{MpuSimConv2d, MpuSimConv2dConfig};
pub use depthwise_conv2d::{MpuSimDepthwiseConv2d, MpuSimDepthwiseConv2dConfig};
pub use fully_connected::{MpuSimFullyConnected, MpuSimFullyConnectedConfig};
pub use stats::{MpuStatisticsLog, MpuStatisticsLogEntry};
