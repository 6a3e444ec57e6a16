mod mb_conv;
mod network;

pub use mb_conv::{MbConv, MbConvConfig};
pub use network::{EfficientNetB0, EfficientNetB0Config};
