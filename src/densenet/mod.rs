mod block;
mod layer;
mod network;
mod transition;

pub use block::{DenseBlock, DenseBlockConfig};
pub use layer::{DenseLayer, DenseLayerConfig};
pub use network::{DenseNet, DenseNetConfig};
pub use transition::{Transition, TransitionConfig};
