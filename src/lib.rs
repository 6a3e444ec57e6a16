pub mod backend;
pub mod cli;
pub mod densenet;
pub mod efficientnet;
pub mod mpusim;
pub mod training;
pub mod utils;

pub mod prelude {
    pub use crate::densenet::*;
    pub use crate::efficientnet::*;
    pub use crate::mpusim::*;
}
