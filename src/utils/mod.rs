pub mod bn_relu;
pub mod swish;
