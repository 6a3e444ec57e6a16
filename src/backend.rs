use burn::prelude::*;

pub type Element = f32;

#[cfg(feature = "ndarray")]
pub type MainBackend = burn::backend::NdArray<Element, i32>;
#[cfg(all(feature = "wgpu", not(feature = "ndarray")))]
pub type MainBackend = burn::backend::wgpu::Wgpu<Element, i32>;
#[cfg(all(feature = "cuda", not(any(feature = "ndarray", feature = "wgpu"))))]
pub type MainBackend = burn::backend::Cuda<Element, i32>;

#[cfg(not(any(feature = "ndarray", feature = "wgpu", feature = "cuda")))]
std::compile_error!("No backend feature selected. Please check Cargo.toml for more info.");

/// Operators execute synchronously in graph order on the default (CPU)
/// backend, which keeps the statistics log order stable across runs.
pub type MainAutoBackend = burn::backend::Autodiff<MainBackend>;

pub fn main_device() -> <MainBackend as Backend>::Device {
    Default::default()
}
