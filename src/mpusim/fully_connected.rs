use crate::mpusim::MpuSimScope;
use burn::module::Ignored;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;

/// Fully connected layer routed through the simulated MPU.
#[derive(Module, Debug)]
pub struct MpuSimFullyConnected<B: Backend> {
    pub linear: Linear<B>,
    pub operation: Ignored<String>,
    pub scope: Ignored<MpuSimScope>,
}

#[derive(Config, Debug)]
pub struct MpuSimFullyConnectedConfig {
    pub d_input: usize,

    pub d_output: usize,

    #[config(default = true)]
    pub bias: bool,
}

impl MpuSimFullyConnectedConfig {
    /// Returns the initialized operator, registered under `operation` in the
    /// scope's statistics log.
    pub fn init<B: Backend>(
        &self,
        operation: &str,
        scope: &MpuSimScope,
        device: &B::Device,
    ) -> MpuSimFullyConnected<B> {
        let linear = LinearConfig::new(self.d_input, self.d_output)
            .with_bias(self.bias)
            .with_initializer(Initializer::Constant { value: 1.0 })
            .init(device);

        MpuSimFullyConnected {
            linear,
            operation: Ignored(operation.to_owned()),
            scope: Ignored(scope.clone()),
        }
    }
}

impl<B: Backend> MpuSimFullyConnected<B> {
    /// # Shapes
    ///   - Input [batch, d_input]
    ///   - Output [batch, d_output]
    pub fn forward(&self, input: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, d_input] = input.dims();

        let output = self.linear.forward(input);
        let [_, d_output] = output.dims();

        self.scope.0.record_matmul(&self.operation.0, batch, d_output, d_input);

        output
    }
}
