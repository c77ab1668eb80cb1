pub mod sampler;
pub mod sink;

pub use sampler::{Sampler, SamplerState};
pub use sink::FrameSink;
