pub mod generators;
mod instances_stream;
mod stream;

pub use instances_stream::InstancesStream;
pub use stream::Stream;
