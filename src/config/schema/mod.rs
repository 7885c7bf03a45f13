mod completion;
mod core;
mod gateway;
mod liveness;

pub use completion::CompletionConfig;
pub use self::core::Config;
pub use gateway::GatewayConfig;
pub use liveness::LivenessConfig;
