pub mod agent;
pub mod policy;

pub use agent::{Agent, AgentSummary, serve};
pub use policy::{NaivePolicy, Policy, PolicyContext};
