pub mod network;
pub mod policy;

pub use network::{FeedForwardNetwork, NetworkShape};
pub use policy::{FnPolicy, GapSeeker, Policy, ScriptedPolicy};
