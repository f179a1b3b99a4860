pub mod agent_link;
pub mod config;
pub mod logging;
pub mod observer;
pub mod referee;
pub mod transport;

pub use referee::{Referee, RefereeError};
