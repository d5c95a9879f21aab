//! Hit source implementations

pub mod channel;
pub mod replay;

pub use channel::{ChannelProvider, HitSender};
pub use replay::ReplayProvider;
