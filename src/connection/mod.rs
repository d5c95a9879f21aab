//! Sessions connecting a hit source to a round engine

mod session;

pub use session::GameSession;
