//! Stream combinators for snapshot delivery

mod throttle;

pub use throttle::{Throttle, ThrottleExt};
