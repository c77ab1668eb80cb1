pub mod clock;
pub mod error;
pub mod interval;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{FpsError, Result};
pub use interval::{Interval, Timestamp};
