//! Session clock: the start/pause/resume/stop state machine for one
//! tracked activity per actor.

pub mod clock;
pub mod notice;
pub mod session;

pub use clock::SessionClock;
pub use notice::{Notice, NoticeLevel};
pub use session::{format_hms, ClockState, TrackingSession};
