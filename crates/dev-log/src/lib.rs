//! Process-wide diagnostic log capture.
//!
//! Intercepts the four console channels (log/info/warn/error) plus two
//! fault channels (uncaught panics, unhandled task rejections), keeps a
//! bounded entry history, and fans entries out to subscribers in emission
//! order. Interception is transparent: every wrapped call still reaches
//! its original sink with unchanged arguments.

mod capture;
mod console;
mod entry;
mod value;

pub use capture::{DEFAULT_CAPACITY, LogCapture, Subscription, spawn_monitored};
pub use console::{Console, Sink};
pub use entry::{CLEAR_SENTINEL_ID, LogEntry, LogLevel};
pub use value::{ConsoleValue, ErrorInfo};
