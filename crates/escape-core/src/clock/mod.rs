mod countdown;
mod task;

pub use countdown::{format_mm_ss, CountdownClock, TICK_INTERVAL_MS};
pub use task::CountdownTask;
