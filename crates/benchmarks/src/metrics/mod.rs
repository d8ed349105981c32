//! Built-in metric kinds.
//!
//! | Kind | Lifecycle | Identifier |
//! |------|-----------|------------|
//! | [`PeakMemory`] | instantaneous | `peak-memory` |
//! | [`ElapsedTime`] | block | `duration` |
//! | [`CpuTime`] | block | `cpu-time` |
//! | [`OutputSize`] | instantaneous | `output-size` |
//! | [`Checksum`] | instantaneous | `checksum` |
//! | [`Counter`] | instantaneous | `counter` |
//!
//! Parameterized kinds append their name to the identifier they report
//! (`duration-scan`, `counter-files`), but the log filters them by the
//! identifier in the table.

pub mod checksum;
pub mod counter;
pub mod memory;
pub mod output;
pub mod time;

pub use checksum::Checksum;
pub use counter::Counter;
pub use memory::PeakMemory;
pub use output::OutputSize;
pub use time::{CpuTime, ElapsedTime};
