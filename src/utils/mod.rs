//! Front-end helpers that are not part of the record/play core.

pub mod interrupt;

pub use interrupt::InterruptGuard;
