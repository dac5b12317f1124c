//! Core module has the shared exact integer math used by clipping and sweeping.
pub mod math;
