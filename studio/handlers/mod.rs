pub mod classify;
pub mod preview;
