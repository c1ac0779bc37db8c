//! Voice and keyboard arithmetic calculator core: transcript normalization,
//! safe expression evaluation, and a bounded history ledger.

pub mod config;
pub mod eval;
pub mod history;
pub mod normalize;
pub mod session;
pub mod transcribe;
