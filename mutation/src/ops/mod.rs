//! Operation bodies for the three write algorithms.
//!
//! Each body runs inside an open transaction and returns `Ok` on the single
//! success path; the engine commits on `Ok` and aborts on `Err`, so every
//! transaction terminates exactly once.

mod add;
mod delete;
mod modify;

pub use add::{apply_add, screen_add};
pub use delete::apply_delete;
pub use modify::apply_modify;
