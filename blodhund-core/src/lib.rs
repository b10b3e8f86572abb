//! # blodhund-core
//!
//! Foundation layer for the Blodhund discovery pipeline: shared event
//! types, the channel set connecting the pipeline workers, and the clock
//! abstraction used for epoch-second scheduling decisions.
//!
//! ### Key Submodules:
//! - `events`: device addresses, trace chunks, parsed results, scan commands
//! - `channels`: typed unbounded FIFO channels between pipeline stages
//! - `time`: `Clock` trait with system and virtual implementations

pub mod channels;
pub mod events;
pub mod time;

pub mod prelude {
    pub use crate::channels::*;
    pub use crate::events::*;
    pub use crate::time::*;
}
