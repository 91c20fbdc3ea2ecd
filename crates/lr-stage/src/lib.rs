//! # lr-stage — LuckyReels Stage Timeline
//!
//! Defines the canonical stages a LuckyReels session passes through.
//! The game core emits stages; a presentation layer only ever reads them.
//!
//! ## Philosophy
//!
//! Every round, whatever it pays, walks the same semantic phases:
//! - Spin starts → Reels stop → Wins evaluated → Features entered/exited
//!
//! Session-level phases (level-ups, auto-spin, game over, reset) share the
//! same timeline so a single trace describes everything a player could see.

pub mod event;
pub mod stage;
pub mod taxonomy;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use taxonomy::*;
pub use trace::*;
