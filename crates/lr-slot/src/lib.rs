//! # lr-slot — LuckyReels Slot Engine
//!
//! Spin outcome and payout engine for a single-player, level-based slot
//! machine with bonus mini-games.
//!
//! ## Features
//!
//! - **Weighted Reels**: Level-gated symbol weights, 3 to 5 reels
//! - **Win Evaluation**: Row scans for 3+ of a kind, feature triggers with fixed priority
//! - **Progression**: XP from winnings, single-step level-ups, bet caps and unlocks
//! - **Mini-Games**: Bonus board, snakes & ladders, scratch card, higher/lower, gamble, loser's door
//! - **Free Spins**: Dice awards, locked bet, auto-spin with forced wins after dry streaks
//! - **Stage Timeline**: Every observable step emitted as an `lr_stage::StageEvent`
//!
//! ## Architecture
//!
//! ```text
//! SlotSession
//!     │
//!     ├── SpinGenerator ── SymbolWeightTable
//!     ├── WinEvaluator ─── Evaluation (outcome + free-spin award)
//!     ├── Payout ───────── PayTable multipliers
//!     ├── ProgressionTracker
//!     ├── FeatureChapter (one open mini-game at most)
//!     └── Scheduler (virtual clock, cancellable transitions)
//!           │
//!           v
//!     SpinResult + StageTrace
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod features;
pub mod generator;
pub mod paytable;
pub mod progression;
pub mod session;
pub mod spin;
pub mod symbols;
pub mod timing;
pub mod weights;

pub use config::*;
pub use error::*;
pub use evaluator::*;
pub use features::{
    ActivationContext, BoxedFeatureChapter, CardColor, Direction, FeatureAction, FeatureChapter,
    FeatureError, FeatureSnapshot, FeatureState, FeatureStep, start_feature,
};
pub use generator::*;
pub use paytable::*;
pub use progression::*;
pub use session::*;
pub use spin::*;
pub use symbols::*;
pub use timing::*;
pub use weights::*;
