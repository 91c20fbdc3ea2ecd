//! Mini-game chapters
//!
//! Every bonus round is a [`FeatureChapter`]: dealt once when it triggers,
//! driven by [`FeatureAction`]s, and resolved exactly once with a payout.
//!
//! | Feature       | Trigger            | Actions                 |
//! |---------------|--------------------|-------------------------|
//! | Bonus Board   | 3+ star            | `Pick`                  |
//! | Snake Board   | 3+ snake           | `Roll`, `Collect`       |
//! | Scratch Card  | 3+ ticket          | `Scratch`               |
//! | Higher/Lower  | 3+ card            | `Guess`, `Collect`      |
//! | Gamble        | regular line win   | `GuessColor`, `Collect` |
//! | Loser's Door  | losing streak      | `Pick`                  |

mod bonus_board;
mod chapter;
mod gamble;
mod higher_lower;
mod losers_door;
mod scratch_card;
mod snake_board;
mod types;

pub use bonus_board::*;
pub use chapter::*;
pub use gamble::*;
pub use higher_lower::*;
pub use losers_door::*;
pub use scratch_card::*;
pub use snake_board::*;
pub use types::*;

use lr_stage::FeatureKind;

use crate::generator::SlotRng;

/// Deal a new mini-game. Free spins are not a chapter and yield `None`.
pub fn start_feature(
    kind: FeatureKind,
    context: &ActivationContext,
    rng: &mut SlotRng,
) -> Option<BoxedFeatureChapter> {
    let chapter: BoxedFeatureChapter = match kind {
        FeatureKind::BonusBoard => Box::new(BonusBoardChapter::start(context, rng)),
        FeatureKind::SnakeBoard => Box::new(SnakeBoardChapter::start(context)),
        FeatureKind::ScratchCard => Box::new(ScratchCardChapter::start(context, rng)),
        FeatureKind::HigherLower => Box::new(HigherLowerChapter::start(context, rng)),
        FeatureKind::Gamble => Box::new(GambleChapter::start(context)),
        FeatureKind::LosersDoor => Box::new(LosersDoorChapter::start(context, rng)),
        FeatureKind::FreeSpins => return None,
    };
    log::debug!("Dealt {} (bet {}, level {})", kind, context.bet, context.level);
    Some(chapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::slot_rng;

    #[test]
    fn test_factory_covers_every_mini_game() {
        let mut rng = slot_rng(Some(4));
        let context = ActivationContext::new(2, 5).with_stake(10);
        for kind in FeatureKind::ALL {
            match start_feature(kind, &context, &mut rng) {
                Some(chapter) => {
                    assert!(kind.is_mini_game());
                    assert_eq!(chapter.kind(), kind);
                    assert!(chapter.state().is_active());
                    assert_eq!(chapter.snapshot().feature, kind);
                }
                None => assert_eq!(kind, FeatureKind::FreeSpins),
            }
        }
    }
}
