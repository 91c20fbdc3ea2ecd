//! Slot Session — owns the whole spin/feature cycle
//!
//! A session is one player at one machine: balance, bet, level, free-spin
//! bank, loss streaks and at most one open mini-game. Every delayed step
//! runs through the [`Scheduler`], so nothing happens until the caller
//! advances the clock with [`SlotSession::advance`], [`SlotSession::step`]
//! or [`SlotSession::settle`].
//!
//! ```text
//! Idle ──spin()──▶ Spinning ──RevealSpin──▶ Resolving ──▶ Idle
//!                                               │
//!                                               └──▶ FeatureActive ──CloseFeature──▶ Idle
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use lr_stage::{FeatureKind, Stage, StageEvent, StagePayload, StageTrace};

use crate::config::SessionConfig;
use crate::error::{ConfigResult, SpinRejection};
use crate::evaluator::WinEvaluator;
use crate::features::{
    self, ActivationContext, BoxedFeatureChapter, FeatureAction, FeatureError, FeatureSnapshot,
    FeatureStep,
};
use crate::generator::{SlotRng, SpinGenerator, slot_rng};
use crate::paytable::{PayTable, Payout};
use crate::progression::{ProgressionTracker, Unlock, max_bet};
use crate::spin::SpinResult;
use crate::symbols::ReelGrid;
use crate::timing::{Scheduler, TimingConfig, Transition};

/// Where the session is in its cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "feature", rename_all = "snake_case")]
pub enum SessionPhase {
    /// Ready for a spin
    Idle,
    /// Reels moving, reveal pending
    Spinning,
    /// Grid being evaluated and settled
    Resolving,
    /// A mini-game owns the session until it closes
    FeatureActive(FeatureKind),
    /// Balance exhausted, reset pending
    GameOver,
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub free_spins_played: u64,
    /// Bets of regular spins, debited or not
    pub total_bet: u64,
    /// Bets actually taken from the balance
    pub total_debited: u64,
    /// Everything credited: lines, mini-games, gamble collections
    pub total_won: u64,
    pub line_wins: u64,
    pub losses: u64,
    /// Mini-games opened and free-spin awards, by feature
    pub features: BTreeMap<FeatureKind, u64>,
    pub free_spins_awarded: u64,
    pub level_ups: u64,
    pub max_level: u32,
    pub resets: u64,
    pub max_balance: i64,
}

impl SessionStats {
    /// Calculate RTP
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0 {
            (self.total_won as f64 / self.total_bet as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            (self.line_wins as f64 / self.total_spins as f64) * 100.0
        } else {
            0.0
        }
    }

    /// Times `feature` was entered
    pub fn feature_count(&self, feature: FeatureKind) -> u64 {
        self.features.get(&feature).copied().unwrap_or(0)
    }
}

/// Spin accepted but not yet revealed
#[derive(Debug, Clone)]
struct PendingSpin {
    grid: ReelGrid,
    free_spin: bool,
    bet: u64,
    level: u32,
}

struct ActiveFeature {
    chapter: BoxedFeatureChapter,
    /// Positive payouts feed progression (everything but the gamble)
    grants_xp: bool,
}

/// Slot Session
pub struct SlotSession {
    config: SessionConfig,
    timing: TimingConfig,
    rng: SlotRng,
    generator: SpinGenerator,
    progression: ProgressionTracker,
    scheduler: Scheduler,
    trace: StageTrace,
    stats: SessionStats,

    balance: i64,
    bet: u64,
    free_spins: u32,
    auto_spin: bool,
    loss_streak: u32,
    free_loss_streak: u32,
    /// Regular line win held by an open gamble
    pending_win: u64,
    phase: SessionPhase,
    pending_spin: Option<PendingSpin>,
    feature: Option<ActiveFeature>,
    level_up_visible: bool,
    spin_count: u64,
    last_spin: Option<SpinResult>,
}

impl SlotSession {
    /// Create a session from a validated configuration
    pub fn new(config: SessionConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Seeded zero-delay session
    pub fn instant(seed: u64) -> Self {
        Self::build(SessionConfig::instant(seed))
    }

    fn build(config: SessionConfig) -> Self {
        let session_id = match config.seed {
            Some(seed) => format!("session-{seed}"),
            None => "session".to_string(),
        };
        if config.starting_bet > max_bet(1) {
            log::warn!(
                "Starting bet {} exceeds the level 1 cap, using {}",
                config.starting_bet,
                max_bet(1)
            );
        }
        let stats = SessionStats {
            max_level: 1,
            max_balance: config.starting_balance,
            ..Default::default()
        };
        Self {
            timing: config.timing_config(),
            rng: slot_rng(config.seed),
            generator: SpinGenerator::new(config.forced_win_after),
            progression: ProgressionTracker::new(),
            scheduler: Scheduler::new(),
            trace: StageTrace::new(session_id),
            stats,
            balance: config.starting_balance,
            bet: config.starting_bet.clamp(1, max_bet(1)),
            free_spins: 0,
            auto_spin: false,
            loss_streak: 0,
            free_loss_streak: 0,
            pending_win: 0,
            phase: SessionPhase::Idle,
            pending_spin: None,
            feature: None,
            level_up_visible: false,
            spin_count: 0,
            last_spin: None,
            config,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STATE
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn xp(&self) -> u64 {
        self.progression.xp()
    }

    pub fn xp_needed(&self) -> u64 {
        self.progression.xp_needed()
    }

    pub fn progression(&self) -> &ProgressionTracker {
        &self.progression
    }

    pub fn free_spins(&self) -> u32 {
        self.free_spins
    }

    pub fn is_auto_spinning(&self) -> bool {
        self.auto_spin
    }

    pub fn loss_streak(&self) -> u32 {
        self.loss_streak
    }

    pub fn free_loss_streak(&self) -> u32 {
        self.free_loss_streak
    }

    pub fn pending_win(&self) -> u64 {
        self.pending_win
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    /// Mini-game currently open
    pub fn active_feature(&self) -> Option<FeatureKind> {
        self.feature.as_ref().map(|f| f.chapter.kind())
    }

    pub fn feature_snapshot(&self) -> Option<FeatureSnapshot> {
        self.feature.as_ref().map(|f| f.chapter.snapshot())
    }

    pub fn level_up_visible(&self) -> bool {
        self.level_up_visible
    }

    pub fn last_spin(&self) -> Option<&SpinResult> {
        self.last_spin.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn trace(&self) -> &StageTrace {
        &self.trace
    }

    /// Take every stage emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        self.trace.drain()
    }

    /// Virtual clock reading
    pub fn now_ms(&self) -> f64 {
        self.scheduler.now_ms()
    }

    pub fn max_bet(&self) -> u64 {
        self.progression.max_bet()
    }

    pub fn prestige(&self) -> Option<u32> {
        self.progression.prestige()
    }

    pub fn unlocked_features(&self) -> Vec<Unlock> {
        self.progression.unlocked_features()
    }

    pub fn next_unlock_level(&self) -> u32 {
        self.progression.next_unlock_level()
    }

    /// Paytable at the current level
    pub fn paytable(&self) -> PayTable {
        PayTable::for_level(self.level())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // PLAYER CONTROLS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Set the bet, clamped to `1..=max_bet`. Locked while free spins remain.
    pub fn set_bet(&mut self, bet: u64) -> u64 {
        if self.free_spins > 0 {
            log::debug!("Bet locked at {} during free spins", self.bet);
            return self.bet;
        }
        self.bet = bet.clamp(1, self.max_bet());
        self.bet
    }

    /// Step the bet up or down
    pub fn change_bet(&mut self, delta: i64) -> u64 {
        let target = (self.bet as i64).saturating_add(delta).max(1) as u64;
        self.set_bet(target)
    }

    /// Request a spin with freshly drawn reels
    pub fn spin(&mut self) -> Result<(), SpinRejection> {
        self.start_spin(None)
    }

    /// Request a spin that lands on `grid`
    pub fn spin_with_grid(&mut self, grid: ReelGrid) -> Result<(), SpinRejection> {
        self.start_spin(Some(grid))
    }

    /// Act inside the open mini-game
    pub fn play(&mut self, action: FeatureAction) -> Result<FeatureStep, FeatureError> {
        let (kind, step) = {
            let active = self
                .feature
                .as_mut()
                .ok_or(FeatureError::NoActiveFeature)?;
            let step = active.chapter.play(action, &mut self.rng)?;
            (active.chapter.kind(), step)
        };

        if let FeatureStep::Complete { payout } = step {
            log::debug!("{} resolved with payout {}", kind, payout);
            self.emit(Stage::FeatureResolved {
                feature: kind,
                payout,
            });
            let delay = if kind == FeatureKind::Gamble {
                0.0
            } else {
                self.timing.feature_close_ms
            };
            self.scheduler.schedule(delay, Transition::CloseFeature);
        }
        Ok(step)
    }

    /// Take the current amount of the open mini-game
    pub fn collect(&mut self) -> Result<FeatureStep, FeatureError> {
        self.play(FeatureAction::Collect)
    }

    /// Open a feature directly (tools and scenario setup)
    pub fn force_feature(&mut self, kind: FeatureKind) -> Result<(), SpinRejection> {
        self.ensure_idle()?;
        match kind {
            FeatureKind::FreeSpins => {
                self.award_free_spins(3);
                self.schedule_auto_spin(self.timing.auto_spin_interval_ms);
            }
            FeatureKind::Gamble => {
                let context = ActivationContext::new(self.bet, self.level()).with_stake(self.bet);
                self.pending_win = self.bet;
                self.open_feature(kind, context, false);
            }
            _ => {
                let context = ActivationContext::new(self.bet, self.level());
                self.open_feature(kind, context, true);
            }
        }
        Ok(())
    }

    /// Jump to a level (scenario setup, tools)
    pub fn set_level(&mut self, level: u32) {
        self.progression.set_level(level);
        self.stats.max_level = self.stats.max_level.max(self.level());
        self.bet = self.bet.clamp(1, self.max_bet());
    }

    /// Overwrite the balance (scenario setup, tools)
    pub fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    /// Restore starting values and drop every pending timer
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.balance = self.config.starting_balance;
        self.bet = self.config.starting_bet.clamp(1, max_bet(1));
        self.progression.reset();
        self.free_spins = 0;
        self.auto_spin = false;
        self.loss_streak = 0;
        self.free_loss_streak = 0;
        self.pending_win = 0;
        self.pending_spin = None;
        self.feature = None;
        self.level_up_visible = false;
        self.phase = SessionPhase::Idle;
        self.stats.resets += 1;

        log::info!("Session reset (balance {})", self.balance);
        self.emit(Stage::SessionReset {
            balance: self.balance,
        });
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CLOCK
    // ═══════════════════════════════════════════════════════════════════════════

    /// Move the clock forward, firing everything due on the way
    pub fn advance(&mut self, ms: f64) -> usize {
        let until = self.scheduler.now_ms() + ms.max(0.0);
        let mut fired = 0;
        while let Some(transition) = self.scheduler.pop_due(until) {
            self.apply(transition);
            fired += 1;
        }
        self.scheduler.set_now(until);
        fired
    }

    /// Fire the next pending transition, jumping the clock to it
    pub fn step(&mut self) -> Option<Transition> {
        let due = self.scheduler.next_due_ms()?;
        let transition = self.scheduler.pop_due(due)?;
        self.apply(transition);
        Some(transition)
    }

    /// Fire transitions until nothing is pending. Stops early when a
    /// mini-game waits for the player, since it schedules nothing.
    pub fn settle(&mut self) -> usize {
        let mut fired = 0;
        while self.step().is_some() {
            fired += 1;
        }
        fired
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::RevealSpin => self.reveal_spin(),
            Transition::AutoSpin => self.auto_spin_tick(),
            Transition::DismissLevelUp => self.dismiss_level_up(),
            Transition::CloseFeature => self.close_feature(),
            Transition::ResetSession => self.reset(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN CYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    fn ensure_idle(&self) -> Result<(), SpinRejection> {
        match self.phase {
            SessionPhase::Idle => Ok(()),
            SessionPhase::Spinning | SessionPhase::Resolving => Err(SpinRejection::AlreadySpinning),
            SessionPhase::FeatureActive(kind) => Err(SpinRejection::FeatureActive(kind)),
            SessionPhase::GameOver => Err(SpinRejection::GameOver),
        }
    }

    fn check_can_spin(&self) -> Result<(), SpinRejection> {
        self.ensure_idle()?;
        if self.free_spins == 0 && self.balance < self.bet as i64 {
            return Err(SpinRejection::InsufficientBalance {
                balance: self.balance,
                bet: self.bet,
            });
        }
        Ok(())
    }

    fn start_spin(&mut self, grid: Option<ReelGrid>) -> Result<(), SpinRejection> {
        if let Err(rejection) = self.check_can_spin() {
            log::debug!("Spin rejected: {}", rejection);
            return Err(rejection);
        }

        let free_spin = self.free_spins > 0;
        if free_spin {
            self.free_spins -= 1;
        }
        let level = self.level();
        let grid = match grid {
            Some(grid) => grid,
            None => self
                .generator
                .spin(&mut self.rng, level, free_spin, self.free_loss_streak),
        };

        self.scheduler.cancel_transition(Transition::AutoSpin);
        self.spin_count += 1;
        self.phase = SessionPhase::Spinning;
        self.pending_spin = Some(PendingSpin {
            grid,
            free_spin,
            bet: self.bet,
            level,
        });
        self.emit(Stage::SpinStart { free_spin });
        self.scheduler
            .schedule(self.timing.spin_reveal_ms, Transition::RevealSpin);
        Ok(())
    }

    fn reveal_spin(&mut self) {
        let Some(PendingSpin {
            grid,
            free_spin,
            bet,
            level,
        }) = self.pending_spin.take()
        else {
            return;
        };
        self.phase = SessionPhase::Resolving;

        for (index, reel) in grid.reels().iter().enumerate() {
            self.emit(Stage::ReelStop {
                reel_index: index as u8,
                symbols: reel.iter().map(|s| s.id()).collect(),
            });
        }
        self.emit(Stage::EvaluateWins);

        let evaluation = WinEvaluator::evaluate(&grid, level);
        let payout = Payout::price(evaluation.line_matches(), level, bet);

        self.stats.total_spins += 1;
        if free_spin {
            self.stats.free_spins_played += 1;
        } else {
            self.stats.total_bet += bet;
        }

        let debited = if !free_spin && !evaluation.is_scoring() {
            bet
        } else {
            0
        };
        if debited > 0 {
            self.balance -= debited as i64;
            self.stats.total_debited += debited;
            self.emit(Stage::BetDebit { amount: debited });
        }

        // Dice only bank spins from a regular spin
        let dice = if free_spin {
            None
        } else {
            evaluation.free_spin_dice
        };
        let free_spins_awarded = match dice {
            Some(dice) => self.award_free_spins(dice),
            None => 0,
        };

        let mut feature = None;
        if let Some(kind) = evaluation.feature() {
            self.loss_streak = 0;
            // Every trigger but the bonus board still counts toward the forced win
            if free_spin && kind != FeatureKind::BonusBoard {
                self.free_loss_streak += 1;
            }
            self.open_feature(kind, ActivationContext::new(bet, level), true);
            feature = Some(kind);
        } else if payout.is_win() {
            self.stats.line_wins += 1;
            self.present_win(&payout);
            if free_spin {
                self.free_loss_streak = 0;
                self.credit(payout.total);
                self.grant_xp(payout.total);
            } else {
                self.loss_streak = 0;
                self.grant_xp(payout.total);
                self.pending_win = payout.total;
                self.emit(Stage::GambleOffer {
                    amount: payout.total,
                });
                let context = ActivationContext::new(bet, level).with_stake(payout.total);
                self.open_feature(FeatureKind::Gamble, context, false);
                feature = Some(FeatureKind::Gamble);
            }
        } else if dice.is_none() {
            self.stats.losses += 1;
            if free_spin {
                self.free_loss_streak += 1;
            } else {
                self.loss_streak += 1;
                if self.loss_streak >= self.config.loss_streak_trigger {
                    log::info!("{} scoreless spins, opening loser's door", self.loss_streak);
                    self.loss_streak = 0;
                    self.open_feature(FeatureKind::LosersDoor, ActivationContext::new(bet, level), true);
                    feature = Some(FeatureKind::LosersDoor);
                }
            }
        }

        log::debug!(
            "Spin #{} resolved: level {}, free {}, win {}, debited {}, balance {}",
            self.spin_count,
            level,
            free_spin,
            payout.total,
            debited,
            self.balance
        );

        let payload = self.payload().with_grid(grid.to_ids());
        self.emit_with(Stage::SpinEnd, payload);

        if free_spin && self.free_spins == 0 {
            log::info!("Free spins complete");
            self.emit(Stage::FreeSpinsComplete);
            self.stop_auto_spin();
        }

        self.last_spin = Some(SpinResult {
            spin_index: self.spin_count,
            grid,
            bet,
            level,
            is_free_spin: free_spin,
            evaluation,
            payout,
            debited,
            free_spins_awarded,
            feature,
        });

        if self.feature.is_none() {
            self.phase = SessionPhase::Idle;
            self.schedule_auto_spin(self.timing.auto_spin_interval_ms);
            self.check_game_over();
        }
    }

    fn present_win(&mut self, payout: &Payout) {
        let payload = self.payload().with_win_lines(payout.win_lines());
        self.emit_with(
            Stage::WinPresent {
                win_amount: payout.total,
                line_count: payout.lines.len().min(u8::MAX as usize) as u8,
            },
            payload,
        );
        for line in &payout.lines {
            self.emit(Stage::WinLineShow {
                row: line.row,
                symbol_id: line.symbol.id(),
                match_count: line.match_count,
                amount: line.amount,
            });
        }
    }

    /// Bank free spins for `dice` dice; returns the spins added
    fn award_free_spins(&mut self, dice: u32) -> u32 {
        let count = dice.saturating_mul(self.config.free_spins_per_die);
        self.free_spins = self.free_spins.saturating_add(count);
        self.free_loss_streak = 0;
        self.loss_streak = 0;
        self.stats.free_spins_awarded += count as u64;
        *self.stats.features.entry(FeatureKind::FreeSpins).or_insert(0) += 1;

        log::info!("{} free spins awarded ({} banked)", count, self.free_spins);
        self.emit(Stage::FreeSpinsAwarded {
            count,
            total: self.free_spins,
        });
        if !self.auto_spin {
            self.auto_spin = true;
            self.emit(Stage::AutoSpinStart {
                remaining: self.free_spins,
            });
        }
        count
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // FEATURES
    // ═══════════════════════════════════════════════════════════════════════════

    fn open_feature(&mut self, kind: FeatureKind, context: ActivationContext, grants_xp: bool) {
        let Some(chapter) = features::start_feature(kind, &context, &mut self.rng) else {
            return;
        };
        log::info!("{} entered", kind);
        *self.stats.features.entry(kind).or_insert(0) += 1;
        self.feature = Some(ActiveFeature { chapter, grants_xp });
        self.phase = SessionPhase::FeatureActive(kind);
        self.scheduler.cancel_transition(Transition::AutoSpin);
        self.emit(Stage::FeatureEnter { feature: kind });
    }

    fn close_feature(&mut self) {
        let Some(active) = self.feature.take() else {
            return;
        };
        let kind = active.chapter.kind();
        let payout = active.chapter.payout().unwrap_or(0);

        if kind == FeatureKind::Gamble {
            self.pending_win = 0;
        }
        self.credit(payout);
        if active.grants_xp && payout > 0 {
            self.grant_xp(payout);
        }

        log::info!("{} closed, paid {}", kind, payout);
        self.emit(Stage::FeatureExit {
            feature: kind,
            payout,
        });

        self.phase = SessionPhase::Idle;
        self.schedule_auto_spin(self.timing.feature_resume_ms);
        self.check_game_over();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MONEY & PROGRESSION
    // ═══════════════════════════════════════════════════════════════════════════

    fn credit(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.balance = self.balance.saturating_add(amount as i64);
        self.stats.total_won += amount;
        self.stats.max_balance = self.stats.max_balance.max(self.balance);
        self.emit(Stage::WinCredit { amount });
    }

    fn grant_xp(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        let grant = self.progression.add_xp(amount);
        self.emit(Stage::XpGain {
            gained: grant.gained,
            xp: grant.xp,
            needed: self.progression.xp_needed(),
        });

        if grant.leveled_up {
            log::info!("Level up: {}", grant.level);
            self.stats.level_ups += 1;
            self.stats.max_level = self.stats.max_level.max(grant.level);
            self.emit(Stage::LevelUp { level: grant.level });

            self.level_up_visible = true;
            self.scheduler.cancel_transition(Transition::DismissLevelUp);
            self.scheduler
                .schedule(self.timing.level_up_display_ms, Transition::DismissLevelUp);
        }
    }

    fn dismiss_level_up(&mut self) {
        if !self.level_up_visible {
            return;
        }
        self.level_up_visible = false;
        self.emit(Stage::LevelUpDismissed {
            level: self.level(),
        });
        self.schedule_auto_spin(self.timing.auto_spin_interval_ms);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // AUTO-SPIN & GAME OVER
    // ═══════════════════════════════════════════════════════════════════════════

    fn can_auto_spin(&self) -> bool {
        self.auto_spin
            && self.free_spins > 0
            && self.phase == SessionPhase::Idle
            && !self.level_up_visible
    }

    fn schedule_auto_spin(&mut self, delay_ms: f64) {
        if !self.can_auto_spin() {
            return;
        }
        self.scheduler.cancel_transition(Transition::AutoSpin);
        self.scheduler.schedule(delay_ms, Transition::AutoSpin);
    }

    fn auto_spin_tick(&mut self) {
        if !self.can_auto_spin() {
            return;
        }
        if let Err(rejection) = self.start_spin(None) {
            log::debug!("Auto-spin skipped: {}", rejection);
        }
    }

    fn stop_auto_spin(&mut self) {
        self.scheduler.cancel_transition(Transition::AutoSpin);
        if self.auto_spin {
            self.auto_spin = false;
            self.emit(Stage::AutoSpinStop);
        }
    }

    fn check_game_over(&mut self) {
        if self.phase != SessionPhase::Idle
            || self.balance > 0
            || self.free_spins > 0
            || self.pending_win > 0
            || self.feature.is_some()
        {
            return;
        }
        log::info!("Game over at spin #{}", self.spin_count);
        self.phase = SessionPhase::GameOver;
        self.stop_auto_spin();
        self.emit(Stage::GameOver);
        self.scheduler
            .schedule(self.timing.game_over_reset_ms, Transition::ResetSession);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // STAGES
    // ═══════════════════════════════════════════════════════════════════════════

    fn payload(&self) -> StagePayload {
        StagePayload::session(
            self.balance,
            self.bet,
            self.level(),
            self.xp(),
            self.free_spins,
        )
    }

    fn emit(&mut self, stage: Stage) {
        let payload = self.payload();
        self.emit_with(stage, payload);
    }

    fn emit_with(&mut self, stage: Stage, payload: StagePayload) {
        let event = StageEvent::with_payload(stage, self.scheduler.now_ms(), payload);
        self.trace.push(event);
    }
}

impl Default for SlotSession {
    fn default() -> Self {
        Self::build(SessionConfig::default())
    }
}
