//! Battle Session
//!
//! Explicit session state for one player against the bot: the match, the
//! current round, lifetime stats and the seeded RNG. A presentation layer
//! holds one of these and forwards clicks and timer expiries to it.
//!
//! Round flow:
//!
//! ```text
//! start_round ──► round active ──► submit_answer (correct) ──► player wins
//!                      │      └──► submit_answer (wrong)   ──► still active
//!                      └─────────► bot_answer (plan says correct) ──► bot wins
//! ```
//!
//! Whichever resolves first clears the active flag; the other becomes a no-op.

use serde::{Serialize, Deserialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::BattleConfig;
use crate::core::rng::DeterministicRng;
use crate::error::BattleError;
use crate::game::rules::Ability;
use crate::game::state::{MatchState, Side};
use crate::session::bank::ItemBanks;
use crate::session::bot::{BotPlan, plan_bot_attempt};
use crate::session::round::{Prompt, generate_round};
use crate::session::GameMode;

/// Lifetime stats across matches in this session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaStats {
    /// Matches won
    pub wins: u32,
    /// Words-mode rounds won by the player
    pub words: u32,
    /// Coins earned from victories
    pub coins: u32,
    /// Premium currency; nothing awards it yet
    pub gems: u32,
}

/// How a finished match ended, from the player's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Bot defeated
    Victory {
        /// Coins added to [`MetaStats::coins`]
        coins_awarded: u32,
    },
    /// Player defeated
    Defeat,
}

/// Result of the player submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Player won the round
    Correct {
        /// Set when the round finished the match
        result: Option<MatchResult>,
    },
    /// Round continues
    Wrong,
}

/// Result of the bot's timer firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BotOutcome {
    /// Bot won the round
    Won {
        /// Set when the round finished the match
        result: Option<MatchResult>,
    },
    /// Bot's planned answer was wrong; round continues
    Missed,
    /// Round was already resolved or never started
    Ignored,
}

#[derive(Clone, Debug, Default)]
struct RoundState {
    prompt: Option<Prompt>,
    bot_plan: Option<BotPlan>,
    active: bool,
}

/// One player's game session against the bot.
#[derive(Clone, Debug)]
pub struct BattleSession {
    config: BattleConfig,
    banks: ItemBanks,
    rng: DeterministicRng,
    mode: GameMode,
    state: MatchState,
    round: RoundState,
    meta: MetaStats,
}

impl BattleSession {
    /// Create a session with an explicit seed.
    pub fn new(
        config: BattleConfig,
        banks: ItemBanks,
        player_name: impl Into<String>,
        bot_name: impl Into<String>,
        seed: u64,
    ) -> Self {
        Self {
            config,
            banks,
            rng: DeterministicRng::new(seed),
            mode: GameMode::default(),
            state: MatchState::new(player_name, bot_name, seed),
            round: RoundState::default(),
            meta: MetaStats::default(),
        }
    }

    /// Create a session seeded from a match id and the fighters' names.
    pub fn for_match(
        config: BattleConfig,
        banks: ItemBanks,
        match_id: Uuid,
        player_name: &str,
        bot_name: &str,
    ) -> Self {
        let seed = crate::core::rng::derive_match_seed(
            match_id.as_bytes(),
            &[player_name, bot_name],
        );
        Self::new(config, banks, player_name, bot_name, seed)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Session configuration.
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Current question set.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Fighters and event log.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Lifetime stats.
    pub fn meta(&self) -> &MetaStats {
        &self.meta
    }

    /// Current round's prompt, if a round has been drawn.
    pub fn prompt(&self) -> Option<&Prompt> {
        self.round.prompt.as_ref()
    }

    /// Prompt text, or the idle text between rounds.
    pub fn prompt_text(&self) -> &str {
        self.round
            .prompt
            .as_ref()
            .map_or(crate::session::round::IDLE_PROMPT, |p| p.text.as_str())
    }

    /// Bot plan for the current round.
    pub fn bot_plan(&self) -> Option<BotPlan> {
        self.round.bot_plan
    }

    /// A round is waiting for an answer.
    pub fn is_round_active(&self) -> bool {
        self.round.active
    }

    /// Result of the current match once it is over.
    pub fn match_result(&self) -> Option<MatchResult> {
        self.state.winner().map(|winner| self.result_for(winner))
    }

    /// XP bar fill for a side, against the configured display cap.
    pub fn xp_percent(&self, side: Side) -> u32 {
        self.state.fighter(side).xp_percent(self.config.xp_display_cap)
    }

    // =========================================================================
    // ROUND FLOW
    // =========================================================================

    /// Switch question set. Abandons any running round.
    pub fn set_mode(&mut self, mode: GameMode) {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "mode changed");
        }
        self.mode = mode;
        self.reset_round();
    }

    /// Clear prompt, choices, answer and the active flag.
    pub fn reset_round(&mut self) {
        self.round = RoundState::default();
    }

    /// Draw a new round and plan the bot's attempt.
    ///
    /// The caller schedules [`Self::bot_answer`] after `delay_ms`.
    pub fn start_round(&mut self) -> Result<BotPlan, BattleError> {
        if self.state.is_over() {
            return Err(BattleError::MatchOver);
        }

        let prompt = generate_round(self.mode, &self.banks, &self.config, &mut self.rng)?;
        let plan = plan_bot_attempt(self.mode, &self.config.bot, &mut self.rng);

        info!(
            round = self.state.round + 1,
            mode = %self.mode,
            choices = prompt.choices.len(),
            bot_delay_ms = plan.delay_ms,
            "round started"
        );

        self.round = RoundState {
            prompt: Some(prompt),
            bot_plan: Some(plan),
            active: true,
        };
        Ok(plan)
    }

    /// Player picked `answer`.
    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome, BattleError> {
        if !self.round.active {
            return Err(BattleError::RoundNotActive);
        }
        let correct = self
            .round
            .prompt
            .as_ref()
            .is_some_and(|p| p.is_correct(answer));

        if !correct {
            debug!(answer, "wrong answer");
            return Ok(AnswerOutcome::Wrong);
        }

        self.round.active = false;
        if self.mode == GameMode::Words {
            self.meta.words += 1;
        }
        let result = self.finish_round(Side::Player);
        Ok(AnswerOutcome::Correct { result })
    }

    /// The bot's timer fired.
    pub fn bot_answer(&mut self) -> BotOutcome {
        if !self.round.active {
            return BotOutcome::Ignored;
        }
        let answers_correctly = self.round.bot_plan.is_some_and(|p| p.answers_correctly);
        if !answers_correctly {
            debug!("bot missed");
            return BotOutcome::Missed;
        }

        self.round.active = false;
        let result = self.finish_round(Side::Bot);
        BotOutcome::Won { result }
    }

    /// Player spends XP on an ability. Allowed between rounds too.
    pub fn use_ability(&mut self, ability: Ability) -> Result<Option<MatchResult>, BattleError> {
        if self.state.is_over() {
            return Err(BattleError::MatchOver);
        }

        let available = self.state.player.battle_xp;
        if !self.state.use_ability(Side::Player, ability) {
            warn!(%ability, needed = ability.cost(), available, "ability rejected");
            return Err(BattleError::InsufficientXp {
                ability,
                needed: ability.cost(),
                available,
            });
        }

        info!(
            %ability,
            player_xp = self.state.player.battle_xp,
            bot_hp = self.state.bot.hp,
            "ability used"
        );
        Ok(self.check_match_end())
    }

    /// Same as [`Self::use_ability`] with a button key.
    pub fn use_ability_key(&mut self, key: &str) -> Result<Option<MatchResult>, BattleError> {
        let ability: Ability = key.parse()?;
        self.use_ability(ability)
    }

    /// Fresh fighters for another match; stats and RNG stream carry over.
    pub fn rematch(&mut self) {
        let player = self.state.player.name.clone();
        let bot = self.state.bot.name.clone();
        self.state = MatchState::new(player, bot, self.state.rng_seed);
        self.reset_round();
        info!("rematch");
    }

    fn finish_round(&mut self, winner: Side) -> Option<MatchResult> {
        self.state.resolve_round(winner);
        info!(
            round = self.state.round,
            winner = winner.label(),
            player_hp = self.state.player.hp,
            bot_hp = self.state.bot.hp,
            "round resolved"
        );
        self.check_match_end()
    }

    /// Apply end-of-match bookkeeping. Only reachable once per match since
    /// every entry point refuses to act on a finished match.
    fn check_match_end(&mut self) -> Option<MatchResult> {
        let winner = self.state.winner()?;
        self.round.active = false;

        let result = self.result_for(winner);
        if let MatchResult::Victory { coins_awarded } = result {
            self.meta.wins += 1;
            self.meta.coins += coins_awarded;
        }

        info!(?result, rounds = self.state.round, "match over");
        Some(result)
    }

    fn result_for(&self, winner: Side) -> MatchResult {
        match winner {
            Side::Player => MatchResult::Victory {
                coins_awarded: self.config.victory_coins,
            },
            Side::Bot => MatchResult::Defeat,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::bank::{MathBank, MathProblem, WordBank};

    fn banks() -> ItemBanks {
        ItemBanks::new(
            WordBank {
                words: ["river", "stone", "bright", "whisper", "garden"]
                    .iter()
                    .map(|w| w.to_string())
                    .collect(),
            },
            MathBank {
                problems: vec![MathProblem::new("5 + 3", 8, [6, 7, 8, 9])],
            },
        )
    }

    fn session() -> BattleSession {
        BattleSession::new(BattleConfig::default(), banks(), "You", "Bot", 12345)
    }

    fn always_correct_bot() -> BattleConfig {
        let mut config = BattleConfig::default();
        config.bot.accuracy_percent = 100;
        config
    }

    fn correct_answer(s: &BattleSession) -> String {
        s.prompt().map(|p| p.correct_answer.clone()).unwrap_or_default()
    }

    #[test]
    fn test_player_wins_round() {
        let mut s = session();
        s.start_round().unwrap();
        assert!(s.is_round_active());

        let answer = correct_answer(&s);
        assert_eq!(
            s.submit_answer(&answer),
            Ok(AnswerOutcome::Correct { result: None })
        );
        assert!(!s.is_round_active());
        assert_eq!(s.state().player.battle_xp, 3);
        assert_eq!(s.state().bot.hp, 95);
        assert_eq!(s.meta().words, 1);

        // Bot timer firing afterwards does nothing
        assert_eq!(s.bot_answer(), BotOutcome::Ignored);
        assert_eq!(s.state().player.hp, 100);

        assert_eq!(s.submit_answer(&answer), Err(BattleError::RoundNotActive));
    }

    #[test]
    fn test_wrong_answer_keeps_round() {
        let mut s = session();
        s.start_round().unwrap();

        assert_eq!(s.submit_answer("definitely not a choice"), Ok(AnswerOutcome::Wrong));
        assert!(s.is_round_active());
        assert_eq!(s.state().round, 0);
    }

    #[test]
    fn test_bot_wins_round() {
        let mut s = BattleSession::new(always_correct_bot(), banks(), "You", "Bot", 1);
        s.start_round().unwrap();

        assert_eq!(s.bot_answer(), BotOutcome::Won { result: None });
        assert_eq!(s.state().bot.battle_xp, 3);
        assert_eq!(s.state().player.hp, 95);

        let answer = correct_answer(&s);
        assert_eq!(s.submit_answer(&answer), Err(BattleError::RoundNotActive));
        assert_eq!(s.meta().words, 0);
    }

    #[test]
    fn test_bot_miss_does_not_resolve() {
        let mut config = BattleConfig::default();
        config.bot.accuracy_percent = 0;
        let mut s = BattleSession::new(config, banks(), "You", "Bot", 1);
        s.start_round().unwrap();

        assert_eq!(s.bot_answer(), BotOutcome::Missed);
        assert!(s.is_round_active());
    }

    #[test]
    fn test_math_round_does_not_count_words() {
        let mut s = session();
        s.set_mode(GameMode::Math);
        s.start_round().unwrap();
        assert_eq!(s.prompt_text(), "5 + 3");

        assert_eq!(s.submit_answer("8"), Ok(AnswerOutcome::Correct { result: None }));
        assert_eq!(s.meta().words, 0);
    }

    #[test]
    fn test_mode_change_resets_round() {
        let mut s = session();
        s.start_round().unwrap();

        s.set_mode(GameMode::Math);
        assert!(!s.is_round_active());
        assert!(s.prompt().is_none());
        assert!(s.bot_plan().is_none());
        assert_eq!(s.prompt_text(), "Ready?");
    }

    #[test]
    fn test_empty_bank_error() {
        let mut s = BattleSession::new(BattleConfig::default(), ItemBanks::default(), "You", "Bot", 1);
        assert_eq!(s.start_round(), Err(BattleError::EmptyBank(GameMode::Words)));
        assert!(!s.is_round_active());
    }

    #[test]
    fn test_victory_awards_once() {
        let mut s = session();
        for _ in 0..20 {
            s.start_round().unwrap();
            let answer = correct_answer(&s);
            let outcome = s.submit_answer(&answer).unwrap();
            if s.state().bot.hp == 0 {
                assert_eq!(
                    outcome,
                    AnswerOutcome::Correct {
                        result: Some(MatchResult::Victory { coins_awarded: 10 })
                    }
                );
            }
        }

        assert!(s.state().bot.is_defeated());
        assert_eq!(s.meta().wins, 1);
        assert_eq!(s.meta().coins, 10);
        assert_eq!(s.meta().words, 20);
        assert_eq!(s.state().player.battle_xp, 60);

        assert_eq!(s.start_round(), Err(BattleError::MatchOver));
        assert_eq!(s.use_ability(Ability::Heal), Err(BattleError::MatchOver));
        assert_eq!(s.match_result(), Some(MatchResult::Victory { coins_awarded: 10 }));
    }

    #[test]
    fn test_defeat() {
        let mut s = BattleSession::new(always_correct_bot(), banks(), "You", "Bot", 1);
        let mut last = BotOutcome::Ignored;
        while !s.state().is_over() {
            s.start_round().unwrap();
            last = s.bot_answer();
        }

        assert_eq!(last, BotOutcome::Won { result: Some(MatchResult::Defeat) });
        assert_eq!(s.state().round, 20);
        assert_eq!(s.meta().wins, 0);
        assert_eq!(s.meta().coins, 0);
    }

    #[test]
    fn test_ability_use() {
        let mut s = session();
        assert_eq!(
            s.use_ability(Ability::Attack),
            Err(BattleError::InsufficientXp { ability: Ability::Attack, needed: 5, available: 0 })
        );

        for _ in 0..4 {
            s.start_round().unwrap();
            let answer = correct_answer(&s);
            s.submit_answer(&answer).unwrap();
        }
        assert_eq!(s.state().player.battle_xp, 12);
        assert_eq!(s.state().bot.hp, 80);

        assert_eq!(s.use_ability_key("heavy"), Ok(None));
        assert_eq!(s.state().bot.hp, 60);
        assert_eq!(s.state().player.battle_xp, 2);

        assert_eq!(
            s.use_ability_key("meteor"),
            Err(BattleError::UnknownAbility("meteor".to_string()))
        );
    }

    #[test]
    fn test_ability_finishing_blow() {
        let mut s = session();
        // 19 rounds: bot at 5 hp, player at 57 XP
        for _ in 0..19 {
            s.start_round().unwrap();
            let answer = correct_answer(&s);
            s.submit_answer(&answer).unwrap();
        }
        assert_eq!(s.state().bot.hp, 5);

        assert_eq!(
            s.use_ability(Ability::Attack),
            Ok(Some(MatchResult::Victory { coins_awarded: 10 }))
        );
        assert_eq!(s.meta().wins, 1);
    }

    #[test]
    fn test_xp_bar_uses_display_cap() {
        let config = BattleConfig { xp_display_cap: 12, ..always_correct_bot() };
        let mut s = BattleSession::new(config, banks(), "You", "Bot", 1);
        assert_eq!(s.xp_percent(Side::Player), 0);

        for _ in 0..2 {
            s.start_round().unwrap();
            let answer = correct_answer(&s);
            s.submit_answer(&answer).unwrap();
        }
        assert_eq!(s.state().player.battle_xp, 6);
        assert_eq!(s.xp_percent(Side::Player), 50);
        assert_eq!(s.xp_percent(Side::Bot), 0);

        for _ in 0..3 {
            s.start_round().unwrap();
            let answer = correct_answer(&s);
            s.submit_answer(&answer).unwrap();
        }
        // 15 XP shows as a full bar; the XP itself is not clamped
        assert_eq!(s.state().player.battle_xp, 15);
        assert_eq!(s.xp_percent(Side::Player), 100);
    }

    #[test]
    fn test_rematch_keeps_stats() {
        let mut s = BattleSession::new(always_correct_bot(), banks(), "You", "Bot", 1);
        s.start_round().unwrap();
        let answer = correct_answer(&s);
        s.submit_answer(&answer).unwrap();

        s.rematch();
        assert_eq!(s.state().player.battle_xp, 0);
        assert_eq!(s.state().bot.hp, 100);
        assert_eq!(s.state().round, 0);
        assert_eq!(s.meta().words, 1);
        assert!(!s.is_round_active());
    }

    #[test]
    fn test_seeded_sessions_agree() {
        let id = Uuid::from_bytes([7; 16]);
        let mut a = BattleSession::for_match(BattleConfig::default(), banks(), id, "You", "Bot");
        let mut b = BattleSession::for_match(BattleConfig::default(), banks(), id, "You", "Bot");

        for _ in 0..10 {
            assert_eq!(a.start_round(), b.start_round());
            assert_eq!(a.prompt(), b.prompt());
            assert_eq!(a.bot_answer(), b.bot_answer());
        }
        assert_eq!(a.state().compute_hash(), b.state().compute_hash());
    }
}
