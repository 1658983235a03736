//! Word Battle demo
//!
//! Plays a scripted player against the bot on the built-in item banks, then
//! replays the same match from the same seed and checks the state hashes agree.
//!
//! Usage: `word-battle-server [seed] [words|math]`

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use word_battle::{
    VERSION,
    Ability, BattleConfig, BattleSession, DeterministicRng, GameMode, ItemBanks,
    core::hash::StateHash,
    session::{
        AnswerOutcome, BotOutcome, MatchResult,
        bank::{MathBank, MathProblem, WordBank},
    },
};

/// Safety stop for the demo loop.
const MAX_ROUNDS: u32 = 200;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid seed: {raw}"))?,
        None => 12345,
    };
    let mode = match args.next() {
        None => GameMode::default(),
        Some(raw) => GameMode::parse_known(&raw).unwrap_or_else(|| {
            warn!("unknown mode {:?}, expected words or math; using words", raw);
            GameMode::Words
        }),
    };

    info!("Word Battle v{}", VERSION);
    info!("Seed: {}, mode: {} ({})", seed, mode, mode.title());
    info!("{}", mode.subtitle());

    let (hash, result) = demo_match(seed, mode)?;
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let (replay_hash, replay_result) = demo_match(seed, mode)?;
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash != replay_hash || result != replay_result {
        bail!("determinism failure: replay diverged");
    }
    info!("DETERMINISM VERIFIED: Hashes match!");
    Ok(())
}

/// Run one match to completion.
fn demo_match(seed: u64, mode: GameMode) -> Result<(StateHash, MatchResult)> {
    let mut session = BattleSession::new(BattleConfig::default(), demo_banks(), "You", "Bot", seed);
    session.set_mode(mode);

    // The scripted player gets its own stream so it never shifts the session's
    let mut player = DeterministicRng::new(seed ^ 0x5EED);

    for _ in 0..MAX_ROUNDS {
        spend_xp(&mut session);
        if let Some(result) = session.match_result() {
            return finish(&session, result);
        }

        let plan = session.start_round()?;
        let player_delay = 900 + player.next_int(1500);
        let player_correct = player.next_percent(80);

        let outcome = if player_delay < plan.delay_ms {
            if !player_correct {
                if let Some(wrong) = wrong_choice(&session) {
                    session.submit_answer(&wrong)?;
                }
            }
            answer_or_timeout(&mut session, player_correct)?
        } else {
            match session.bot_answer() {
                BotOutcome::Won { result } => result,
                _ => answer_or_timeout(&mut session, true)?,
            }
        };

        if let Some(result) = outcome {
            return finish(&session, result);
        }
    }

    bail!("match did not finish within {} rounds", MAX_ROUNDS)
}

/// Player answers correctly now, or after the bot's timer if it slipped first.
fn answer_or_timeout(session: &mut BattleSession, correct_now: bool) -> Result<Option<MatchResult>> {
    if !correct_now {
        if let BotOutcome::Won { result } = session.bot_answer() {
            return Ok(result);
        }
    }
    let answer = session
        .prompt()
        .map(|p| p.correct_answer.clone())
        .context("round has no prompt")?;
    match session.submit_answer(&answer)? {
        AnswerOutcome::Correct { result } => Ok(result),
        AnswerOutcome::Wrong => bail!("correct answer rejected"),
    }
}

fn wrong_choice(session: &BattleSession) -> Option<String> {
    let prompt = session.prompt()?;
    prompt
        .choices
        .iter()
        .find(|c| **c != prompt.correct_answer)
        .cloned()
}

/// Heal when low, otherwise hit hard when affordable.
fn spend_xp(session: &mut BattleSession) {
    let me = &session.state().player;
    let choice = if me.hp < 40 && me.battle_xp >= Ability::Heal.cost() {
        Some(Ability::Heal)
    } else if me.shield == 0 && me.battle_xp >= Ability::Shield.cost() + Ability::HeavyAttack.cost() {
        Some(Ability::Shield)
    } else if me.battle_xp >= Ability::HeavyAttack.cost() {
        Some(Ability::HeavyAttack)
    } else {
        None
    };

    if let Some(ability) = choice {
        if let Err(err) = session.use_ability(ability) {
            warn!("{}", err);
        }
    }
}

fn finish(session: &BattleSession, result: MatchResult) -> Result<(StateHash, MatchResult)> {
    let state = session.state();
    info!("=== Match Results ===");
    info!("{:?} after {} rounds", result, state.round);
    info!(
        "You: {} hp, {} XP | Bot: {} hp, {} XP",
        state.player.hp, state.player.battle_xp, state.bot.hp, state.bot.battle_xp
    );
    if let Some(last) = state.events.last() {
        info!("Last event: {}", last.describe());
    }
    info!("Stats: {:?}", session.meta());
    Ok((state.compute_hash(), result))
}

fn demo_banks() -> ItemBanks {
    let words = [
        "because", "friend", "island", "people", "laugh", "enough", "thought", "quiet",
        "answer", "busy", "caught", "different",
    ];
    let problems = vec![
        MathProblem::new("6 x 7", 42, [36, 42, 48, 49]),
        MathProblem::new("45 + 38", 83, [73, 83, 81, 93]),
        MathProblem::new("72 / 8", 9, [8, 9]),
        MathProblem::new("100 - 37", 63, [63, 73, 67, 53]),
        MathProblem::new("3 x 4", 12, [12]),
    ];

    ItemBanks::new(
        WordBank { words: words.iter().map(|w| w.to_string()).collect() },
        MathBank { problems },
    )
}
