use chrono::{DateTime, Utc};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error("Expected a {expected} payload, got {found}")]
    KindMismatch { expected: GameKind, found: GameKind },
    #[error("No {game} geometry configured for tier {tier}")]
    MissingGeometry {
        game: GameKind,
        tier: DifficultyTier,
    },
    #[error("Session has not started")]
    NotStarted,
    #[error("Session already finished")]
    Finished,
    #[error("Hint already used in this session")]
    HintUsed,
}

pub type PlayResult<T> = core::result::Result<T, SessionError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinishReason {
    Solved,
    TimedOut,
    Abandoned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Ready,
    Playing,
    Finished(FinishReason),
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Per-session overrides; the defaults resolve everything from the level number.
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Tier returned by the level server, wins over the level bands.
    pub tier: Option<DifficultyTier>,
    /// Server-supplied time limit in seconds.
    pub time_limit: Option<u32>,
    pub extend_policy: ExtendPolicy,
    /// Layout seed; a fresh one is drawn from the thread RNG when unset.
    pub seed: Option<u64>,
    pub table: DifficultyTable,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tier: None,
            time_limit: None,
            extend_policy: ExtendPolicy::default(),
            seed: None,
            table: DifficultyTable::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "value")]
pub enum Hint {
    FirstGlyph(char),
    /// 1-based row of the differing glyph.
    AnswerRow(Coord),
    StartFrom(ItemId),
}

impl Hint {
    pub fn message(&self) -> String {
        match self {
            Self::FirstGlyph(glyph) => format!("成语的第一个字是\"{}\"", glyph),
            Self::AnswerRow(row) => format!("不同的字在第 {} 行附近", row),
            Self::StartFrom(_) => "试试从第一句开始连线".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub kind: GameKind,
    pub level: u32,
    pub tier: DifficultyTier,
    pub solved: bool,
    pub timed_out: bool,
    /// Score to report; unsolved attempts score zero.
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub hint_used: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Progress entry posted to the level server after a solved attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    pub openid: String,
    pub game_id: GameKind,
    pub level: u32,
    pub score: u32,
}

/// Lays out `payload` with the geometry `table` assigns to `tier`.
pub fn build_game(
    generator: &mut impl PuzzleGenerator,
    payload: &PuzzlePayload,
    table: &DifficultyTable,
    tier: DifficultyTier,
) -> PlayResult<Game> {
    let kind = payload.kind();
    let geometry = || {
        table
            .geometry(kind, tier)
            .ok_or(SessionError::MissingGeometry { game: kind, tier })
    };
    let game = match payload {
        PuzzlePayload::GridFill(payload) => {
            GridFillGame::new(generator.grid_fill(payload, geometry()?)?).into()
        }
        PuzzlePayload::MatrixDifference(payload) => {
            MatrixDifferenceGame::new(generator.matrix_difference(payload, geometry()?)?).into()
        }
        PuzzlePayload::PairMatching(payload) => {
            PairMatchingGame::new(generator.pair_matching(payload)?).into()
        }
    };
    Ok(game)
}

/// One play attempt: a game, its countdown and the lifecycle around them.
#[derive(Debug)]
pub struct PlaySession<C = SystemClock> {
    game: Game,
    timer: CountdownTimer<C>,
    level: u32,
    tier: DifficultyTier,
    seed: u64,
    state: SessionState,
    hint_used: bool,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl PlaySession<SystemClock> {
    pub fn new(
        kind: GameKind,
        level: u32,
        payload: &PuzzlePayload,
        options: SessionOptions,
    ) -> PlayResult<Self> {
        Self::with_clock(kind, level, payload, options, SystemClock::new())
    }
}

impl<C: TickSource> PlaySession<C> {
    pub fn with_clock(
        kind: GameKind,
        level: u32,
        payload: &PuzzlePayload,
        options: SessionOptions,
        clock: C,
    ) -> PlayResult<Self> {
        if payload.kind() != kind {
            return Err(SessionError::KindMismatch {
                expected: kind,
                found: payload.kind(),
            });
        }
        let tier = options.tier.unwrap_or_else(|| resolve_difficulty(level));
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let mut generator = RandomPuzzleGenerator::new(seed);
        let game = build_game(&mut generator, payload, &options.table, tier)?;
        let time_limit = options
            .time_limit
            .unwrap_or_else(|| options.table.time_limit(kind, tier));
        log::debug!(
            "New {} session, level {} ({}), {}s, seed {}",
            kind,
            level,
            tier,
            time_limit,
            seed
        );

        Ok(Self {
            game,
            timer: CountdownTimer::with_policy(clock, time_limit, options.extend_policy),
            level,
            tier,
            seed,
            state: SessionState::Ready,
            hint_used: false,
            started_at: None,
            ended_at: None,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tier(&self) -> DifficultyTier {
        self.tier
    }

    /// Seed the layout was generated from, enough to replay it.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn timer(&self) -> &CountdownTimer<C> {
        &self.timer
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn start(&mut self) -> PlayResult<()> {
        match self.state {
            SessionState::Ready => {
                self.state = SessionState::Playing;
                self.started_at = Some(Utc::now());
                self.timer.start();
                log::debug!("Session started");
                Ok(())
            }
            SessionState::Playing => Ok(()),
            SessionState::Finished(_) => Err(SessionError::Finished),
        }
    }

    /// Advances the countdown, finishing the session once it runs out.
    pub fn frame(&mut self) -> Tick {
        let tick = self.timer.tick();
        if tick == Tick::Expired && self.state.is_playing() {
            self.finish(FinishReason::TimedOut);
        }
        tick
    }

    /// Taps at a local point; `Ok(None)` when the point hits nothing.
    pub fn tap_point(&mut self, x: f32, y: f32) -> PlayResult<Option<TapOutcome>> {
        self.ensure_playing()?;
        match self.game.point_to_selection(x, y) {
            Some(selection) => self.tap(selection).map(Some),
            None => Ok(None),
        }
    }

    pub fn tap(&mut self, selection: Selection) -> PlayResult<TapOutcome> {
        self.ensure_playing()?;
        let outcome = self.game.tap(selection)?;
        if outcome.is_complete() {
            self.finish(FinishReason::Solved);
        }
        Ok(outcome)
    }

    /// The one hint a session allows.
    pub fn hint(&mut self) -> PlayResult<Hint> {
        self.ensure_playing()?;
        if self.hint_used {
            return Err(SessionError::HintUsed);
        }
        let hint = match &self.game {
            Game::GridFill(game) => game.hint().map(Hint::FirstGlyph),
            Game::MatrixDifference(game) => Some(Hint::AnswerRow(game.hint() + 1)),
            Game::PairMatching(game) => game.hint().map(Hint::StartFrom),
        };
        // every layout has at least one target glyph or upper item
        let hint = hint.ok_or(SessionError::Finished)?;
        self.hint_used = true;
        log::debug!("Hint given: {:?}", hint);
        Ok(hint)
    }

    pub fn clear_selection(&mut self) {
        self.game.clear_selection();
    }

    /// Stops the countdown and discards the attempt.
    pub fn abandon(&mut self) {
        if !self.state.is_finished() {
            self.finish(FinishReason::Abandoned);
        }
    }

    pub fn breakdown(&self) -> ScoreBreakdown {
        self.game
            .breakdown(ScoreTiming::from_budget(self.timer.total(), self.timer.remaining()))
    }

    /// Final result, available once the session has finished.
    pub fn result(&self) -> Option<SessionResult> {
        let SessionState::Finished(reason) = self.state else {
            return None;
        };
        let breakdown = self.breakdown();
        let solved = reason == FinishReason::Solved;
        Some(SessionResult {
            kind: self.kind(),
            level: self.level,
            tier: self.tier,
            solved,
            timed_out: reason == FinishReason::TimedOut,
            score: if solved { breakdown.total_score } else { 0 },
            breakdown,
            hint_used: self.hint_used,
            started_at: self.started_at,
            ended_at: self.ended_at,
        })
    }

    /// Progress entry for a solved attempt.
    pub fn progress_report(&self, player_id: &str) -> Option<ProgressReport> {
        let result = self.result().filter(|result| result.solved)?;
        Some(ProgressReport {
            openid: player_id.to_owned(),
            game_id: result.kind,
            level: result.level,
            score: result.score,
        })
    }

    fn ensure_playing(&mut self) -> PlayResult<()> {
        match self.state {
            SessionState::Ready => Err(SessionError::NotStarted),
            SessionState::Playing => {
                self.frame();
                if self.state.is_playing() {
                    Ok(())
                } else {
                    Err(SessionError::Finished)
                }
            }
            SessionState::Finished(_) => Err(SessionError::Finished),
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.timer.stop();
        self.state = SessionState::Finished(reason);
        self.ended_at = Some(Utc::now());
        log::debug!(
            "Session finished: {:?}, {} wrong",
            reason,
            self.game.wrong_count()
        );
    }
}
