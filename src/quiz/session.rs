use rand::Rng;

use crate::error::QuizError;
use crate::quiz::round::Round;
use crate::quiz::{Language, Level, Word};

/// Identifies one play-through. Bumped every time a game is (re)started, so
/// ticks and advances scheduled for an older game can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Generation(u64);

/// Ties a delayed round advance to the game and round that scheduled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    generation: Generation,
    round: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    TryAgain,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct! 🎉",
            Feedback::TryAgain => "Try again! ❌",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: bool,
}

/// Compares by id: texts can coincide across words.
pub fn evaluate(selected: &Word, target: &Word) -> Evaluation {
    Evaluation {
        correct: selected.id == target.id,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Score went up; the next round should be started with this token after the pause.
    Correct { score: u32, advance: AdvanceToken },
    Incorrect,
    /// No active round, the game is over, the round was already answered, or the
    /// index was out of range.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    Expired { score: u32, high_score: u32 },
    /// Timer already stopped or the tick belongs to an earlier game.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub round_seconds: u32,
    pub option_count: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            round_seconds: 120,
            option_count: 5,
        }
    }
}

/// Full mutable state of one player's game.
#[derive(Debug, Clone)]
pub struct Session {
    settings: SessionSettings,
    score: u32,
    high_score: u32,
    time_remaining: u32,
    is_over: bool,
    timer: TimerState,
    round: Option<Round>,
    feedback: Option<Feedback>,
    level: Level,
    language: Language,
    generation: Generation,
    round_number: u64,
    pending_advance: Option<AdvanceToken>,
}

impl Session {
    /// A session with no round yet. Call [`Session::start_new_game`] to begin playing.
    pub fn new(settings: SessionSettings, level: Level, language: Language) -> Self {
        Self {
            settings,
            score: 0,
            high_score: 0,
            time_remaining: settings.round_seconds,
            is_over: false,
            timer: TimerState::Stopped,
            round: None,
            feedback: None,
            level,
            language,
            generation: Generation::default(),
            round_number: 0,
            pending_advance: None,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    #[cfg(test)]
    pub fn timer(&self) -> TimerState {
        self.timer
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    #[cfg(test)]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.round.as_ref().map(|r| &r.word)
    }

    pub fn current_options(&self) -> &[Word] {
        self.round.as_ref().map(|r| r.options.as_slice()).unwrap_or(&[])
    }

    /// Resets score, clock and game-over flag and deals the first round from `words`.
    ///
    /// On an empty word list the session is left reset but without a round and with
    /// its timer stopped.
    pub fn start_new_game<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        words: &[Word],
    ) -> Result<Generation, QuizError> {
        self.generation = Generation(self.generation.0 + 1);
        self.score = 0;
        self.time_remaining = self.settings.round_seconds;
        self.is_over = false;
        self.feedback = None;
        self.pending_advance = None;
        self.round = None;
        self.timer = TimerState::Stopped;

        let round = Round::generate(rng, self.level, words, self.settings.option_count)?;
        self.round = Some(round);
        self.round_number += 1;
        self.timer = TimerState::Running;
        log::info!("New game on level {} ({}s)", self.level, self.time_remaining);
        Ok(self.generation)
    }

    /// Switches to `level` and starts a fresh game on its words.
    pub fn change_level<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        level: Level,
        words: &[Word],
    ) -> Result<Generation, QuizError> {
        log::info!("Level changed from {} to {}", self.level, level);
        self.level = level;
        self.start_new_game(rng, words)
    }

    /// Only the displayed translations change; the round stays as it is.
    pub fn change_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn answer(&mut self, selected: &Word) -> AnswerOutcome {
        if self.is_over || self.pending_advance.is_some() {
            return AnswerOutcome::Ignored;
        }
        let target = match &self.round {
            Some(round) => &round.word,
            None => return AnswerOutcome::Ignored,
        };

        if !evaluate(selected, target).correct {
            self.feedback = Some(Feedback::TryAgain);
            return AnswerOutcome::Incorrect;
        }

        self.score += 1;
        self.feedback = Some(Feedback::Correct);
        let advance = AdvanceToken {
            generation: self.generation,
            round: self.round_number,
        };
        self.pending_advance = Some(advance);
        AnswerOutcome::Correct {
            score: self.score,
            advance,
        }
    }

    /// Answers with the option at `index` (zero-based). Out-of-range indices are ignored.
    pub fn select_option(&mut self, index: usize) -> AnswerOutcome {
        match self.current_options().get(index).cloned() {
            Some(selected) => self.answer(&selected),
            None => AnswerOutcome::Ignored,
        }
    }

    /// Deals the next round if `token` is still the pending advance and the game is
    /// not over. Returns whether a new round was dealt.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        token: AdvanceToken,
        words: &[Word],
    ) -> Result<bool, QuizError> {
        if self.is_over || self.pending_advance != Some(token) {
            log::debug!("Dropping stale round advance {:?}", token);
            return Ok(false);
        }
        self.pending_advance = None;

        let round = Round::generate(rng, self.level, words, self.settings.option_count)?;
        self.round = Some(round);
        self.round_number += 1;
        self.feedback = None;
        Ok(true)
    }

    /// One second of the game clock.
    pub fn tick(&mut self, generation: Generation) -> TickOutcome {
        if generation != self.generation || self.timer == TimerState::Stopped {
            return TickOutcome::Ignored;
        }

        if self.time_remaining <= 1 {
            self.time_remaining = 0;
            self.finish();
            return TickOutcome::Expired {
                score: self.score,
                high_score: self.high_score,
            };
        }

        self.time_remaining -= 1;
        TickOutcome::Running {
            remaining: self.time_remaining,
        }
    }

    fn finish(&mut self) {
        self.is_over = true;
        self.timer = TimerState::Stopped;
        self.pending_advance = None;
        self.high_score = self.high_score.max(self.score);
        log::info!(
            "Game over: score {}, high score {}",
            self.score,
            self.high_score
        );
    }
}
