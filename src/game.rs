use std::time::Duration;

use rand::Rng;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::config::Config;
use crate::quiz::catalog::Catalog;
use crate::quiz::session::{AnswerOutcome, Generation, Session, TickOutcome};
use crate::quiz::timer::{self, TaskGuard, TimerEvent};
use crate::quiz::{Language, Level};
use crate::view;

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Timer(TimerEvent),
    Input(String),
    InputClosed,
}

impl From<TimerEvent> for GameEvent {
    fn from(event: TimerEvent) -> Self {
        GameEvent::Timer(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Zero-based option index
    Answer(usize),
    Level(Level),
    Language(Language),
    Restart,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) {
        return match line.parse::<usize>() {
            Ok(n) if n > 0 => Command::Answer(n - 1),
            _ => Command::Unknown(line.to_string()),
        };
    }

    let (head, arg) = match line.split_once(char::is_whitespace) {
        Some((head, arg)) => (head, arg.trim()),
        None => (line, ""),
    };
    match head.to_lowercase().as_str() {
        "level" | "l" => arg
            .parse()
            .map(Command::Level)
            .unwrap_or_else(|_| Command::Unknown(line.to_string())),
        "lang" | "language" => arg
            .parse()
            .map(Command::Language)
            .unwrap_or_else(|_| Command::Unknown(line.to_string())),
        "restart" | "r" | "again" => Command::Restart,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the session and the timers driving it. All events arrive through one
/// channel and are applied one at a time.
pub struct Game<R> {
    catalog: Catalog,
    session: Session,
    rng: R,
    advance_delay: Duration,
    tx: UnboundedSender<GameEvent>,
    ticker: Option<TaskGuard>,
    advance: Option<TaskGuard>,
}

impl<R: Rng> Game<R> {
    pub fn new(config: &Config, catalog: Catalog, rng: R, tx: UnboundedSender<GameEvent>) -> Self {
        Self {
            catalog,
            session: Session::new(
                config.session_settings(),
                config.default_level,
                config.default_language,
            ),
            rng,
            advance_delay: config.advance_delay,
            tx,
            ticker: None,
            advance: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn start_new_game(&mut self) {
        let level = self.session.level();
        let result = self
            .session
            .start_new_game(&mut self.rng, self.catalog.level_data(level));
        self.restart_timers(result.as_ref().ok().copied());
        if let Err(e) = result {
            log::warn!("{}", e);
        }
    }

    fn change_level(&mut self, level: Level) {
        let result = self
            .session
            .change_level(&mut self.rng, level, self.catalog.level_data(level));
        self.restart_timers(result.as_ref().ok().copied());
        if let Err(e) = result {
            log::warn!("{}", e);
        }
    }

    /// Drops the old ticker and any pending advance; starts a ticker for the new game.
    fn restart_timers(&mut self, generation: Option<Generation>) {
        self.advance = None;
        self.ticker = generation
            .map(|generation| timer::start_ticker(generation, TICK_PERIOD, self.tx.clone()));
    }

    pub fn handle(&mut self, event: GameEvent) -> Flow {
        match event {
            GameEvent::Timer(TimerEvent::Tick(generation)) => match self.session.tick(generation) {
                TickOutcome::Running { .. } => {}
                TickOutcome::Expired { .. } => {
                    self.ticker = None;
                    self.advance = None;
                }
                TickOutcome::Ignored => log::debug!("Dropping tick for {:?}", generation),
            },
            GameEvent::Timer(TimerEvent::Advance(token)) => {
                self.advance = None;
                let level = self.session.level();
                if let Err(e) =
                    self.session
                        .advance(&mut self.rng, token, self.catalog.level_data(level))
                {
                    log::warn!("{}", e);
                }
            }
            GameEvent::Input(line) => return self.handle_command(parse_command(&line)),
            GameEvent::InputClosed => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Answer(index) => {
                if let AnswerOutcome::Correct { advance, .. } = self.session.select_option(index) {
                    self.advance = Some(timer::schedule_advance(
                        advance,
                        self.advance_delay,
                        self.tx.clone(),
                    ));
                }
            }
            Command::Level(level) => self.change_level(level),
            Command::Language(language) => self.session.change_language(language),
            Command::Restart => self.start_new_game(),
            Command::Quit => return Flow::Quit,
            Command::Unknown(line) => log::debug!("Ignoring input '{}'", line),
        }
        Flow::Continue
    }
}

/// Runs a game on stdin/stdout until the player quits or input ends.
pub async fn run<R: Rng>(config: Config, catalog: Catalog, rng: R) {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let input_tx = tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if input_tx.send(GameEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = input_tx.send(GameEvent::InputClosed);
    });

    let mut game = Game::new(&config, catalog, rng, tx);
    game.start_new_game();
    draw(game.session());

    while let Some(event) = rx.recv().await {
        if game.handle(event) == Flow::Quit {
            break;
        }
        draw(game.session());
    }
    log::info!("Leaving with high score {}", game.session().high_score());
}

fn draw(session: &Session) {
    print!("\x1B[2J\x1B[1;1H");
    println!("{}", view::render(session));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Word;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tokio::sync::mpsc::UnboundedReceiver;

    fn catalog() -> Catalog {
        let animals = vec![
            Word::new(1, "gato", "cat", "猫", Level::A1),
            Word::new(2, "perro", "dog", "狗", Level::A1),
            Word::new(3, "pájaro", "bird", "鸟", Level::A1),
            Word::new(4, "pez", "fish", "鱼", Level::A1),
            Word::new(5, "oso", "bear", "熊", Level::A1),
        ];
        let verbs = vec![
            Word::new(1, "comer", "to eat", "吃", Level::Verbs),
            Word::new(2, "beber", "to drink", "喝", Level::Verbs),
        ];
        Catalog::from_levels([(Level::A1, animals), (Level::Verbs, verbs)])
    }

    fn new_game(round_seconds: u32) -> (Game<StdRng>, UnboundedReceiver<GameEvent>) {
        let config = Config {
            round_seconds,
            ..Config::default()
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let mut game = Game::new(&config, catalog(), StdRng::seed_from_u64(1), tx);
        game.start_new_game();
        (game, rx)
    }

    fn correct_key(session: &Session) -> String {
        let target = session.current_word().unwrap().id;
        let index = session
            .current_options()
            .iter()
            .position(|w| w.id == target)
            .unwrap();
        (index + 1).to_string()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("3"), Command::Answer(2));
        assert_eq!(parse_command(" 1 "), Command::Answer(0));
        assert_eq!(parse_command("0"), Command::Unknown("0".to_string()));
        assert_eq!(parse_command("+3"), Command::Unknown("+3".to_string()));
        assert_eq!(parse_command("-1"), Command::Unknown("-1".to_string()));
        assert_eq!(parse_command("level verbs"), Command::Level(Level::Verbs));
        assert_eq!(parse_command("lang zh"), Command::Language(Language::Chinese));
        assert_eq!(parse_command("restart"), Command::Restart);
        assert_eq!(parse_command("quit"), Command::Quit);
        assert!(matches!(parse_command("level c2"), Command::Unknown(_)));
        assert!(matches!(parse_command("hello"), Command::Unknown(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn correct_answer_deals_next_round_after_pause() {
        let (mut game, mut rx) = new_game(120);
        let key = correct_key(game.session());

        assert_eq!(game.handle(GameEvent::Input(key)), Flow::Continue);
        assert_eq!(game.session().score(), 1);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, GameEvent::Timer(TimerEvent::Advance(_))));
        game.handle(event);
        assert_eq!(game.session().feedback(), None);
        assert_eq!(game.session().current_options().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_ends_the_game() {
        let (mut game, mut rx) = new_game(3);
        let mut ticks = 0;
        while !game.session().is_over() {
            let event = rx.recv().await.unwrap();
            if matches!(event, GameEvent::Timer(TimerEvent::Tick(_))) {
                ticks += 1;
            }
            game.handle(event);
        }
        assert_eq!(ticks, 3);
        assert_eq!(game.session().time_remaining(), 0);

        // The ticker was dropped with the game, so the channel stays quiet.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn level_change_replaces_the_ticker() {
        let (mut game, mut rx) = new_game(120);
        game.handle(GameEvent::Input("level verbs".to_string()));
        assert_eq!(game.session().level(), Level::Verbs);
        assert_eq!(game.session().current_options().len(), 2);

        // Only one ticker is alive: one second yields exactly one tick.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let event = rx.try_recv().unwrap();
        game.handle(event);
        assert!(rx.try_recv().is_err());
        assert_eq!(game.session().time_remaining(), 119);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_drops_pending_advance() {
        let (mut game, mut rx) = new_game(120);
        let key = correct_key(game.session());
        game.handle(GameEvent::Input(key));
        game.handle(GameEvent::Input("restart".to_string()));
        assert_eq!(game.session().score(), 0);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_level_stops_the_clock() {
        let (mut game, mut rx) = new_game(120);
        game.handle(GameEvent::Input("level a2".to_string()));
        assert!(game.session().current_word().is_none());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(game.session().time_remaining(), 120);
    }

    #[tokio::test]
    async fn quit_and_closed_input_stop_the_loop() {
        let (mut game, _rx) = new_game(120);
        assert_eq!(game.handle(GameEvent::Input("lang zh".to_string())), Flow::Continue);
        assert_eq!(game.session().language(), Language::Chinese);
        assert_eq!(game.handle(GameEvent::Input("q".to_string())), Flow::Quit);
        assert_eq!(game.handle(GameEvent::InputClosed), Flow::Quit);
    }
}
