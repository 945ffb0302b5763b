use crate::quiz::session::Session;

/// `M:SS`, e.g. `2:00` or `0:07`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Option texts in the session's current display language, in on-screen order.
pub fn option_labels(session: &Session) -> Vec<&str> {
    session
        .current_options()
        .iter()
        .map(|word| word.translation(session.language()))
        .collect()
}

pub fn render(session: &Session) -> String {
    if session.is_over() {
        return render_game_over(session);
    }

    let header = format!(
        "Level: {}   Language: {}   Time: {}\n",
        session.level(),
        session.language(),
        format_time(session.time_remaining())
    );

    let body = match session.current_word() {
        Some(word) => {
            let options = option_labels(session)
                .iter()
                .enumerate()
                .map(|(i, label)| format!("  [{}] {}", i + 1, label))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "  {}\n  Category: {}\n\n{}\n",
                word.source_text, word.category, options
            )
        }
        None => format!("  No words available for level {}.\n", session.level()),
    };

    let footer = format!(
        "  {}\nScore: {}\nPress 1-{} to answer, 'level <a1|a2|verbs>', 'lang <en|zh>', 'restart' or 'quit'.\n",
        session.feedback().map(|f| f.message()).unwrap_or(""),
        session.score(),
        session.current_options().len().max(1)
    );

    format!("{}\n{}\n{}", header, body, footer)
}

pub fn render_game_over(session: &Session) -> String {
    format!(
        "Game Over!\n\nFinal Score: {}\nHigh Score: {}\n\nType 'restart' to play again or 'quit' to leave.\n",
        session.score(),
        session.high_score()
    )
}
