use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;
use wordtwist::engine::Phase;
use wordtwist::feedback::FeedbackKind;
use wordtwist::util::mean;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.engine.state.phase {
            Phase::Loading => render_loading(area, buf),
            Phase::Playing | Phase::Error => render_play(self, area, buf),
            Phase::Results => render_results(self, area, buf),
        }
    }
}

fn render_loading(area: Rect, buf: &mut Buffer) {
    let message = Paragraph::new(Span::styled(
        "Loading Game...",
        Style::default()
            .add_modifier(Modifier::BOLD | Modifier::ITALIC)
            .add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    message.render(area, buf);
}

fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.engine.snapshot();
    let wrong_guess = state.phase == Phase::Error;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let accent_style = Style::default().patch(bold_style).fg(Color::Yellow);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),    // top padding
                Constraint::Length(1), // progress + score
                Constraint::Length(1),
                Constraint::Length(1), // scrambled word
                Constraint::Length(1), // reshuffle hint
                Constraint::Length(1),
                Constraint::Length(1), // guess input
                Constraint::Length(1),
                Constraint::Length(1), // round timer
                Constraint::Length(1), // feedback toast
                Constraint::Min(1),    // bottom padding
                Constraint::Length(1), // key legend
            ]
            .as_ref(),
        )
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Word {}/{}", state.round_count, app.engine.total_rounds()),
            dim_style,
        ),
        Span::raw("   "),
        Span::styled(format!("Score: {}", state.score), bold_style),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[1], buf);

    if let Some(word) = &state.current_word {
        let scrambled = word.scrambled.to_uppercase();
        let spaced = scrambled.chars().join(" ");
        // letter-spaced when it fits, compact otherwise
        let display = if spaced.width() as u16 <= chunks[3].width {
            spaced
        } else {
            scrambled
        };

        let scrambled_widget = Paragraph::new(Span::styled(display, accent_style))
            .alignment(Alignment::Center);
        scrambled_widget.render(chunks[3], buf);
    }

    let hint = Paragraph::new(Span::styled("unscramble this word", dim_style))
        .alignment(Alignment::Center);
    hint.render(chunks[4], buf);

    let input_style = if wrong_guess {
        red_bold_style
    } else {
        bold_style
    };
    let input_text = if app.input.is_empty() {
        Span::styled("type your answer", dim_style)
    } else {
        Span::styled(format!("{}\u{2581}", app.input), input_style)
    };
    let input_widget = Paragraph::new(input_text).alignment(Alignment::Center);
    input_widget.render(chunks[6], buf);

    let timer = Paragraph::new(Span::styled(
        format!("time for this word: {}s", app.engine.display_seconds()),
        dim_style,
    ))
    .alignment(Alignment::Center);
    timer.render(chunks[8], buf);

    if let Some(kind) = app.feedback.kind() {
        let style = match kind {
            FeedbackKind::Correct { .. } => Style::default().patch(bold_style).fg(Color::Green),
            FeedbackKind::Skipped { .. } => accent_style,
            FeedbackKind::Incorrect => red_bold_style,
        };
        let toast = Paragraph::new(Span::styled(kind.message(), style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        toast.render(chunks[9], buf);
    }

    let legend = Paragraph::new(Span::styled(
        "(enter)submit  (tab)reshuffle  (→)skip  (esc)quit",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[11], buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.engine.snapshot();

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),    // top padding
                Constraint::Length(1), // title
                Constraint::Length(1),
                Constraint::Length(1), // final score
                Constraint::Length(1), // total time
                Constraint::Length(1), // average per word
                Constraint::Min(1),    // bottom padding
                Constraint::Length(1), // key legend
            ]
            .as_ref(),
        )
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Game Over!",
        Style::default().patch(bold_style).fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    title.render(chunks[1], buf);

    let score = Paragraph::new(Span::styled(
        format!("Final Score: {}", state.score),
        Style::default().patch(bold_style).fg(Color::Green),
    ))
    .alignment(Alignment::Center);
    score.render(chunks[3], buf);

    let total = Paragraph::new(Span::styled(
        format!("Total Time: {} seconds", state.total_elapsed_secs.floor()),
        dim_style,
    ))
    .alignment(Alignment::Center);
    total.render(chunks[4], buf);

    if let Some(avg) = mean(&state.round_times) {
        let average = Paragraph::new(Span::styled(
            format!("{avg:.1}s per word on average"),
            dim_style,
        ))
        .alignment(Alignment::Center);
        average.render(chunks[5], buf);
    }

    let legend = Paragraph::new(Span::styled(
        "(p)lay again  (esc)quit",
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    legend.render(chunks[7], buf);
}

#[cfg(test)]
mod tests {
    use crate::App;
    use ratatui::{backend::TestBackend, Terminal};
    use wordtwist::engine::Phase;
    use wordtwist::words::WordList;

    fn one_word_app() -> App {
        let list = WordList {
            name: "test".to_string(),
            size: 1,
            words: vec!["cat".to_string()],
        };
        App::new(1, list).unwrap()
    }

    fn rendered_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(app, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn play_screen_legend_matches_key_handling() {
        let app = one_word_app();
        let text = rendered_text(&app);

        assert!(text.contains("(enter)submit"));
        assert!(text.contains("(tab)reshuffle"));
        assert!(text.contains("(esc)quit"));
    }

    #[test]
    fn results_screen_legend_matches_key_handling() {
        let mut app = one_word_app();
        app.engine.skip().unwrap();
        assert_eq!(app.engine.state.phase, Phase::Results);

        let text = rendered_text(&app);

        // only the documented keys act on this screen
        assert!(text.contains("(p)lay again"));
        assert!(text.contains("(esc)quit"));
        assert!(!text.contains("(r)"));
    }
}
