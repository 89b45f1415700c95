use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, GameOverCause, Mode, Position, SessionView};

/// Width in terminal columns of one grid cell
const CELL_WIDTH: u16 = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &SessionView<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let board_width = view.grid.width as u16 * CELL_WIDTH + 2;
        let board_height = view.grid.height as u16 + 2;
        let board_area = centered_rect(chunks[1], board_width, board_height);

        match view.mode {
            Mode::Menu => {
                let menu_area = centered_rect(chunks[1], board_width.max(36), board_height);
                frame.render_widget(self.render_menu(view), menu_area);
            }
            Mode::Playing => {
                frame.render_widget(self.render_grid(view), board_area);
            }
            Mode::Paused => {
                frame.render_widget(self.render_grid(view), board_area);
                let popup = centered_rect(chunks[1], 24, 5);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_pause(), popup);
            }
            Mode::GameOver => {
                frame.render_widget(self.render_grid(view), board_area);
                let popup = centered_rect(chunks[1], 30, 9);
                frame.render_widget(Clear, popup);
                frame.render_widget(self.render_game_over(view), popup);
            }
        }

        frame.render_widget(self.render_controls(view.mode), chunks[2]);
    }

    fn render_grid(&self, view: &SessionView<'_>) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(view.grid.height);
        let head = view.snake.map(|snake| snake.head());

        for y in 0..view.grid.height {
            let mut spans = Vec::with_capacity(view.grid.width);

            for x in 0..view.grid.width {
                let pos = Position::new(x as i32, y as i32);
                let on_body = view.snake.is_some_and(|snake| snake.occupies(pos));

                let cell = if head == Some(pos) {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if on_body {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if view.food == Some(pos) {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, view: &SessionView<'_>) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Highscore: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.high_score.to_string(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_menu(&self, view: &SessionView<'_>) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "SNAKE",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.high_score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press SPACE or ENTER to start",
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled("ESC to quit", Style::default().fg(Color::Gray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green)),
        )
    }

    fn render_pause(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press P to continue",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, view: &SessionView<'_>) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                outcome_message(view.outcome),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    view.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Highscore: ", Style::default().fg(Color::Yellow)),
                Span::styled(view.high_score.to_string(), Style::default().fg(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, mode: Mode) -> Paragraph<'_> {
        let text = match mode {
            Mode::Menu => Line::from(vec![
                Span::styled("SPACE/ENTER", Style::default().fg(Color::Cyan)),
                Span::raw(" to start | "),
                Span::styled("ESC", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
            Mode::Playing | Mode::Paused | Mode::GameOver => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("P", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("ESC", Style::default().fg(Color::Cyan)),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        };

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome_message(outcome: Option<GameOverCause>) -> &'static str {
    match outcome {
        Some(GameOverCause::Collision(CollisionType::Wall)) => "You hit the wall",
        Some(GameOverCause::Collision(CollisionType::SelfCollision)) => "You ran into yourself",
        Some(GameOverCause::BoardFilled) => "Board filled",
        None => "",
    }
}

/// Rectangle of at most `width` x `height` centered inside `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Grid, Snake};
    use ratatui::{Terminal, backend::TestBackend};

    fn view_with<'a>(mode: Mode, snake: &'a Snake) -> SessionView<'a> {
        SessionView {
            mode,
            paused: mode == Mode::Paused,
            grid: Grid::new(10, 10),
            snake: Some(snake),
            food: Some(Position::new(1, 1)),
            score: 3,
            high_score: 17,
            outcome: None,
        }
    }

    fn draw(view: &SessionView<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, view))
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
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(15, 8, 10, 4));
        assert_eq!(centered_rect(area, 100, 100), area);
    }

    #[test]
    fn test_menu_shows_high_score() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut view = view_with(Mode::Menu, &snake);
        view.snake = None;
        view.food = None;

        let screen = draw(&view);

        assert!(screen.contains("SNAKE"));
        assert!(screen.contains("Highscore: 17"));
        assert!(!screen.contains("■"));
    }

    #[test]
    fn test_playing_draws_snake_and_food() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let screen = draw(&view_with(Mode::Playing, &snake));

        assert!(screen.contains("Score: 3"));
        assert_eq!(screen.matches('■').count(), 1);
        assert_eq!(screen.matches('□').count(), 2);
        assert!(screen.contains('O'));
        assert!(!screen.contains("PAUSED"));
    }

    #[test]
    fn test_paused_overlay() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let screen = draw(&view_with(Mode::Paused, &snake));

        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Press P to continue"));
    }

    #[test]
    fn test_game_over_overlay_names_cause() {
        let snake = Snake::new(Position::new(9, 5), Direction::Right, 3);
        let mut view = view_with(Mode::GameOver, &snake);
        view.outcome = Some(GameOverCause::Collision(CollisionType::Wall));

        let screen = draw(&view);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("You hit the wall"));
        assert!(screen.contains("to restart"));
    }
}
