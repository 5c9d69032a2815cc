use crate::{
    helpers::share_url,
    render::{GradientBackground, RenderedSampler, WordArt},
    style::StyleDeriver,
    types::{Phase, Rgb, WordStyle},
    words::{FileLoader, WordLoader, WordSource},
};

use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    prelude::*,
    widgets::*,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tui_input::{Input, InputRequest};
use url::Url;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const REFRESH_LABEL: &str = "Get new random word";

pub struct App<L = FileLoader> {
    words: Arc<WordSource<L>>,
    deriver: StyleDeriver<RenderedSampler>,
    site_url: Url,
    fade: Duration,
    word: String,
    style: WordStyle,
    share_url: Url,
    phase: Phase,
    editor: Option<Input>,
    should_quit: bool,
}

impl<L: WordLoader> App<L> {
    pub fn new(
        words: Arc<WordSource<L>>,
        site_url: Url,
        fade: Duration,
        initial_word: Option<String>,
    ) -> Self {
        let word = initial_word.unwrap_or_else(|| words.next_word());
        let deriver = StyleDeriver::new(RenderedSampler::new(Rect::new(0, 0, 80, 24)));
        let style = deriver.derive(&word);
        let share_url = share_url(&site_url, &word);
        log::info!("showing {word:?} in {}", style.font);

        Self {
            words,
            deriver,
            site_url,
            fade,
            word,
            style,
            share_url,
            phase: Phase::Visible,
            editor: None,
            should_quit: false,
        }
    }

    pub fn share_url(&self) -> &Url {
        &self.share_url
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn is_fading_out(&self) -> bool {
        matches!(self.phase, Phase::FadingOut { .. })
    }

    /// The text color depends on what the gradient looks like at this size.
    pub fn resize(&mut self, viewport: Rect) {
        if self.deriver.sampler_mut().set_viewport(viewport) {
            self.style = self.deriver.derive(&self.word);
        }
    }

    /// Starts the fade-out that ends in a new word. Dropped while one is already running.
    pub fn refresh(&mut self, now: Instant) -> bool {
        if self.is_fading_out() {
            log::debug!("refresh ignored, transition in progress");
            return false;
        }

        self.phase = Phase::FadingOut { since: now };
        true
    }

    /// Advances the transition; a finished fade-out fetches the next word.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            Phase::FadingOut { since } if now.saturating_duration_since(since) >= self.fade => {
                let word = self.words.next_word();
                self.show_word(word, now);
            }
            Phase::FadingIn { since } if now.saturating_duration_since(since) >= self.fade => {
                self.phase = Phase::Visible;
            }
            _ => {}
        }
    }

    fn show_word(&mut self, word: String, now: Instant) {
        self.style = self.deriver.derive(&word);
        self.share_url = share_url(&self.site_url, &word);
        self.word = word;
        self.phase = Phase::FadingIn { since: now };
        log::info!("showing {:?} in {}", self.word, self.style.font);
    }

    fn progress(&self, since: Instant, now: Instant) -> f64 {
        if self.fade.is_zero() {
            return 1.0;
        }

        (now.saturating_duration_since(since).as_secs_f64() / self.fade.as_secs_f64()).min(1.0)
    }

    /// 1 when fully shown, 0 when fully faded out.
    pub fn text_opacity(&self, now: Instant) -> f64 {
        match self.phase {
            Phase::Visible => 1.0,
            Phase::FadingOut { since } => 1.0 - self.progress(since, now),
            Phase::FadingIn { since } => self.progress(since, now),
        }
    }

    /// Teardown: drops any pending transition so nothing fires afterwards.
    pub fn shutdown(&mut self) {
        if self.is_fading_out() {
            log::debug!("cancelling pending refresh");
            self.phase = Phase::Visible;
        }
        self.editor = None;
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.shutdown();
            return;
        }

        if let Some(editor) = self.editor.as_mut() {
            match key.code {
                KeyCode::Enter => {
                    let typed = editor.value().trim().to_string();
                    self.editor = None;
                    if !typed.is_empty() && !self.is_fading_out() {
                        self.show_word(typed, now);
                    }
                }
                KeyCode::Esc => {
                    self.editor = None;
                }
                KeyCode::Char(c) => {
                    editor.handle(InputRequest::InsertChar(c));
                }
                KeyCode::Backspace => {
                    editor.handle(InputRequest::DeletePrevChar);
                }
                KeyCode::Delete => {
                    editor.handle(InputRequest::DeleteNextChar);
                }
                KeyCode::Left => {
                    editor.handle(InputRequest::GoToPrevChar);
                }
                KeyCode::Right => {
                    editor.handle(InputRequest::GoToNextChar);
                }
                _ => {}
            }

            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.shutdown(),
            KeyCode::Char('r') | KeyCode::Char(' ') | KeyCode::F(5) => {
                self.refresh(now);
            }
            KeyCode::Char('/') if !self.is_fading_out() => {
                self.editor = Some(Input::new(self.word.clone()));
            }
            _ => {}
        }
    }

    pub fn draw_ui(&mut self, f: &mut Frame, now: Instant) {
        let area = f.area();
        self.resize(area);

        f.render_widget(GradientBackground::new(&self.style.gradient), area);

        let backdrop = self.style.gradient.color_at(0.5);
        let solid: Rgb = self.style.text_color.rgb();
        let faded = solid.lerp(backdrop, 1.0 - self.text_opacity(now));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(
                [
                    Constraint::Length(1), // Share link
                    Constraint::Min(1),    // Word
                    Constraint::Length(1), // Font and refresh
                ]
                .as_ref(),
            )
            .split(area);

        let link = Paragraph::new(self.share_url.as_str())
            .style(Style::default().fg(solid.into()))
            .alignment(Alignment::Center);
        f.render_widget(link, chunks[0]);

        f.render_widget(
            WordArt::new(&self.word, faded.into(), self.style.rotation_deg),
            chunks[1],
        );

        let footer = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(chunks[2]);

        let font = Paragraph::new(format!("Font: {}", self.style.font))
            .style(Style::default().fg(faded.into()));
        f.render_widget(font, footer[0]);

        let refresh = match self.phase {
            Phase::FadingOut { since } => {
                let frame = now.saturating_duration_since(since).as_millis() / 100;
                format!("{} {REFRESH_LABEL}", SPINNER[frame as usize % SPINNER.len()])
            }
            _ => format!("[r] {REFRESH_LABEL}"),
        };
        let refresh = Paragraph::new(refresh)
            .style(Style::default().fg(solid.into()))
            .alignment(Alignment::Right);
        f.render_widget(refresh, footer[1]);

        if let Some(editor) = &self.editor {
            let width = area.width.min(40);
            let popup = Rect::new(
                area.x + (area.width - width) / 2,
                area.y + area.height.saturating_sub(3) / 2,
                width,
                area.height.min(3),
            );

            let block = Block::default()
                .title("Type a word (Enter to show, Esc to cancel)")
                .borders(Borders::ALL);
            let inner = block.inner(popup);
            let scroll = editor.visual_scroll(inner.width.max(1) as usize);

            f.render_widget(Clear, popup);
            f.render_widget(
                Paragraph::new(editor.value())
                    .scroll((0, scroll as u16))
                    .block(block),
                popup,
            );

            let cursor_x = editor.visual_cursor().saturating_sub(scroll) as u16;
            f.set_cursor_position((inner.x + cursor_x, inner.y));
        }
    }
}
