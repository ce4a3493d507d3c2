//! Interactive application state: the session plus everything around it
//! (input buffer, copy indicator, transcript scroll, pacing).

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::clipboard::Clipboard;
use crate::config::{Config, PacingConfig};
use crate::conversation::{PendingReply, ReplyKind, Session};
use crate::error::Result;
use crate::pacing::Scheduler;
use crate::view::SessionView;

/// Events delivered back to the UI loop by the scheduler
#[derive(Debug)]
pub enum AppEvent {
    /// The delay for the outstanding reply with this sequence number ran out
    ReplyDue(u64),
    CopyFinished(Result<()>),
    /// Hide the "copied" acknowledgement for the given copy generation
    CopiedExpired(u64),
}

pub struct App {
    session: Session,
    input: String,
    copied: bool,
    copy_generation: u64,
    /// Assistant reply not yet shown, tagged with its sequence number
    pending: Option<(u64, PendingReply)>,
    reply_seq: u64,
    /// Lines scrolled back from the bottom of the transcript
    scroll: u16,
    should_quit: bool,
    pacing: PacingConfig,
    clipboard: Arc<dyn Clipboard>,
    scheduler: Scheduler<AppEvent>,
    events: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(config: &Config, clipboard: Arc<dyn Clipboard>, handle: Handle) -> Self {
        let (scheduler, events) = Scheduler::new(handle);
        Self {
            session: Session::new(),
            input: String::new(),
            copied: false,
            copy_generation: 0,
            pending: None,
            reply_seq: 0,
            scroll: 0,
            should_quit: false,
            pacing: config.pacing.clone(),
            clipboard,
            scheduler,
            events,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView::from_session(&self.session, self.copied)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Submit the input buffer. The buffer is cleared either way.
    ///
    /// A reply still waiting on its delay is shown first, so the transcript
    /// keeps alternating between question and answer.
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        if text.trim().is_empty() || self.session.is_complete() {
            return;
        }
        self.flush_pending();
        let Some(reply) = self.session.submit(&text) else {
            return;
        };
        self.scroll = 0;
        let delay = match reply.kind {
            ReplyKind::NextQuestion => self.pacing.reply_delay(),
            ReplyKind::Summary => {
                info!("all questions answered, prompt assembled");
                self.pacing.summary_delay()
            }
        };
        self.reply_seq += 1;
        self.pending = Some((self.reply_seq, reply));
        self.scheduler.schedule(AppEvent::ReplyDue(self.reply_seq), delay);
    }

    fn flush_pending(&mut self) {
        if let Some((_, reply)) = self.pending.take() {
            self.session.deliver(reply);
        }
    }

    /// Start a new session, dropping anything still scheduled for the old one
    pub fn reset(&mut self) {
        self.scheduler.cancel_pending();
        self.pending = None;
        self.session.reset();
        self.input.clear();
        self.copied = false;
        self.scroll = 0;
        info!("flow restarted");
    }

    /// Copy the final prompt; a no-op until the interview is complete
    pub fn copy_final(&mut self) {
        let Some(text) = self.session.final_text().map(str::to_string) else {
            return;
        };
        let clipboard = Arc::clone(&self.clipboard);
        self.scheduler
            .run_blocking(move || AppEvent::CopyFinished(clipboard.write_text(&text)));
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ReplyDue(seq) => {
                if self.pending.as_ref().is_some_and(|(s, _)| *s == seq) {
                    self.flush_pending();
                }
            }
            AppEvent::CopyFinished(Ok(())) => {
                self.copied = true;
                self.copy_generation += 1;
                self.scheduler.schedule(
                    AppEvent::CopiedExpired(self.copy_generation),
                    self.pacing.copied_indicator(),
                );
            }
            AppEvent::CopyFinished(Err(e)) => {
                error!("Copy failed: {}", e);
            }
            AppEvent::CopiedExpired(generation) => {
                if generation == self.copy_generation {
                    self.copied = false;
                }
            }
        }
    }

    /// Apply every event that is ready without blocking
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    /// Wait for the next event and apply it; false once the channel is closed
    pub async fn next_event(&mut self) -> bool {
        match self.events.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Char('y') if ctrl => self.copy_final(),
            KeyCode::Char('j') if ctrl => self.push_char('\n'),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => self.push_char('\n'),
            KeyCode::Enter => self.submit_input(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::PageUp => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Char(c) if !ctrl => self.push_char(c),
            _ => {}
        }
    }

    fn push_char(&mut self, c: char) {
        // Input is disabled once the prompt exists
        if !self.session.is_complete() {
            self.input.push(c);
        }
    }
}
