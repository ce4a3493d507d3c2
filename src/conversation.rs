//! Conversation state machine for the guided interview.
//!
//! A session is either collecting the answer to question `i` or complete.
//! `submit` records the answer synchronously and hands back the assistant's
//! follow-up as a [`PendingReply`], which the caller appends with
//! [`Session::deliver`] once any pacing delay has elapsed. Replies carry the
//! session epoch so that a reply scheduled before a reset is discarded.

use serde::Serialize;
use tracing::debug;

use crate::answers::AnswerMap;
use crate::assembler::build_prompt;
use crate::questions::{QUESTIONS, Question, total_questions};

pub const INTRO_MESSAGE: &str = "Olá! Eu sou seu assistente para criação de prompts complexos. Vou fazer algumas perguntas rápidas para entender melhor sua necessidade e então montar um prompt poderoso para você.";

pub const SUMMARY_MESSAGE: &str = "Excelente! Compilei todas as informações e gerei um prompt completo abaixo. Fique à vontade para revisá-lo ou ajustar algum ponto.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
}

impl Message {
    fn new(id: impl Into<String>, role: Role, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role,
            content: content.into(),
        }
    }

    fn unique(prefix: &str, role: Role, content: impl Into<String>) -> Self {
        let id = format!("{}-{}-{}", role.as_str(), prefix, uuid::Uuid::new_v4());
        Self::new(id, role, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the answer to the question at this index
    Collecting(usize),
    Complete,
}

/// Which kind of assistant follow-up a reply is; drives the pacing delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    NextQuestion,
    Summary,
}

/// Assistant message produced by a submission, not yet in the transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    pub epoch: u64,
    pub kind: ReplyKind,
    pub message: Message,
}

#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    answers: AnswerMap,
    active_index: usize,
    final_text: Option<String>,
    epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Fresh session with the intro and the first question seeded
    pub fn new() -> Self {
        Self {
            messages: seed_messages(),
            answers: AnswerMap::default(),
            active_index: 0,
            final_text: None,
            epoch: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn final_text(&self) -> Option<&str> {
        self.final_text.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn phase(&self) -> Phase {
        if self.active_index < total_questions() {
            Phase::Collecting(self.active_index)
        } else {
            Phase::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == Phase::Complete
    }

    /// Question awaiting an answer, if any
    pub fn active_question(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.active_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.answered_count()
    }

    /// `round(100 * answered / total)`
    pub fn progress_percent(&self) -> u8 {
        let ratio = self.answered_count() as f64 / total_questions() as f64;
        (ratio * 100.0).round() as u8
    }

    /// Record an answer for the active question.
    ///
    /// Returns `None` without touching state when the trimmed input is empty
    /// or the interview is already complete.
    pub fn submit(&mut self, input: &str) -> Option<PendingReply> {
        let Phase::Collecting(index) = self.phase() else {
            debug!("submission ignored: interview complete");
            return None;
        };
        let trimmed = input.trim();
        if trimmed.is_empty() {
            debug!("submission ignored: empty answer");
            return None;
        }

        let current = &QUESTIONS[index];
        self.answers.set(current.key, trimmed);
        self.messages
            .push(Message::unique(current.key.as_str(), Role::User, trimmed));
        self.active_index = index + 1;

        let (kind, message) = match QUESTIONS.get(index + 1) {
            Some(next) => {
                let content = format!(
                    "Perfeito, entendi sobre {}.\n\n{}: {}",
                    current.title.to_lowercase(),
                    next.title,
                    next.prompt
                );
                (
                    ReplyKind::NextQuestion,
                    Message::unique(next.key.as_str(), Role::Assistant, content),
                )
            }
            None => {
                self.final_text = Some(build_prompt(&self.answers));
                (
                    ReplyKind::Summary,
                    Message::unique("summary", Role::Assistant, SUMMARY_MESSAGE),
                )
            }
        };
        debug!(
            question = current.key.as_str(),
            answered = self.answered_count(),
            "answer recorded"
        );

        Some(PendingReply {
            epoch: self.epoch,
            kind,
            message,
        })
    }

    /// Append a pending reply to the transcript.
    ///
    /// Replies from an earlier epoch are dropped; returns whether the reply
    /// was appended.
    pub fn deliver(&mut self, reply: PendingReply) -> bool {
        if reply.epoch != self.epoch {
            debug!(
                reply_epoch = reply.epoch,
                epoch = self.epoch,
                "stale reply discarded"
            );
            return false;
        }
        self.messages.push(reply.message);
        true
    }

    /// Submit and deliver the follow-up immediately
    pub fn answer(&mut self, input: &str) -> bool {
        match self.submit(input) {
            Some(reply) => self.deliver(reply),
            None => false,
        }
    }

    /// Back to the initial shape; bumps the epoch
    pub fn reset(&mut self) {
        self.messages = seed_messages();
        self.answers = AnswerMap::default();
        self.active_index = 0;
        self.final_text = None;
        self.epoch = self.epoch.wrapping_add(1);
        debug!(epoch = self.epoch, "session reset");
    }
}

fn seed_messages() -> Vec<Message> {
    let first = &QUESTIONS[0];
    vec![
        Message::new("intro", Role::Assistant, INTRO_MESSAGE),
        Message::new(
            format!("assistant-{}", first.key.as_str()),
            Role::Assistant,
            format!("{}: {}", first.title, first.prompt),
        ),
    ]
}
