//! Read-only projection of a session into what the screen shows.

use crate::conversation::{Message, Session};
use crate::questions::QUESTIONS;

pub const TITLE: &str = "Construtor de Prompt Inteligente";
pub const SUBTITLE: &str = "Responda às perguntas estratégicas e obtenha um prompt final sob medida para seu objetivo.";
pub const PENDING_PLACEHOLDER: &str = "Aguardando sua resposta.";
pub const INPUT_PLACEHOLDER: &str = "Digite sua resposta aqui...";

/// Summary row for one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionStatus {
    pub title: &'static str,
    pub answered: bool,
    /// Answer text, or the pending placeholder
    pub display: String,
}

impl QuestionStatus {
    pub fn label(&self) -> &'static str {
        if self.answered { "Definido" } else { "Pendente" }
    }
}

#[derive(Debug, Clone)]
pub struct SessionView<'a> {
    pub messages: &'a [Message],
    pub statuses: Vec<QuestionStatus>,
    pub progress_percent: u8,
    pub helper: Option<&'static str>,
    pub final_text: Option<&'a str>,
    pub copied: bool,
}

impl<'a> SessionView<'a> {
    pub fn from_session(session: &'a Session, copied: bool) -> Self {
        let answers = session.answers();
        let statuses = QUESTIONS
            .iter()
            .map(|q| {
                let value = answers.get(q.key);
                let answered = !value.is_empty();
                QuestionStatus {
                    title: q.title,
                    answered,
                    display: if answered {
                        value.to_string()
                    } else {
                        PENDING_PLACEHOLDER.to_string()
                    },
                }
            })
            .collect();

        Self {
            messages: session.messages(),
            statuses,
            progress_percent: session.progress_percent(),
            helper: session.active_question().and_then(|q| q.helper),
            final_text: session.final_text(),
            copied,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.final_text.is_none()
    }

    pub fn can_copy(&self) -> bool {
        self.final_text.is_some()
    }

    pub fn progress_label(&self) -> String {
        format!("{}% completo", self.progress_percent)
    }

    pub fn copy_label(&self) -> &'static str {
        if self.copied { "Copiado!" } else { "Copiar prompt" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_view() {
        let session = Session::new();
        let view = SessionView::from_session(&session, false);

        assert_eq!(view.progress_label(), "0% completo");
        assert!(view.statuses.iter().all(|s| !s.answered));
        assert_eq!(view.statuses[0].display, PENDING_PLACEHOLDER);
        assert_eq!(view.statuses[0].label(), "Pendente");
        assert!(view.helper.unwrap().starts_with("Ex.: criar um roteiro"));
        assert!(view.can_submit());
        assert!(!view.can_copy());
    }

    #[test]
    fn test_progress_after_three_answers() {
        let mut session = Session::new();
        for answer in ["a", "b", "c"] {
            session.answer(answer);
        }
        let view = SessionView::from_session(&session, false);
        assert_eq!(view.progress_percent, 43);
        assert_eq!(view.statuses[2].display, "c");
        assert_eq!(view.statuses[2].label(), "Definido");
        assert!(view.helper.unwrap().starts_with("Ex.: lista numerada"));
    }

    #[test]
    fn test_complete_view() {
        let mut session = Session::new();
        for i in 0..7 {
            session.answer(&format!("r{i}"));
        }
        let view = SessionView::from_session(&session, true);
        assert_eq!(view.progress_percent, 100);
        assert!(view.helper.is_none());
        assert!(!view.can_submit());
        assert!(view.can_copy());
        assert_eq!(view.copy_label(), "Copiado!");
    }
}
