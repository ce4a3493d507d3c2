//! End-to-end tests for the guided interview: answer collection, reset and
//! the assembled prompt.

use prompt_builder::assembler::{CLOSING, PREAMBLE};
use prompt_builder::conversation::{INTRO_MESSAGE, Phase, Role, Session};
use prompt_builder::questions::{QUESTIONS, QuestionKey};
use prompt_builder::{AnswerMap, build_prompt};

const ANSWERS: [&str; 7] = [
    "Escrever um anúncio",
    "Jovens profissionais de tecnologia",
    "Lançamento de um curso online",
    "Três versões curtas",
    "Direto e entusiasmado",
    "Sem jargões",
    "Nenhum",
];

fn completed_session() -> Session {
    let mut session = Session::new();
    for answer in ANSWERS {
        assert!(session.answer(answer));
    }
    session
}

fn assert_initial_shape(session: &Session) {
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::Assistant);
    assert_eq!(messages[0].content, INTRO_MESSAGE);
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(
        messages[1].content,
        format!("{}: {}", QUESTIONS[0].title, QUESTIONS[0].prompt)
    );
    assert_eq!(session.active_index(), 0);
    assert_eq!(session.phase(), Phase::Collecting(0));
    assert_eq!(session.answers(), &AnswerMap::default());
    assert!(session.final_text().is_none());
}

#[test]
fn test_full_interview_produces_ordered_prompt() {
    let session = completed_session();
    assert_eq!(session.phase(), Phase::Complete);

    let text = session.final_text().expect("final text after seven answers");
    assert!(text.starts_with(PREAMBLE));
    assert!(text.ends_with(CLOSING));

    let bullets: Vec<&str> = text.lines().filter(|l| l.starts_with("- ")).collect();
    assert_eq!(bullets.len(), 7);
    for (bullet, answer) in bullets.iter().zip(ANSWERS) {
        assert!(bullet.ends_with(answer), "{bullet} should end with {answer}");
    }
    assert!(bullets[0].starts_with("- Objetivo principal:"));
    assert!(bullets[6].starts_with("- Recursos obrigatórios:"));
}

#[test]
fn test_answers_are_trimmed_in_prompt() {
    let mut session = Session::new();
    for answer in ANSWERS {
        session.answer(&format!("   {answer}\n\t"));
    }
    assert_eq!(session.final_text(), completed_session().final_text());
}

#[test]
fn test_transcript_alternates_after_seed() {
    let session = completed_session();
    // intro + q0, then (user, assistant) per answer
    assert_eq!(session.messages().len(), 2 + 2 * 7);
    for pair in session.messages()[2..].chunks(2) {
        assert_eq!(pair[0].role, Role::User);
        assert_eq!(pair[1].role, Role::Assistant);
    }
    assert!(session.messages()[3]
        .content
        .starts_with("Perfeito, entendi sobre objetivo principal."));
}

#[test]
fn test_blank_submissions_never_change_state() {
    let mut session = Session::new();
    for answer in ANSWERS {
        let messages = session.messages().to_vec();
        let answers = session.answers().clone();
        let index = session.active_index();

        for blank in ["", " ", "\n\t  "] {
            assert!(session.submit(blank).is_none());
        }
        assert_eq!(session.messages(), messages.as_slice());
        assert_eq!(session.answers(), &answers);
        assert_eq!(session.active_index(), index);

        session.answer(answer);
    }
}

#[test]
fn test_reset_restores_initial_shape_from_any_state() {
    let mut session = Session::new();
    session.reset();
    assert_initial_shape(&session);

    session.answer("Algo");
    session.answer("Alguém");
    session.reset();
    assert_initial_shape(&session);

    let mut session = completed_session();
    session.reset();
    assert_initial_shape(&session);
}

#[test]
fn test_progress_percentage() {
    let mut session = Session::new();
    let expected = [0u8, 14, 29, 43, 57, 71, 86, 100];
    assert_eq!(session.progress_percent(), expected[0]);
    for (i, answer) in ANSWERS.iter().enumerate() {
        session.answer(answer);
        assert_eq!(session.progress_percent(), expected[i + 1]);
    }
}

#[test]
fn test_assembler_omits_bypassed_answers() {
    let mut answers = AnswerMap::default();
    for (key, value) in QuestionKey::ALL.into_iter().zip(ANSWERS) {
        answers.set(key, value);
    }
    answers.set(QuestionKey::Entregaveis, "");

    let text = build_prompt(&answers);
    assert!(!text.contains("Formato e entregáveis"));
    assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 6);
    assert!(text.contains("- Contexto essencial: Lançamento de um curso online\n- Estilo e tom:"));
}

#[test]
fn test_final_text_only_when_all_answered() {
    let mut session = Session::new();
    for answer in ANSWERS {
        assert_eq!(session.final_text().is_some(), session.answers().is_complete());
        session.answer(answer);
    }
    assert!(session.final_text().is_some());
    assert!(session.answers().is_complete());
}
