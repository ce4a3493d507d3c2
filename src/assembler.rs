//! Assembles the final prompt text from collected answers.
//!
//! Pure and infallible: empty answers are omitted, never an error.

use crate::answers::AnswerMap;
use crate::questions::QuestionKey;

pub const PREAMBLE: &str = "Você é um assistente especialista em gerar resultados excepcionais. Siga as diretrizes a seguir com atenção:";

pub const CLOSING: &str = "Antes de responder, valide se possui informações suficientes. Se algo estiver faltando, peça esclarecimentos. Em seguida, produza a melhor resposta possível.";

/// Bullet label used for each key in the assembled prompt
pub fn section_label(key: QuestionKey) -> &'static str {
    match key {
        QuestionKey::Objetivo => "Objetivo principal",
        QuestionKey::Publico => "Público-alvo e persona",
        QuestionKey::Contexto => "Contexto essencial",
        QuestionKey::Entregaveis => "Formato e entregáveis",
        QuestionKey::Estilo => "Estilo e tom",
        QuestionKey::Restricoes => "Restrições críticas",
        QuestionKey::Recursos => "Recursos obrigatórios",
    }
}

/// Render the `- label: value` lines for every non-empty answer
pub fn format_sections(answers: &AnswerMap) -> String {
    answers
        .iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(format!("- {}: {}", section_label(key), value))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the final prompt
pub fn build_prompt(answers: &AnswerMap) -> String {
    format!("{PREAMBLE}\n{}\n\n{CLOSING}", format_sections(answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answers() -> AnswerMap {
        AnswerMap {
            objetivo: "Escrever um anúncio".into(),
            publico: "Jovens adultos".into(),
            contexto: "Lançamento de app".into(),
            entregaveis: "Três variações".into(),
            estilo: "Descontraído".into(),
            restricoes: "Até 50 palavras".into(),
            recursos: "Nenhum".into(),
        }
    }

    #[test]
    fn test_full_prompt_layout() {
        let prompt = build_prompt(&full_answers());
        let expected = format!(
            "{PREAMBLE}\n\
             - Objetivo principal: Escrever um anúncio\n\
             - Público-alvo e persona: Jovens adultos\n\
             - Contexto essencial: Lançamento de app\n\
             - Formato e entregáveis: Três variações\n\
             - Estilo e tom: Descontraído\n\
             - Restrições críticas: Até 50 palavras\n\
             - Recursos obrigatórios: Nenhum\n\n\
             {CLOSING}"
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_empty_answer_leaves_no_gap() {
        let mut answers = full_answers();
        answers.contexto = String::new();
        answers.estilo = "   ".into();

        let prompt = build_prompt(&answers);
        assert!(!prompt.contains("Contexto essencial"));
        assert!(!prompt.contains("Estilo e tom"));
        assert_eq!(prompt.lines().filter(|l| l.starts_with("- ")).count(), 5);

        let sections = format_sections(&answers);
        assert!(!sections.contains("\n\n"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let answers = AnswerMap {
            recursos: "  API interna  \n".into(),
            ..Default::default()
        };
        assert_eq!(format_sections(&answers), "- Recursos obrigatórios: API interna");
    }

    #[test]
    fn test_deterministic() {
        let answers = full_answers();
        assert_eq!(build_prompt(&answers), build_prompt(&answers));
    }
}
