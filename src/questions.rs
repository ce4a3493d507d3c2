//! The fixed question set walked by the guided interview.
//!
//! Questions are defined once, in canonical order, and never mutated. The
//! order here is also the order of the bullets in the assembled prompt.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::PromptBuilderError;

/// Identifier of one facet of the prompt being elicited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKey {
    Objetivo,
    Publico,
    Contexto,
    Entregaveis,
    Estilo,
    Restricoes,
    Recursos,
}

impl QuestionKey {
    /// All keys in canonical order
    pub const ALL: [QuestionKey; 7] = [
        QuestionKey::Objetivo,
        QuestionKey::Publico,
        QuestionKey::Contexto,
        QuestionKey::Entregaveis,
        QuestionKey::Estilo,
        QuestionKey::Restricoes,
        QuestionKey::Recursos,
    ];

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::Objetivo => "objetivo",
            QuestionKey::Publico => "publico",
            QuestionKey::Contexto => "contexto",
            QuestionKey::Entregaveis => "entregaveis",
            QuestionKey::Estilo => "estilo",
            QuestionKey::Restricoes => "restricoes",
            QuestionKey::Recursos => "recursos",
        }
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionKey {
    type Err = PromptBuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PromptBuilderError::Validation {
                message: format!("unknown question key '{s}'"),
            })
    }
}

/// A single question definition
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub key: QuestionKey,
    /// Short label shown in the summary panel
    pub title: &'static str,
    /// Text asked in the transcript
    pub prompt: &'static str,
    /// Example answers shown under the transcript
    pub helper: Option<&'static str>,
}

pub static QUESTIONS: [Question; 7] = [
    Question {
        key: QuestionKey::Objetivo,
        title: "Objetivo Principal",
        prompt: "Qual é o objetivo central do prompt? Descreva o resultado ideal que você espera.",
        helper: Some(
            "Ex.: criar um roteiro de vídeo educativo, analisar dados de vendas, escrever um email persuasivo.",
        ),
    },
    Question {
        key: QuestionKey::Publico,
        title: "Público-alvo",
        prompt: "Quem é o público ou persona que deve ser considerado? Inclua nível de conhecimento, tom ideal ou preferências.",
        helper: Some(
            "Ex.: iniciantes em programação, executivos de marketing, estudantes universitários.",
        ),
    },
    Question {
        key: QuestionKey::Contexto,
        title: "Contexto Essencial",
        prompt: "Quais informações de contexto o assistente precisa saber para gerar a resposta correta?",
        helper: Some(
            "Ex.: dados disponíveis, histórico do projeto, limitações técnicas, referências existentes.",
        ),
    },
    Question {
        key: QuestionKey::Entregaveis,
        title: "Entregáveis e Formato",
        prompt: "Que formato ou estrutura você espera na resposta? Liste itens específicos ou etapas se necessário.",
        helper: Some("Ex.: lista numerada, tabela comparativa, plano em etapas com prazos."),
    },
    Question {
        key: QuestionKey::Estilo,
        title: "Estilo e Tom",
        prompt: "Qual estilo de comunicação deve ser adotado? Descreva tom, voz e nível de profundidade desejado.",
        helper: Some("Ex.: formal e objetivo, inspirador e motivador, técnico e detalhado."),
    },
    Question {
        key: QuestionKey::Restricoes,
        title: "Restrições Críticas",
        prompt: "Existem restrições, regras ou pontos que devem ser evitados? Inclua limites de tempo, referências proibidas, etc.",
        helper: Some(
            "Ex.: evitar jargões, limitar a 500 palavras, usar apenas dados fornecidos.",
        ),
    },
    Question {
        key: QuestionKey::Recursos,
        title: "Recursos e Ferramentas",
        prompt: "Há ferramentas, frameworks ou fontes específicas que devem ser utilizadas ou consultadas?",
        helper: Some(
            "Ex.: usar API interna X, consultar documentação do produto, seguir guideline da marca.",
        ),
    },
];

/// The question set in canonical order
pub fn question_set() -> &'static [Question] {
    &QUESTIONS
}

/// Number of questions in the interview
pub fn total_questions() -> usize {
    QUESTIONS.len()
}

/// Look up a question by key
pub fn question(key: QuestionKey) -> &'static Question {
    &QUESTIONS[key.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_follow_canonical_key_order() {
        let keys: Vec<QuestionKey> = QUESTIONS.iter().map(|q| q.key).collect();
        assert_eq!(keys, QuestionKey::ALL.to_vec());
    }

    #[test]
    fn test_every_question_has_helper() {
        assert!(QUESTIONS.iter().all(|q| q.helper.is_some()));
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(
            "entregaveis".parse::<QuestionKey>().unwrap(),
            QuestionKey::Entregaveis
        );
        assert_eq!(" Estilo ".parse::<QuestionKey>().unwrap(), QuestionKey::Estilo);
        assert!("orcamento".parse::<QuestionKey>().is_err());
    }

    #[test]
    fn test_lookup_by_key() {
        assert_eq!(question(QuestionKey::Recursos).title, "Recursos e Ferramentas");
        assert_eq!(total_questions(), 7);
    }
}
