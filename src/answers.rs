//! Fixed-shape answer record, one field per question key.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::questions::QuestionKey;

/// Trimmed answers keyed by question. An empty string means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerMap {
    pub objetivo: String,
    pub publico: String,
    pub contexto: String,
    pub entregaveis: String,
    pub estilo: String,
    pub restricoes: String,
    pub recursos: String,
}

impl AnswerMap {
    /// Read answers from a TOML file, or JSON when the extension is `.json`
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    pub fn get(&self, key: QuestionKey) -> &str {
        match key {
            QuestionKey::Objetivo => &self.objetivo,
            QuestionKey::Publico => &self.publico,
            QuestionKey::Contexto => &self.contexto,
            QuestionKey::Entregaveis => &self.entregaveis,
            QuestionKey::Estilo => &self.estilo,
            QuestionKey::Restricoes => &self.restricoes,
            QuestionKey::Recursos => &self.recursos,
        }
    }

    /// Store `value` trimmed under `key`
    pub fn set(&mut self, key: QuestionKey, value: &str) {
        let slot = match key {
            QuestionKey::Objetivo => &mut self.objetivo,
            QuestionKey::Publico => &mut self.publico,
            QuestionKey::Contexto => &mut self.contexto,
            QuestionKey::Entregaveis => &mut self.entregaveis,
            QuestionKey::Estilo => &mut self.estilo,
            QuestionKey::Restricoes => &mut self.restricoes,
            QuestionKey::Recursos => &mut self.recursos,
        };
        *slot = value.trim().to_string();
    }

    pub fn is_answered(&self, key: QuestionKey) -> bool {
        !self.get(key).trim().is_empty()
    }

    pub fn answered_count(&self) -> usize {
        QuestionKey::ALL
            .iter()
            .filter(|k| self.is_answered(**k))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == QuestionKey::ALL.len()
    }

    /// Entries in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (QuestionKey, &str)> + '_ {
        QuestionKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptBuilderError;

    fn scratch_file(ext: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("answers-{}.{ext}", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_set_trims_and_counts() {
        let mut answers = AnswerMap::default();
        assert_eq!(answers.answered_count(), 0);

        answers.set(QuestionKey::Estilo, "  formal  ");
        assert_eq!(answers.get(QuestionKey::Estilo), "formal");
        assert_eq!(answers.answered_count(), 1);
        assert!(!answers.is_complete());
    }

    #[test]
    fn test_whitespace_counts_as_unanswered() {
        let answers = AnswerMap {
            publico: "   ".into(),
            ..Default::default()
        };
        assert!(!answers.is_answered(QuestionKey::Publico));
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let answers: AnswerMap = toml::from_str("objetivo = \"Resumir um artigo\"").unwrap();
        assert_eq!(answers.objetivo, "Resumir um artigo");
        assert!(answers.recursos.is_empty());
    }

    #[test]
    fn test_iter_is_canonical() {
        let answers = AnswerMap::default();
        let keys: Vec<QuestionKey> = answers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, QuestionKey::ALL.to_vec());
    }

    #[test]
    fn test_from_path_reads_json_and_toml() {
        let json = scratch_file("json", r#"{"objetivo": "Resumir", "estilo": "direto"}"#);
        let answers = AnswerMap::from_path(&json).unwrap();
        assert_eq!(answers.objetivo, "Resumir");
        assert_eq!(answers.estilo, "direto");
        std::fs::remove_file(&json).unwrap();

        let toml = scratch_file("toml", "publico = \"Iniciantes\"\n");
        let answers = AnswerMap::from_path(&toml).unwrap();
        assert_eq!(answers.publico, "Iniciantes");
        assert_eq!(answers.answered_count(), 1);
        std::fs::remove_file(&toml).unwrap();
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("absent-{}.toml", uuid::Uuid::new_v4()));
        let err = AnswerMap::from_path(&path).unwrap_err();
        assert!(matches!(err, PromptBuilderError::Io { .. }));
    }

    #[test]
    fn test_from_path_malformed_content_is_serialization_error() {
        let json = scratch_file("json", "{ not json");
        let err = AnswerMap::from_path(&json).unwrap_err();
        assert!(matches!(err, PromptBuilderError::Serialization { .. }));
        std::fs::remove_file(&json).unwrap();

        let toml = scratch_file("toml", "objetivo = ");
        let err = AnswerMap::from_path(&toml).unwrap_err();
        assert!(matches!(err, PromptBuilderError::Serialization { .. }));
        std::fs::remove_file(&toml).unwrap();
    }
}
