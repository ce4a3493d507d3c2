pub mod answers;
pub mod app;
pub mod assembler;
pub mod clipboard;
pub mod config;
pub mod conversation;
pub mod error;
pub mod pacing;
pub mod questions;
pub mod tui;
pub mod view;

pub use answers::AnswerMap;
pub use assembler::build_prompt;
pub use conversation::{Message, Phase, Role, Session};
pub use error::{PromptBuilderError, Result};
pub use questions::{Question, QuestionKey};
