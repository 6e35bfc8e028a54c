// src/questions.rs
//! Interview question bank loaded from TOML, with wrap-around navigation.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_QUESTIONS_CONFIG_PATH: &str = "config/questions.toml";
pub const ENV_QUESTIONS_CONFIG_PATH: &str = "QUESTIONS_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub tech_stack: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsRoot {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Non-empty, ordered list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self {
            questions: vec![
                Question {
                    question: "What is your experience with the MERN stack?".into(),
                    tech_stack: "Full Stack".into(),
                },
                Question {
                    question: "How do you manage state in a React application?".into(),
                    tech_stack: "React".into(),
                },
            ],
        }
    }
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> anyhow::Result<Self> {
        if questions.is_empty() {
            anyhow::bail!("question bank must contain at least one question");
        }
        Ok(Self { questions })
    }

    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let root: QuestionsRoot = toml::from_str(raw).context("parse questions TOML")?;
        Self::new(root.questions)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read question bank {}", path.display()))?;
        Self::from_toml_str(&raw)
    }

    /// Load from `QUESTIONS_CONFIG_PATH` (or the default path); falls back to
    /// the built-in bank when the file is missing or invalid.
    pub fn from_env() -> Self {
        let path = std::env::var(ENV_QUESTIONS_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_QUESTIONS_CONFIG_PATH.to_string());
        match Self::load_from_file(&path) {
            Ok(bank) => {
                info!(target: "questions", %path, count = bank.len(), "question bank loaded");
                bank
            }
            Err(e) => {
                warn!(target: "questions", %path, error = %e, "using built-in question bank");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Index after `index`, wrapping from the last question to the first.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 >= self.len() {
            0
        } else {
            index + 1
        }
    }

    /// Index before `index`, wrapping from the first question to the last.
    pub fn previous_index(&self, index: usize) -> usize {
        if index == 0 || index > self.len() {
            self.len() - 1
        } else {
            index - 1
        }
    }
}
