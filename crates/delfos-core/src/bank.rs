use delfos_config::bank::BankConfig;
use delfos_model::question::{AnswerKey, Question};
use std::collections::HashMap;

/// A topic partition of the question id space, reduced to what the selector
/// needs: the id prefix and how many questions exist under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub prefix: String,
    pub size: usize,
}

impl Profile {
    /// Renders the id of the question at a 1-based ordinal, e.g. `CRD0007`.
    #[must_use]
    pub fn question_id(&self, ordinal: usize) -> String {
        format!("{}{:04}", self.prefix, ordinal)
    }
}

/// Immutable lookup tables built once from the validated bank config and
/// shared read-only across all request handlers.
#[derive(Debug, Default)]
pub struct QuestionBank {
    questions: HashMap<String, Question>,
    answers: HashMap<String, AnswerKey>,
    profiles: HashMap<String, Profile>,
}

impl QuestionBank {
    #[must_use]
    pub fn lookup_question(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    #[must_use]
    pub fn lookup_answer(&self, id: &str) -> Option<&AnswerKey> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    #[must_use]
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

impl From<BankConfig> for QuestionBank {
    fn from(config: BankConfig) -> Self {
        let mut bank = Self::default();
        for profile in config.profiles.into_values() {
            bank.profiles.insert(
                profile.id.clone(),
                Profile {
                    name: profile.id,
                    prefix: profile.prefix,
                    size: profile.questions.len(),
                },
            );
            for question in profile.questions.into_values() {
                bank.answers.insert(
                    question.id.clone(),
                    AnswerKey {
                        question_id: question.id.clone(),
                        answer: question.answer,
                        description: question.description,
                    },
                );
                bank.questions.insert(
                    question.id.clone(),
                    Question {
                        id: question.id,
                        question: question.question,
                        options: question.options,
                    },
                );
            }
        }
        bank
    }
}
