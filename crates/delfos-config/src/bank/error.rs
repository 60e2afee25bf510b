use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BankError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse bank document")]
    Yaml(#[from] serde_yml::Error),

    #[error("no bank profiles found in {0}")]
    NoProfiles(PathBuf),

    #[error("profile {0} is defined more than once")]
    DuplicateProfile(String),

    #[error("profiles {first} and {second} share the id prefix {prefix}")]
    DuplicatePrefix {
        first: String,
        second: String,
        prefix: String,
    },

    #[error("profile {0} has an empty id prefix")]
    EmptyPrefix(String),

    #[error("profile {0} has no questions")]
    EmptyProfile(String),

    #[error("profile {profile}: expected question id {expected} at position {position}, found {found}")]
    IdOutOfSequence {
        profile: String,
        position: usize,
        expected: String,
        found: String,
    },

    #[error("question {0} must offer at least two options")]
    TooFewOptions(String),

    #[error("question {question}: answer {answer:?} is not a single option letter")]
    MalformedAnswer { question: String, answer: String },

    #[error("question {question}: answer {answer:?} names none of its {options} options")]
    AnswerNotAnOption {
        question: String,
        answer: String,
        options: usize,
    },
}
