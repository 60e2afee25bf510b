use crate::bank::error::BankError;
use crate::bank::v01::ProfileV01;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

pub mod error;
pub mod v01;

#[derive(Deserialize, Debug)]
#[serde(tag = "version")]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub enum VersionConfig {
    #[serde(rename = "0.1")]
    V01 { profile: ProfileV01 },
}

/// A validated topic profile: a contiguous, prefix-addressed slice of the
/// question id space.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: String,
    pub prefix: String,
    pub questions: IndexMap<String, Question>,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Lower-cased single letter; already checked against `options`.
    pub answer: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BankConfig {
    pub profiles: IndexMap<String, Profile>,
}

impl BankConfig {
    #[must_use]
    pub fn get(&self, profile_id: &str) -> Option<&Profile> {
        self.profiles.get(profile_id)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.profiles.values().map(|p| p.questions.len()).sum()
    }
}

impl TryFrom<ProfileV01> for Profile {
    type Error = BankError;

    fn try_from(v01: ProfileV01) -> Result<Self, Self::Error> {
        if v01.prefix.is_empty() {
            return Err(BankError::EmptyPrefix(v01.id));
        }
        if v01.questions.is_empty() {
            return Err(BankError::EmptyProfile(v01.id));
        }

        let mut questions = IndexMap::with_capacity(v01.questions.len());
        for (position, question) in v01.questions.into_values().enumerate() {
            // Ids must be the prefix plus the 1-based position, zero padded.
            // This single check also rejects duplicates and gaps: either one
            // breaks the sequence.
            let expected = format!("{}{:04}", v01.prefix, position + 1);
            if question.id != expected {
                return Err(BankError::IdOutOfSequence {
                    profile: v01.id,
                    position: position + 1,
                    expected,
                    found: question.id,
                });
            }
            let question = validate_question(question)?;
            questions.insert(question.id.clone(), question);
        }

        Ok(Self {
            id: v01.id,
            prefix: v01.prefix,
            questions,
        })
    }
}

fn validate_question(v01: v01::QuestionV01) -> Result<Question, BankError> {
    if v01.options.len() < 2 {
        return Err(BankError::TooFewOptions(v01.id));
    }
    let answer = v01.answer.trim().to_lowercase();
    let mut letters = answer.chars();
    let (letter, rest) = (letters.next(), letters.next());
    let (Some(letter @ 'a'..='z'), None) = (letter, rest) else {
        return Err(BankError::MalformedAnswer {
            question: v01.id,
            answer: v01.answer,
        });
    };
    let option_index = letter as usize - 'a' as usize;
    if option_index >= v01.options.len() {
        return Err(BankError::AnswerNotAnOption {
            question: v01.id,
            answer,
            options: v01.options.len(),
        });
    }
    Ok(Question {
        id: v01.id,
        question: v01.question,
        options: v01.options,
        answer,
        description: v01.description,
    })
}

/// Loads every `*.yaml`/`*.yml` profile document in `dir`. Any malformed or
/// inconsistent document fails the whole load; the bank is all-or-nothing at
/// process start.
pub async fn load(dir: &Path) -> Result<BankConfig, BankError> {
    tracing::debug!(?dir, "loading question bank");
    let mut profiles: IndexMap<String, Profile> = IndexMap::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if !is_yaml {
            continue;
        }
        tracing::trace!(?path, "loading bank profile document");
        let raw = tokio::fs::read_to_string(&path).await?;
        let VersionConfig::V01 { profile } = serde_yml::from_str::<VersionConfig>(&raw)?;
        let profile = Profile::try_from(profile)?;
        if profiles.contains_key(&profile.id) {
            return Err(BankError::DuplicateProfile(profile.id));
        }
        profiles.insert(profile.id.clone(), profile);
    }
    if profiles.is_empty() {
        return Err(BankError::NoProfiles(dir.to_path_buf()));
    }
    check_prefixes(&profiles)?;
    tracing::debug!(
        profiles = profiles.len(),
        questions = profiles.values().map(|p| p.questions.len()).sum::<usize>(),
        "loaded question bank"
    );
    Ok(BankConfig { profiles })
}

fn check_prefixes(profiles: &IndexMap<String, Profile>) -> Result<(), BankError> {
    for (index, profile) in profiles.values().enumerate() {
        for other in profiles.values().skip(index + 1) {
            if profile.prefix == other.prefix {
                return Err(BankError::DuplicatePrefix {
                    first: profile.id.clone(),
                    second: other.id.clone(),
                    prefix: profile.prefix.clone(),
                });
            }
        }
    }
    Ok(())
}
