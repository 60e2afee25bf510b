use delfos_utils::id_map::{ItemId, id_map};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProfileV01 {
    /// # Profile name
    /// Names the topic partition, e.g. `credit`.
    pub id: String,
    /// # Question id prefix
    /// Every question id in this profile is the prefix followed by a
    /// zero-padded four digit ordinal.
    pub prefix: String,
    #[serde(with = "id_map")]
    /// # Questions of this profile
    pub questions: IndexMap<String, QuestionV01>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct QuestionV01 {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Single letter naming the correct option: `a` is the first option.
    pub answer: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemId for QuestionV01 {
    type IdType = String;

    fn id(&self) -> Self::IdType {
        self.id.clone()
    }
}
