use serde::{Deserialize, Deserializer, Serialize};

use super::ids::SoalId;

/// One multiple-choice option. `key` is the letter submitted as the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: String,
    pub text: String,
}

/// A question as served by `GET /subtests/{code}/questions/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_soal_id")]
    pub soal_id: Option<SoalId>,
    #[serde(rename = "subtestId", default)]
    pub subtest_id: String,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "question_image", default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// Key under which an answer to this question is stored: the backend id
    /// when present, otherwise the position in the question list.
    #[must_use]
    pub fn answer_key(&self, index: usize) -> String {
        match &self.soal_id {
            Some(id) => id.to_string(),
            None => index.to_string(),
        }
    }

    /// Image URL when it is a non-blank string.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Finds the question an answer key refers to.
#[must_use]
pub fn resolve_question<'a>(questions: &'a [Question], key: &str) -> Option<(usize, &'a Question)> {
    questions
        .iter()
        .enumerate()
        .find(|(index, question)| question.answer_key(*index) == key)
}

fn deserialize_soal_id<'de, D>(deserializer: D) -> Result<Option<SoalId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(n)) => SoalId::from_number(n),
        Some(Raw::Text(s)) => SoalId::parse(&s),
    })
}
