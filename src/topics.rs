use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Key that designates the default answer in a topic document
pub const DEFAULT_KEY: &str = "default";

const BUILTIN_TOPICS: &[(&str, &str)] = &[
    (
        "터널",
        "터널 안전 관리 지침에 따르면, 2025년부터 IoT 센서 설치가 의무화되었습니다.",
    ),
    ("점검", "정기 점검 주기가 6개월에서 3개월로 단축되었습니다."),
];
const BUILTIN_DEFAULT: &str = "한국도로공사 규정에 따른 답변입니다.";

#[derive(Debug, Error)]
pub enum TopicTableError {
    #[error("failed to read topic file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("topic document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("topic document must be a JSON object of key/answer pairs")]
    NotAnObject,
    #[error("answer for topic {0:?} must be a string")]
    NonStringAnswer(String),
    #[error("topic keys must not be empty")]
    EmptyKey,
    #[error("topic document has no \"default\" answer")]
    MissingDefault,
}

/// Canned answers keyed by exact query text, plus the mandatory default answer.
///
/// Built once at startup and never mutated, so it is shared behind an `Arc`
/// without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTable {
    topics: BTreeMap<String, String>,
    default_answer: String,
}

impl TopicTable {
    pub fn new(
        topics: BTreeMap<String, String>,
        default_answer: impl Into<String>,
    ) -> Result<Self, TopicTableError> {
        if topics.keys().any(|key| key.is_empty()) {
            return Err(TopicTableError::EmptyKey);
        }
        Ok(Self {
            topics,
            default_answer: default_answer.into(),
        })
    }

    /// The demo table the service ships with
    pub fn builtin() -> Self {
        Self {
            topics: BUILTIN_TOPICS
                .iter()
                .map(|(key, answer)| (key.to_string(), answer.to_string()))
                .collect(),
            default_answer: BUILTIN_DEFAULT.to_string(),
        }
    }

    /// Parses a flat JSON object; the `default` entry becomes the default answer.
    pub fn from_json_str(document: &str) -> Result<Self, TopicTableError> {
        let value: Value = serde_json::from_str(document)?;
        let Value::Object(entries) = value else {
            return Err(TopicTableError::NotAnObject);
        };

        let mut topics = BTreeMap::new();
        let mut default_answer = None;
        for (key, answer) in entries {
            let Value::String(answer) = answer else {
                return Err(TopicTableError::NonStringAnswer(key));
            };
            if key == DEFAULT_KEY {
                default_answer = Some(answer);
            } else {
                topics.insert(key, answer);
            }
        }

        let default_answer = default_answer.ok_or(TopicTableError::MissingDefault)?;
        Self::new(topics, default_answer)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TopicTableError> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path).map_err(|source| TopicTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json_str(&document)?;
        info!("Loaded {} topics from {}", table.len(), path.display());
        Ok(table)
    }

    /// Exact, case-sensitive lookup. Empty configured answers count as no match.
    pub fn lookup(&self, query: &str) -> Option<&str> {
        self.topics
            .get(query)
            .map(String::as_str)
            .filter(|answer| !answer.is_empty())
    }

    pub fn default_answer(&self) -> &str {
        &self.default_answer
    }

    /// The matched answer, or the default answer when nothing matches
    pub fn resolve(&self, query: &str) -> &str {
        self.lookup(query).unwrap_or(&self.default_answer)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }
}
