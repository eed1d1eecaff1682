use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkData {
    pub last_update: i64,
    pub repo_url: String,
    pub entries: BTreeMap<String, Vec<BenchmarkRun>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub commit: Commit,
    /// Epoch milliseconds at which the run was recorded.
    pub date: i64,
    pub tool: String,
    pub benches: Vec<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub message: String,
    pub author: CommitAuthor,
    /// Producer keys the store does not interpret (committer, distinct,
    /// tree_id, url, ...); must survive a load/save round trip.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
    pub unit: String,
    /// Opaque producer blob (key=value lines in the wild); not modeled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub location: String,
    pub page: String,
    pub title: String,
    pub text: String,
    pub category: Category,
}

/// Tag vocabulary emitted by the documentation generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Page,
    Section,
    Method,
    Function,
    Type,
    Macro,
    Module,
    Constant,
    Keyword,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
            Category::Method => "method",
            Category::Function => "function",
            Category::Type => "type",
            Category::Macro => "macro",
            Category::Module => "module",
            Category::Constant => "constant",
            Category::Keyword => "keyword",
        }
    }
}
