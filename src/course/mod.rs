pub mod outline;
pub mod reader;

use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::question::RawQuestion;

#[derive(Embed)]
#[folder = "assets/courses/"]
struct CourseAssets;

pub const SAMPLE_COURSE: &str = "sample";

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("failed to read course file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse course {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no bundled course named {0:?}")]
    UnknownBundled(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// A document attached to a lesson. Pages hold pre-extracted text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pages: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default = "default_section")]
    pub video_section: String,
    /// Minutes.
    #[serde(default)]
    pub video_length: f64,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, rename = "pdfs")]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub quizzes: Vec<RawQuestion>,
}

fn default_section() -> String {
    "Untitled Section".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub title: String,
    pub content: Vec<ContentItem>,
}

impl Course {
    pub fn from_json(name: &str, json: &str) -> Result<Self, CourseError> {
        serde_json::from_str(json).map_err(|source| CourseError::Parse {
            name: name.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CourseError> {
        let content = fs::read_to_string(path).map_err(|source| CourseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let course = Self::from_json(&path.display().to_string(), &content)?;
        tracing::info!(path = %path.display(), items = course.content.len(), "course loaded");
        Ok(course)
    }

    pub fn bundled(name: &str) -> Result<Self, CourseError> {
        let file = CourseAssets::get(&format!("{name}.json"))
            .ok_or_else(|| CourseError::UnknownBundled(name.to_string()))?;
        let json = String::from_utf8_lossy(file.data.as_ref());
        Self::from_json(name, &json)
    }

    pub fn sample() -> Result<Self, CourseError> {
        Self::bundled(SAMPLE_COURSE)
    }

    pub fn item(&self, index: usize) -> Option<&ContentItem> {
        self.content.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// `< 60` minutes stays in minutes, anything longer is shown in hours.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 60.0 {
        format!("{minutes:.0} minutes")
    } else {
        format!("{:.2} hours", minutes / 60.0)
    }
}
