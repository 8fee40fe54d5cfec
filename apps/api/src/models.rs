//! Request payloads and their validated counterparts.
//!
//! Parsing the wire strings into the enums below is the validation
//! boundary: every outbound call happens only after `validate` succeeds.

use serde::Deserialize;

use crate::errors::AppError;

/// Request body for script generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptRequest {
    pub topic: String,
    #[serde(default = "default_tone")]
    pub tone: String,
    pub format: String,
    #[serde(default = "default_search_tool")]
    pub search_tool: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    /// Sent by the client's variation slider; not yet forwarded to the
    /// generation model.
    #[allow(dead_code)]
    #[serde(default)]
    pub temperature: Option<f32>,
}

fn default_tone() -> String {
    "conversational".to_string()
}

fn default_search_tool() -> String {
    "duckduckgo".to_string()
}

fn default_duration() -> u32 {
    5
}

impl ScriptRequest {
    /// Validates the raw payload into a typed job. Rejections here name
    /// the offending field and happen before any outbound call.
    pub fn validate(self) -> Result<ScriptJob, AppError> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(AppError::Validation("topic cannot be empty".to_string()));
        }

        Ok(ScriptJob {
            topic,
            tone: Tone::parse(&self.tone),
            format: ScriptFormat::parse(&self.format)?,
            search_tool: SearchBackend::parse(&self.search_tool)?,
            duration: self.duration,
        })
    }
}

/// A fully validated generation job.
#[derive(Debug, Clone)]
pub struct ScriptJob {
    pub topic: String,
    pub tone: Tone,
    pub format: ScriptFormat,
    pub search_tool: SearchBackend,
    /// Target length in minutes. Only the monologue template consumes it.
    pub duration: u32,
}

/// Writing tone requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Conversational,
    Formal,
    Humorous,
}

impl Tone {
    /// Unknown tones fall back to the default rather than rejecting —
    /// tone never gates the pipeline.
    pub fn parse(s: &str) -> Self {
        match s {
            "formal" => Tone::Formal,
            "humorous" => Tone::Humorous,
            _ => Tone::Conversational,
        }
    }
}

/// Output format. Selects which prompt template is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptFormat {
    Linkedin,
    Instagram,
    YoutubeDesc,
    Monologue,
    Interview,
}

impl ScriptFormat {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "linkedin" => Ok(ScriptFormat::Linkedin),
            "instagram" => Ok(ScriptFormat::Instagram),
            "youtube_desc" => Ok(ScriptFormat::YoutubeDesc),
            "monologue" => Ok(ScriptFormat::Monologue),
            "interview" => Ok(ScriptFormat::Interview),
            _ => Err(AppError::Validation("Invalid format specified.".to_string())),
        }
    }
}

/// Search backend used to gather grounding content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBackend {
    DuckDuckGo,
    GoogleSearch,
}

impl SearchBackend {
    pub fn parse(s: &str) -> Result<Self, AppError> {
        match s {
            "duckduckgo" => Ok(SearchBackend::DuckDuckGo),
            "googlesearch" => Ok(SearchBackend::GoogleSearch),
            _ => Err(AppError::Validation("Invalid search tool.".to_string())),
        }
    }
}
