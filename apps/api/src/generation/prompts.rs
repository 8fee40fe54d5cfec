// Prompt templates for each script format, interpolated with simple
// placeholder replacement. Composition is pure and deterministic.

use crate::models::ScriptFormat;

/// System prompt for the script generation call.
pub const GENERATION_SYSTEM: &str = "You are a skilled content writer producing \
    ready-to-publish scripts and captions. Write in a natural, human-like voice.";

const LINKEDIN_PROMPT_TEMPLATE: &str = r#"Write a LinkedIn post caption about {topic}.
Keep it professional yet engaging. Use a human-like tone.
Include relevant hashtags and a call to action.
It should be a bit long."#;

const INSTAGRAM_PROMPT_TEMPLATE: &str = r#"Write an Instagram caption for a post about {topic}.
Make it engaging, relatable, and easy to read.
Include relevant hashtags to boost engagement."#;

const YOUTUBE_DESC_PROMPT_TEMPLATE: &str = r#"Create a YouTube video description for a video about {topic}.
Include an engaging intro, key points covered, and relevant hashtags."#;

const MONOLOGUE_PROMPT_TEMPLATE: &str = r#"You are a YouTube scriptwriter. Create an engaging and informative script for a YouTube video. Please remember to write the script in a human-like tone; we don't want a plain machine tone.

Topic: {topic}

Duration: {duration} minutes

Information to use:
{grounding}

Structure:
1. Introduction: Hook viewers with an interesting fact or statement.
2. Body: Provide detailed, engaging, and informative content.
3. Conclusion: End with a call to action or thought-provoking insight.

Include SEO keywords and hashtags for Instagram and LinkedIn."#;

const INTERVIEW_PROMPT_TEMPLATE: &str = r#"You are a podcast scriptwriter. Create a detailed interview script. Please remember to write the script in a human-like tone; we don't want a plain machine tone.

Topic: {topic}

Provide:
- A brief introduction to the topic.
- A variety of questions the host can ask the guest, including:
  - Questions about the guest's personal journey.
  - Questions focused on the topic.
  - Engaging or thought-provoking questions.
- Suggestions for follow-up questions based on guest responses.

Ensure the script is conversational and includes transitions between questions.
At last, provide 15 questions that can be asked about the topic.

Include SEO keywords and hashtags for Instagram and LinkedIn."#;

/// Builds the generation prompt for a format. Only the monologue template
/// consumes `duration` and `grounding`; the other formats are
/// self-contained.
pub fn compose_prompt(
    format: ScriptFormat,
    topic: &str,
    duration: u32,
    grounding: &str,
) -> String {
    match format {
        ScriptFormat::Linkedin => LINKEDIN_PROMPT_TEMPLATE.replace("{topic}", topic),
        ScriptFormat::Instagram => INSTAGRAM_PROMPT_TEMPLATE.replace("{topic}", topic),
        ScriptFormat::YoutubeDesc => YOUTUBE_DESC_PROMPT_TEMPLATE.replace("{topic}", topic),
        ScriptFormat::Monologue => MONOLOGUE_PROMPT_TEMPLATE
            .replace("{topic}", topic)
            .replace("{duration}", &duration.to_string())
            .replace("{grounding}", grounding),
        ScriptFormat::Interview => INTERVIEW_PROMPT_TEMPLATE.replace("{topic}", topic),
    }
}
