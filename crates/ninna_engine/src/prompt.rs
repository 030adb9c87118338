//! Deterministic prompt construction.
//!
//! Prompts are pure functions of the request: the same request and
//! continuity context always produce byte-identical prompt text.

use ninna_core::{GenerateRequest, StoryRequest, normalize_interests};

const STORY_SYSTEM_PROMPT: &str = "You are Ninna, a calm and kind bedtime \
storyteller for young children. Respond only with valid JSON.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an editor for bedtime stories. \
Summarize briefly and identify characters and morals. Respond only with \
valid JSON.";

const STORY_MAX_TOKENS: u32 = 1400;
const STORY_TEMPERATURE: f32 = 0.7;
const SUMMARY_MAX_TOKENS: u32 = 400;
const SUMMARY_TEMPERATURE: f32 = 0.1;

/// Build the user prompt for one story request.
pub fn build_story_prompt(request: &StoryRequest, previous_summary: Option<&str>) -> String {
    let controls = &request.controls;
    let interests = normalize_interests(&request.child.interests);
    let interests_joined = if interests.is_empty() {
        "sweet dreams".to_string()
    } else {
        interests.join(", ")
    };

    let mut lines: Vec<String> = vec![
        format!(
            "- A positive, calm story suitable for a child of age {}.",
            request.child.age
        ),
        format!("- Language: {}.", request.language.english_name()),
        format!(
            "- Target duration: {} minutes of narration.",
            request.target_duration_minutes
        ),
    ];

    lines.push(if controls.no_scary {
        "- Avoid frightening elements.".to_string()
    } else {
        "- Adventure elements allowed, but always reassuring.".to_string()
    });
    lines.push(if controls.kindness_lesson {
        "- Weave in a lesson about kindness.".to_string()
    } else {
        "- A general positive moral.".to_string()
    });
    lines.push(if controls.cultural_focus {
        "- Draw on folklore and settings from the child's culture.".to_string()
    } else {
        "- Use universal fantasy elements.".to_string()
    });
    if controls.educational {
        match &request.educational_topic {
            Some(topic) => lines.push(format!(
                "- Lightly teach something about: {}.",
                topic
            )),
            None => lines.push("- Add light educational touches.".to_string()),
        }
    }
    if let Some(style) = &request.style {
        lines.push(format!("- Storytelling style: {}.", style));
    }
    if let Some(tone) = &request.tone {
        lines.push(format!("- Emotional tone: {}.", tone));
    }
    if request.generate_panels {
        lines.push(
            "- Also include panel_prompts: an array of short illustration ideas, one per scene."
                .to_string(),
        );
    }
    if let Some(summary) = previous_summary {
        lines.push(format!(
            "- Continue the previous story, picking up these elements: {}.",
            summary
        ));
    }

    format!(
        "Generate an original bedtime story for {name} ({age} years old), \
interested in {interests}. Tonight the child feels {mood}. Follow these \
instructions exactly:\n{lines}\nReturn the answer as JSON with the keys \
intro, choice_1_prompt, choice_1_options (array), branch_1, \
choice_2_prompt, choice_2_options (array), branch_2, resolution, \
moral_summary, suggested_sequel_hook. Every value must be a plain string \
without markdown.",
        name = request.child.name,
        age = request.child.age,
        interests = interests_joined,
        mood = request.child.mood,
        lines = lines.join("\n"),
    )
}

/// Build the full generation request for one story.
pub fn build_story_request(
    request: &StoryRequest,
    previous_summary: Option<&str>,
) -> GenerateRequest {
    let mut generate =
        GenerateRequest::with_system(STORY_SYSTEM_PROMPT, build_story_prompt(request, previous_summary));
    generate.max_tokens = Some(STORY_MAX_TOKENS);
    generate.temperature = Some(STORY_TEMPERATURE);
    generate
}

/// Build the generation request that extracts continuity from story text.
pub fn build_summary_request(story_text: &str) -> GenerateRequest {
    let user = format!(
        "Analyze the following story and return JSON with summary (at most \
120 words), characters (array), moral (optional string), \
unresolved_threads (array):\n{}",
        story_text
    );
    let mut generate = GenerateRequest::with_system(SUMMARY_SYSTEM_PROMPT, user);
    generate.max_tokens = Some(SUMMARY_MAX_TOKENS);
    generate.temperature = Some(SUMMARY_TEMPERATURE);
    generate
}

#[cfg(test)]
mod tests {
    use super::*;
    use ninna_core::{ChildAttributes, ControlSettings, Language};

    fn request() -> StoryRequest {
        StoryRequest {
            parent_email: "a@b.com".into(),
            child: ChildAttributes {
                name: "Sofia".into(),
                age: 5,
                mood: "sleepy".into(),
                interests: vec!["dinosauri".into(), " Dinosauri ".into(), "stelle".into()],
            },
            controls: ControlSettings::default(),
            language: Language::Italian,
            target_duration_minutes: 7,
            sequel: false,
            previous_story_id: None,
            voice: None,
            style: None,
            tone: None,
            educational_topic: None,
            generate_panels: false,
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        let req = request();
        assert_eq!(
            build_story_prompt(&req, None),
            build_story_prompt(&req, None)
        );
    }

    #[test]
    fn prompt_contains_child_details_and_deduped_interests() {
        let prompt = build_story_prompt(&request(), None);
        assert!(prompt.contains("Sofia"));
        assert!(prompt.contains("5 years old"));
        assert!(prompt.contains("sleepy"));
        assert!(prompt.contains("dinosauri, stelle"));
        assert_eq!(prompt.matches("dinosauri").count(), 1);
    }

    #[test]
    fn continuity_summary_is_included_verbatim() {
        let summary = "Sofia befriended a silver owl.";
        let prompt = build_story_prompt(&request(), Some(summary));
        assert!(prompt.contains(summary));
        assert!(!build_story_prompt(&request(), None).contains("previous story"));
    }

    #[test]
    fn controls_flip_their_prompt_lines() {
        let mut req = request();
        req.controls.no_scary = false;
        req.controls.educational = true;
        req.educational_topic = Some("le stelle".into());
        let prompt = build_story_prompt(&req, None);
        assert!(prompt.contains("Adventure elements allowed"));
        assert!(prompt.contains("le stelle"));
        assert!(!prompt.contains("Avoid frightening"));
    }

    #[test]
    fn story_request_carries_system_and_user_messages() {
        let generate = build_story_request(&request(), None);
        assert_eq!(generate.messages.len(), 2);
        assert_eq!(generate.max_tokens, Some(1400));
    }
}
