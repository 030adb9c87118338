//! The structured story payload.

use serde::{Deserialize, Serialize};

/// A complete branching bedtime story.
///
/// All fields are plain strings without markup. The two choice points each
/// carry a prompt plus an ordered list of option labels; the branches hold
/// the narrative that follows each choice.
///
/// # Examples
///
/// ```
/// use ninna_core::StoryPayload;
///
/// let story = StoryPayload::default();
/// assert!(!story.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoryPayload {
    /// Opening scene.
    pub intro: String,
    /// First choice prompt shown to the child.
    pub choice_1_prompt: String,
    /// Ordered option labels for the first choice.
    pub choice_1_options: Vec<String>,
    /// Narrative following the first choice.
    pub branch_1: String,
    /// Second choice prompt.
    pub choice_2_prompt: String,
    /// Ordered option labels for the second choice.
    pub choice_2_options: Vec<String>,
    /// Narrative following the second choice.
    pub branch_2: String,
    /// Closing scene.
    pub resolution: String,
    /// One-line moral of the story.
    pub moral_summary: String,
    /// Optional hook a sequel can pick up.
    #[serde(default)]
    pub suggested_sequel_hook: Option<String>,
    /// Optional illustration-idea prompts, in panel order.
    #[serde(default)]
    pub panel_prompts: Vec<String>,
}

impl StoryPayload {
    /// True when every required narrative section is populated.
    ///
    /// Used by the text gateway to treat structurally incomplete provider
    /// output the same as an unavailable provider.
    pub fn is_complete(&self) -> bool {
        let required = [
            &self.intro,
            &self.choice_1_prompt,
            &self.branch_1,
            &self.choice_2_prompt,
            &self.branch_2,
            &self.resolution,
            &self.moral_summary,
        ];
        required.iter().all(|field| !field.trim().is_empty())
            && !self.choice_1_options.is_empty()
            && !self.choice_2_options.is_empty()
    }

    /// Borrow every scalar text field, narration sections first.
    pub fn text_fields(&self) -> Vec<&String> {
        let mut fields = vec![
            &self.intro,
            &self.choice_1_prompt,
            &self.branch_1,
            &self.choice_2_prompt,
            &self.branch_2,
            &self.resolution,
            &self.moral_summary,
        ];
        if let Some(hook) = &self.suggested_sequel_hook {
            fields.push(hook);
        }
        fields
    }

    /// Mutably borrow every scalar text field.
    pub fn text_fields_mut(&mut self) -> Vec<&mut String> {
        let mut fields = vec![
            &mut self.intro,
            &mut self.choice_1_prompt,
            &mut self.branch_1,
            &mut self.choice_2_prompt,
            &mut self.branch_2,
            &mut self.resolution,
            &mut self.moral_summary,
        ];
        if let Some(hook) = &mut self.suggested_sequel_hook {
            fields.push(hook);
        }
        fields
    }

    /// Mutably borrow every list entry: option labels and panel prompts.
    pub fn list_fields_mut(&mut self) -> Vec<&mut String> {
        self.choice_1_options
            .iter_mut()
            .chain(self.choice_2_options.iter_mut())
            .chain(self.panel_prompts.iter_mut())
            .collect()
    }

    /// The text read aloud by the narrator: narrative sections joined in
    /// reading order, without the choice prompts.
    pub fn narration_text(&self) -> String {
        [
            self.intro.as_str(),
            self.branch_1.as_str(),
            self.branch_2.as_str(),
            self.resolution.as_str(),
            self.moral_summary.as_str(),
        ]
        .join("\n")
    }

    /// Every text segment including choices and options, for summarization.
    pub fn full_text(&self) -> String {
        let mut segments: Vec<&str> = vec![&self.intro, &self.choice_1_prompt];
        segments.extend(self.choice_1_options.iter().map(String::as_str));
        segments.push(&self.branch_1);
        segments.push(&self.choice_2_prompt);
        segments.extend(self.choice_2_options.iter().map(String::as_str));
        segments.push(&self.branch_2);
        segments.push(&self.resolution);
        segments.push(&self.moral_summary);
        if let Some(hook) = &self.suggested_sequel_hook {
            segments.push(hook);
        }
        segments.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_story() -> StoryPayload {
        StoryPayload {
            intro: "Once upon a time".into(),
            choice_1_prompt: "Left or right?".into(),
            choice_1_options: vec!["Left".into(), "Right".into()],
            branch_1: "Down the left path".into(),
            choice_2_prompt: "Song or dream?".into(),
            choice_2_options: vec!["Song".into(), "Dream".into()],
            branch_2: "A gentle song".into(),
            resolution: "Everyone slept".into(),
            moral_summary: "Kindness wins".into(),
            suggested_sequel_hook: Some("Visit the moon".into()),
            panel_prompts: vec![],
        }
    }

    #[test]
    fn completeness_requires_all_sections() {
        let story = complete_story();
        assert!(story.is_complete());

        let mut missing = story.clone();
        missing.resolution = "  ".into();
        assert!(!missing.is_complete());

        let mut no_options = story;
        no_options.choice_2_options.clear();
        assert!(!no_options.is_complete());
    }

    #[test]
    fn narration_skips_choice_prompts() {
        let text = complete_story().narration_text();
        assert!(text.contains("Once upon a time"));
        assert!(!text.contains("Left or right?"));
    }

    #[test]
    fn full_text_includes_options_and_hook() {
        let text = complete_story().full_text();
        assert!(text.contains("Left or right?"));
        assert!(text.contains("Dream"));
        assert!(text.contains("Visit the moon"));
    }
}
