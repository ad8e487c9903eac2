//! LLM prompt for idea extraction

/// Builds the extraction prompt for one chunk of text
pub struct PromptBuilder<'a> {
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.text.len() + 1500);

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(self.text);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_FORMAT);

        prompt
    }
}

const EXTRACTION_INSTRUCTIONS: &str = "You are an expert at identifying potential startup ideas from conversations and notes.
Analyze the following text and identify any potential startup ideas mentioned:";

const OUTPUT_FORMAT: &str = r#"If you find any potential startup ideas, provide them in the following JSON format:
[
  {
    "title": "A concise, catchy title for the startup idea (max 60 chars)",
    "description": "Detailed explanation of the startup idea, describing how it works and what it offers",
    "problem": "The problem this idea solves",
    "targetAudience": "Who would benefit from this solution",
    "confidenceScore": 7, // A number from 1-10 indicating how clearly defined the idea is
    "reasoning": "Why you think this is a viable startup idea"
  }
]

Make sure to create a clear distinction between the title (which should be short and memorable) and the description (which should be comprehensive).
If no startup ideas are found, return an empty array: []
"#;
