use rand::Rng;

/// Journaling prompt pool. Entries store the prompt text verbatim at
/// creation time, so editing this list never rewrites existing entries.
const PROMPTS: &[&str] = &[
    "What is one thing you're grateful for today?",
    "Describe a moment this week that made you smile.",
    "What has been weighing on your mind lately?",
    "Write about a person who shaped who you are.",
    "What would you tell your younger self?",
    "What does a perfect day look like for you right now?",
    "What habit would you like to build, and why?",
    "Describe a place where you feel completely at ease.",
    "What challenged you today, and how did you respond?",
    "What are you looking forward to this month?",
];

/// Stateless prompt source.
pub struct PromptConcept;

impl PromptConcept {
    pub fn new() -> Self {
        Self
    }

    pub fn random(&self) -> &'static str {
        PROMPTS[rand::rng().random_range(0..PROMPTS.len())]
    }
}

impl Default for PromptConcept {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_prompt_comes_from_pool() {
        let prompts = PromptConcept::new();
        for _ in 0..50 {
            assert!(PROMPTS.contains(&prompts.random()));
        }
    }
}
