//! Chat prompts sent to language-model providers.

use crate::{
    dispatcher::DescriptionRequest,
    form::{Language, Tone},
};

pub const SYSTEM_PROMPT: &str = "You are an expert e-commerce copywriter for Shopify stores. \
Write persuasive, SEO-optimized product descriptions. Reply with the description text only.";

fn tone_style(tone: Tone) -> &'static str {
    match tone {
        Tone::Professional => "professional, trustworthy",
        Tone::Casual => "casual and friendly",
        Tone::Luxury => "luxurious and premium",
    }
}

/// Chat messages for a request. Unknown codes read as professional / English.
pub struct DescriptionPrompt {
    pub system: &'static str,
    pub user: String,
}

impl DescriptionPrompt {
    pub fn for_request(req: &DescriptionRequest) -> Self {
        let tone: Tone = req.tone.parse().unwrap_or(Tone::Professional);
        let language: Language = req.language.parse().unwrap_or_default();
        let features = req.product_features.trim();
        let features_line = if features.is_empty() {
            String::new()
        } else {
            format!(" Key features: {features}.")
        };
        let user = format!(
            "Write a {style} product description for \"{product}\" in {lang}.{features_line} \
Keep it to one paragraph of 80-120 words and work in search-friendly keywords naturally.",
            style = tone_style(tone),
            product = req.product_name.trim(),
            lang = language.display_name(),
        );
        Self { system: SYSTEM_PROMPT, user }
    }
}
