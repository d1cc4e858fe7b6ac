//! Form input: tone, language and the product fields, plus validation.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{dispatcher::DescriptionRequest, error::ValidationError};

/// Brand voice for a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Professional,
    Casual,
    Luxury,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Professional, Tone::Casual, Tone::Luxury];

    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Casual => "casual",
            Tone::Luxury => "luxury",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tone::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tone '{s}' (expected professional, casual or luxury)"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Zh,
    Ja,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Zh,
        Language::Ja,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::It => "Italian",
            Language::Pt => "Portuguese",
            Language::Zh => "Chinese",
            Language::Ja => "Japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported language code '{s}'"))
    }
}

/// What the user has typed and picked so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub product_name: String,
    pub product_features: String,
    pub tone: Option<Tone>,
    pub language: Language,
}

impl FormState {
    pub fn new(product_name: impl Into<String>, tone: Option<Tone>) -> Self {
        Self { product_name: product_name.into(), tone, ..Self::default() }
    }

    pub fn with_features(mut self, features: impl Into<String>) -> Self {
        self.product_features = features.into();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Name first, then tone. The name is checked trimmed but sent as entered.
    pub fn validate(&self) -> Result<DescriptionRequest, ValidationError> {
        if self.product_name.trim().is_empty() {
            return Err(ValidationError::MissingProductName);
        }
        let tone = self.tone.ok_or(ValidationError::MissingTone)?;
        Ok(DescriptionRequest {
            product_name: self.product_name.clone(),
            product_features: self.product_features.clone(),
            tone: tone.as_str().to_string(),
            language: self.language.code().to_string(),
        })
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }
}
