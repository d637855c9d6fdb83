//! # Site Content
//!
//! Static marketing content (testimonials, FAQs, about copy) loaded from
//! `config/content.toml`. Served read-only; the catalog itself comes from
//! the commerce platform, not from here.

use serde::{Deserialize, Serialize};

/// A customer testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    pub author: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
}

/// A frequently asked question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// All static content for the storefront
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteContent {
    #[serde(default)]
    pub about: String,

    #[serde(default)]
    pub testimonials: Vec<Testimonial>,

    #[serde(default)]
    pub faqs: Vec<Faq>,
}

impl SiteContent {
    /// Empty content set
    pub fn new() -> Self {
        Self::default()
    }

    /// Load content from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let content = SiteContent::from_toml(
            r#"
about = "Premium automotive customization in Huddersfield."

[[testimonials]]
author = "Jay K."
quote = "The starlight roof is unreal."
vehicle = "Mercedes C-Class"

[[testimonials]]
author = "Sana P."
quote = "Ambient lighting fitted in a day."

[[faqs]]
question = "How long does an install take?"
answer = "Most installs are same-day."
"#,
        )
        .unwrap();

        assert_eq!(content.testimonials.len(), 2);
        assert_eq!(content.testimonials[0].vehicle.as_deref(), Some("Mercedes C-Class"));
        assert!(content.testimonials[1].vehicle.is_none());
        assert_eq!(content.faqs.len(), 1);
        assert!(content.about.contains("Huddersfield"));
    }

    #[test]
    fn test_empty_toml_defaults() {
        let content = SiteContent::from_toml("").unwrap();
        assert!(content.testimonials.is_empty());
        assert!(content.faqs.is_empty());
        assert!(content.about.is_empty());
    }
}
