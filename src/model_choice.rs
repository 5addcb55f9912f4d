// src/model_choice.rs
//! Generation model selection

use std::fmt;

/// Models offered as one-click choices, in display order
pub const MODEL_PRESETS: &[&str] = &[
    "google/flan-t5-base",
    "google/flan-t5-large",
    "google/flan-t5-xl",
    "bigscience/T0pp",
    "google/t5-v1_1-base",
    "google/flan-ul2",
];

/// Form value used by the web UI for the custom entry
pub const CUSTOM_CHOICE: &str = "custom";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModelChoice {
    /// No model: the backend runs without generation
    #[default]
    None,
    Preset(String),
    Custom(String),
}

impl ModelChoice {
    /// Model id sent to the backend, if any. Empty custom text resolves to
    /// nothing; any other text is sent exactly as typed.
    pub fn effective_model(&self) -> Option<&str> {
        match self {
            ModelChoice::None => None,
            ModelChoice::Preset(id) => Some(id.as_str()),
            ModelChoice::Custom(text) if text.is_empty() => None,
            ModelChoice::Custom(text) => Some(text.as_str()),
        }
    }

    pub fn generation_enabled(&self) -> bool {
        self.effective_model().is_some()
    }

    pub fn is_preset(&self, id: &str) -> bool {
        matches!(self, ModelChoice::Preset(p) if p == id)
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ModelChoice::Custom(_))
    }

    /// Build a choice from the web form's `model` / `custom_model` fields.
    /// Unknown or blank `model` values mean no model.
    pub fn from_form(model: Option<&str>, custom_model: Option<&str>) -> Self {
        match model.map(str::trim) {
            Some(CUSTOM_CHOICE) => {
                ModelChoice::Custom(custom_model.unwrap_or_default().to_string())
            }
            Some(id) if MODEL_PRESETS.contains(&id) => ModelChoice::Preset(id.to_string()),
            _ => ModelChoice::None,
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelChoice::None => write!(f, "none"),
            ModelChoice::Preset(id) => write!(f, "{}", id),
            ModelChoice::Custom(text) => write!(f, "custom({})", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_disables_generation() {
        assert_eq!(ModelChoice::None.effective_model(), None);
        assert!(!ModelChoice::None.generation_enabled());
    }

    #[test]
    fn test_preset_enables_generation() {
        let choice = ModelChoice::Preset("google/flan-t5-base".to_string());
        assert_eq!(choice.effective_model(), Some("google/flan-t5-base"));
        assert!(choice.generation_enabled());
        assert!(choice.is_preset("google/flan-t5-base"));
        assert!(!choice.is_preset("google/flan-ul2"));
    }

    #[test]
    fn test_custom_depends_on_text() {
        let empty = ModelChoice::Custom(String::new());
        assert!(!empty.generation_enabled());
        assert_eq!(empty.effective_model(), None);

        let typed = ModelChoice::Custom("my-org/my-model".to_string());
        assert!(typed.generation_enabled());
        assert_eq!(typed.effective_model(), Some("my-org/my-model"));

        let blank = ModelChoice::Custom(" ".to_string());
        assert!(blank.generation_enabled());
        assert_eq!(blank.effective_model(), Some(" "));
    }

    #[test]
    fn test_from_form() {
        assert_eq!(
            ModelChoice::from_form(Some("bigscience/T0pp"), Some("ignored")),
            ModelChoice::Preset("bigscience/T0pp".to_string())
        );
        assert_eq!(
            ModelChoice::from_form(Some("custom"), Some("  org/model ")),
            ModelChoice::Custom("  org/model ".to_string())
        );
        assert_eq!(
            ModelChoice::from_form(Some("custom"), None),
            ModelChoice::Custom(String::new())
        );
        assert_eq!(ModelChoice::from_form(Some(""), None), ModelChoice::None);
        assert_eq!(ModelChoice::from_form(Some("not/a-preset"), None), ModelChoice::None);
        assert_eq!(ModelChoice::from_form(None, Some("x")), ModelChoice::None);
    }
}
