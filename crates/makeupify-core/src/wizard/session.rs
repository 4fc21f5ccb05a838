use makeupify_types::{EncodedImage, Gender, MakeupMethod, Step};

/// Everything the wizard knows about the current makeover.
///
/// Created at startup with every optional field absent. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub step: Step,
    pub original_image: Option<EncodedImage>,
    pub gender: Option<Gender>,
    pub method: MakeupMethod,
    pub selected_preset: Option<String>,
    pub text_prompt: String,
    pub reference_image: Option<EncodedImage>,
    pub generated_image: Option<EncodedImage>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub recommendation_open: bool,
}

impl Session {
    /// Inputs for the selected method are complete
    #[must_use]
    pub fn method_inputs_valid(&self) -> bool {
        match self.method {
            MakeupMethod::Preset => self.selected_preset.is_some(),
            MakeupMethod::Text => !self.text_prompt.trim().is_empty(),
            MakeupMethod::Transfer => self.reference_image.is_some(),
        }
    }

    /// Whether the generate button is enabled
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.original_image.is_some() && self.gender.is_some() && self.method_inputs_valid()
    }

    /// Result view is showing a finished makeover
    #[must_use]
    pub fn has_result(&self) -> bool {
        self.step == Step::Result
            && !self.is_loading
            && self.error.is_none()
            && self.generated_image.is_some()
            && self.original_image.is_some()
    }
}

/// Append a quick tag to a prompt, comma-separated unless the prompt is
/// empty or already ends with a comma.
#[must_use]
pub fn join_quick_tag(prompt: &str, value: &str) -> String {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        value.to_string()
    } else if trimmed.ends_with(',') {
        format!("{trimmed} {value}")
    } else {
        format!("{trimmed}, {value}")
    }
}
