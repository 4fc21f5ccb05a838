//! Image generation boundary.
//!
//! The wizard only sees [`ImageGenerator`]; provider request shapes stay in
//! the implementing module.

mod error;
mod gemini;

pub use error::GenerationError;
pub use gemini::GeminiClient;

use async_trait::async_trait;
use makeupify_types::{EncodedImage, Gender, GenerationMethod};

pub const DEFAULT_TEXT_INSTRUCTION: &str = "Apply a natural makeup look.";

pub const TRANSFER_INSTRUCTION: &str = "Apply the makeup style seen in the second image onto the \
    person in the first image. Match the lipstick color, eye makeup style, and blush intensity.";

/// Everything the generator needs for one makeover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source: EncodedImage,
    pub method: GenerationMethod,
    pub instruction: Option<String>,
    pub reference: Option<EncodedImage>,
    pub gender: Gender,
}

impl GenerationRequest {
    /// Instruction for the user turn. Transfer ignores free text; text falls
    /// back to a natural look when empty.
    #[must_use]
    pub fn user_instruction(&self) -> String {
        match (self.method, &self.reference) {
            (GenerationMethod::Transfer, Some(_)) => TRANSFER_INSTRUCTION.to_string(),
            _ => self
                .instruction
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_TEXT_INSTRUCTION)
                .to_string(),
        }
    }

    /// Images in send order: the photo, then the reference for transfers
    #[must_use]
    pub fn images(&self) -> Vec<&EncodedImage> {
        let mut images = vec![&self.source];
        if self.method == GenerationMethod::Transfer
            && let Some(reference) = &self.reference
        {
            images.push(reference);
        }
        images
    }
}

/// System role for the generator, with gender folded in
#[must_use]
pub fn system_instruction(gender: Gender) -> String {
    format!(
        "You are a professional makeup artist and image editor. Your task is to modify the \
         provided user photo by applying specific makeup techniques. The user identifies as \
         {gender}. Adjust the makeup application to be appropriate and flattering for this \
         gender. Ensure the skin texture remains realistic. Do not cartoonize the image. \
         Maintain the original identity of the person. Output ONLY the modified image."
    )
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce exactly one result image.
    async fn generate(&self, request: &GenerationRequest) -> Result<EncodedImage, GenerationError>;
}
