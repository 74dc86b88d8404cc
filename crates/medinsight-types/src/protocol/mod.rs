//! Wire types for the generative service.

pub mod gemini;

pub use gemini::{
    GeminiCandidate, GeminiContent, GeminiErrorBody, GeminiErrorEnvelope, GeminiInlineData,
    GeminiPart, GeminiRole, GenerateContentRequest, GenerateContentResponse,
};
