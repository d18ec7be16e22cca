pub mod gemini;

pub use gemini::{GeneratedImage, generate_content, generate_image};
