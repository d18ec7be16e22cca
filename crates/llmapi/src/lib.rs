pub mod providers;
pub mod types;
pub mod utils;

pub use providers::{GeneratedImage, generate_content, generate_image};
pub use types::{GenerationConfig, LLMClient, LLMModality};
