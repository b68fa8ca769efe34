pub mod openai;

pub use openai::{OpenAIConfig, OpenAIGateway, DEFAULT_BASE_URL};
