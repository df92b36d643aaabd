pub mod observability;
pub mod openai;
