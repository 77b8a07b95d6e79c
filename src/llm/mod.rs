pub mod stateless_llm_interface;
pub mod stateless_llm_factory;
pub mod gemini_llm;
pub mod openai_compatible_llm;
pub mod retry;

pub use stateless_llm_interface::*;
pub use stateless_llm_factory::StatelessLLMFactory;

#[cfg(test)]
pub mod stub_llm;
