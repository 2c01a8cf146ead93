//! Prompt construction for lesson-plan generation

pub mod builder;
pub mod system;
pub mod templates;

pub use builder::{PromptBuilder, build_prompt};
pub use system::{SYSTEM_INSTRUCTION, system_instruction_for};
