// AI draft generation: prompt assembly, one text-completion call, strict
// parse into a ResumeDocument. All provider calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
