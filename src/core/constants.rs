//! Shared constants used across the application

/// Language assigned to a fenced code block that carries no identifier.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GROQ_API_KEY", "OPENAI_API_KEY"];

pub const GREETING: &str = "Hello! I'm your AI Copilot. I can help you with code, answer questions, or assist with your work. For example, try asking me to 'write a javascript function to sort an array'.";

/// Fallback width for horizontal rules when the terminal size is unknown.
pub const DEFAULT_RULE_WIDTH: usize = 60;
