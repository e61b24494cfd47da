use autograph_core::rules::FLOWCHART_RULES;

/// Fixed system instruction; nothing the caller sends ends up in here.
pub fn system_prompt() -> String {
    format!(
        "You are a strict code generator. Output ONLY Mermaid.js code.\n\n\
CRITICAL SYNTAX RULES:\n{FLOWCHART_RULES}"
    )
}

pub fn user_message(description: &str) -> String {
    format!("Convert logic:\n{description}")
}
