/// Mermaid flowchart rules — single source of truth for the generation prompt.
pub const FLOWCHART_RULES: &str = "\
1. Start with 'graph TD'.\n\
2. NODES:\n\
   - Use quotes for ALL text.\n\
   - Action: A[\"Do Something\"]\n\
   - Decision: B{\"Is it working?\"}\n\
3. ARROW LOGIC (FOLLOW STRICTLY):\n\
   - IF the starting node is a DECISION {}:\n\
     Use LABELS. Format: B -->|Yes| C\n\
   - IF the starting node is an ACTION []:\n\
     Use PLAIN arrows. Format: A --> B\n\
     DO NOT put labels on action arrows.\n\
4. No intro text. No outro text.";
