/// Strip code fences and blank lines from raw model output.
///
/// `` ```mermaid `` markers go first, then bare `` ``` `` markers. Surviving lines are
/// trimmed and joined with `\n` in their original order. Applying this twice is the
/// same as applying it once.
pub fn sanitize(raw: &str) -> String {
    let unfenced = raw.replace("```mermaid", "").replace("```", "");

    unfenced
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::sanitize;
    use rstest::rstest;

    #[test]
    fn strips_fences() {
        let clean = sanitize("```mermaid\ngraph TD\n```");
        assert!(!clean.contains("```mermaid"));
        assert!(!clean.contains("```"));
        assert_eq!(clean, "graph TD");
    }

    #[test]
    fn drops_blank_lines() {
        assert_eq!(sanitize("A\n\n  \nB"), "A\nB");
    }

    #[test]
    fn trims_lines_and_keeps_order() {
        let raw = "  graph TD\r\n    A[\"Grind beans\"] --> B[\"Boil water\"]\t\n\n B --> C ";
        assert_eq!(
            sanitize(raw),
            "graph TD\nA[\"Grind beans\"] --> B[\"Boil water\"]\nB --> C"
        );
    }

    #[test]
    fn fence_inside_a_line_is_removed_in_place() {
        assert_eq!(sanitize("Here: ```mermaid graph TD```"), "Here:  graph TD");
    }

    #[rstest]
    #[case("")]
    #[case("\n\n \t\n")]
    #[case("```mermaid\ngraph TD\n  A --> B\n```\n")]
    #[case("Sure! Here is the chart:\n```mermaid\ngraph TD\nA-->B\n```\nEnjoy.")]
    #[case("``````")]
    #[case("`````")]
    #[case("```me```mermaidrmaid")]
    #[case("`` ` ``\n\n`")]
    #[case("B{\"Is it hot?\"} -->|Yes| C[\"Pour\"]\n\n\n")]
    fn is_idempotent(#[case] raw: &str) {
        let once = sanitize(raw);
        assert_eq!(sanitize(&once), once);
        assert!(!once.contains("```"));
        assert!(once.split('\n').all(|line| !line.trim().is_empty()) || once.is_empty());
    }

    mod properties {
        use proptest::prelude::*;

        use crate::sanitize::sanitize;

        /// Model-like output built from fence pieces, stray backticks, whitespace and
        /// short words, so fences split across fragments come up often.
        fn raw_strategy() -> impl Strategy<Value = String> {
            let fragment = prop_oneof![
                Just("`".to_string()),
                Just("``".to_string()),
                Just("```".to_string()),
                Just("```mermaid".to_string()),
                Just("mermaid".to_string()),
                Just("\n".to_string()),
                Just("\r\n".to_string()),
                Just(" ".to_string()),
                Just("\t".to_string()),
                "[a-zA-Z>|-]{1,4}",
            ];
            prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
        }

        fn check_sanitized(raw: &str) -> Result<(), TestCaseError> {
            let once = sanitize(raw);
            prop_assert_eq!(sanitize(&once), once.clone(), "not idempotent for {:?}", raw);
            prop_assert!(!once.contains("```"), "fence left in {:?}", once);
            if !once.is_empty() {
                prop_assert!(
                    once.split('\n').all(|line| !line.is_empty() && line.trim() == line),
                    "blank or untrimmed line in {:?}",
                    once
                );
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn sanitizing_is_idempotent_and_fence_free(raw in raw_strategy()) {
                check_sanitized(&raw)?;
            }

            #[test]
            fn arbitrary_text_sanitizes_cleanly(raw in any::<String>()) {
                check_sanitized(&raw)?;
            }
        }
    }
}
