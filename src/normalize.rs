//! Transcript normalization - turns spoken phrases into arithmetic notation
//!
//! "five plus three" becomes "5 + 3". The output is restricted to the
//! character set the evaluator understands; anything else is dropped.

/// Spoken digits. Matched as whole space-delimited words only, so "one"
/// inside a longer word is left alone.
const NUMBER_WORDS: &[(&str, &str)] = &[
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    ("ten", "10"),
];

/// Operator phrases, replaced as raw substrings in this pass order.
/// Within a group, longer phrases come first so "to the power of" is
/// consumed before "power of", and "modulo" before "mod".
///
/// Unlike the number words these are NOT boundary-checked: "pi" matches
/// inside "pie". That asymmetry is inherited behavior and kept as-is.
const PHRASE_PASSES: &[(&[&str], &str)] = &[
    (&["plus"], "+"),
    (&["minus"], "-"),
    (&["multiplied by", "times", "into"], "*"),
    (&["divided by", "over"], "/"),
    (&["to the power of", "power of", "raised to"], "^"),
    (&["modulo", "mod"], "%"),
    (&["open parenthesis", "open bracket"], "("),
    (&["close parenthesis", "close bracket"], ")"),
    (&["percent"], "%"),
    (&["pi"], "3.141592653589793"),
];

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/().%^".contains(c)
}

/// Normalize a transcript (or typed phrase) into a canonical arithmetic
/// expression string. Never fails; unusable input yields an empty or
/// unparseable string and the evaluator deals with it.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let lowered = text.to_lowercase();

    // Number words: whole tokens only
    let mut t = lowered
        .split_whitespace()
        .map(|word| {
            NUMBER_WORDS
                .iter()
                .find(|(w, _)| *w == word)
                .map_or(word, |(_, digits)| *digits)
        })
        .collect::<Vec<_>>()
        .join(" ");

    // Operator phrases: global substring replacement, fixed pass order
    for (phrases, symbol) in PHRASE_PASSES {
        for phrase in *phrases {
            t = t.replace(phrase, symbol);
        }
    }

    // Strip everything outside the whitelist
    t.retain(is_allowed);

    // Clean up runs of spaces left behind by stripped words
    while t.contains("  ") {
        t = t.replace("  ", " ");
    }

    t.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_addition() {
        assert_eq!(normalize("five plus three"), "5 + 3");
    }

    #[test]
    fn test_division_phrase() {
        assert_eq!(normalize("ten divided by zero"), "10 / 0");
        assert_eq!(normalize("ten over two"), "10 / 2");
    }

    #[test]
    fn test_power_phrases() {
        assert_eq!(normalize("two to the power of three"), "2 ^ 3");
        assert_eq!(normalize("two power of three"), "2 ^ 3");
        assert_eq!(normalize("two raised to three"), "2 ^ 3");
    }

    #[test]
    fn test_modulo_before_mod() {
        assert_eq!(normalize("seven modulo three"), "7 % 3");
        assert_eq!(normalize("seven mod three"), "7 % 3");
    }

    #[test]
    fn test_parentheses_phrases() {
        assert_eq!(
            normalize("open parenthesis one plus two close parenthesis times three"),
            "( 1 + 2 ) * 3"
        );
        assert_eq!(normalize("open bracket four close bracket"), "( 4 )");
    }

    #[test]
    fn test_percent_and_pi() {
        assert_eq!(normalize("ten percent"), "10 %");
        assert_eq!(normalize("two times pi"), "2 * 3.141592653589793");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize("Five PLUS Three"), "5 + 3");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_unrecognized_words_dropped() {
        assert_eq!(normalize("what is five plus three please"), "5 + 3");
    }

    #[test]
    fn test_number_words_are_boundary_safe() {
        // "one" inside "money" must not become a digit
        assert_eq!(normalize("money"), "");
        // adjacent number words all convert
        assert_eq!(normalize("one one one"), "1 1 1");
    }

    #[test]
    fn test_operator_phrases_are_not_boundary_safe() {
        // inherited quirk: "pi" matches inside "pie"
        assert_eq!(normalize("pie"), "3.141592653589793");
    }

    #[test]
    fn test_canonical_strings_are_fixed_points() {
        for expr in ["5 + 3", "10 / 0", "2 ^ 3", "( 1 + 2 ) * 3", "3.141592653589793"] {
            assert_eq!(normalize(expr), expr);
            assert_eq!(normalize(&normalize(expr)), expr);
        }
    }

    #[test]
    fn test_output_stays_inside_whitelist() {
        let inputs = [
            "hello world!",
            "5 @ # $ three & seven",
            "eval(); drop table",
            "two times pie plus π",
            "a1b2c3",
        ];
        for input in inputs {
            let out = normalize(input);
            assert!(
                out.chars().all(is_allowed),
                "non-whitelisted char in {:?} -> {:?}",
                input,
                out
            );
        }
    }

    #[test]
    fn test_typed_expressions_pass_through() {
        assert_eq!(normalize("2*(3+4)"), "2*(3+4)");
        assert_eq!(normalize(" 7 % 2 "), "7 % 2");
    }
}
