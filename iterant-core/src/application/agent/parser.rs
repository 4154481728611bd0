use super::directive::Directive;
use crate::constants::{CALCULATION_ANSWER_PREFIX, FINAL_ANSWER_PREFIX, FUNCTION_CALL_PREFIX};
use std::str::Lines;
use tracing::debug;

/// Lazily classifies completion lines; lines without a known prefix are skipped.
pub struct Directives<'a> {
    lines: Lines<'a>,
}

pub fn parse_directives(text: &str) -> Directives<'_> {
    Directives {
        lines: text.lines(),
    }
}

impl Iterator for Directives<'_> {
    type Item = Directive;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?.trim();
            if line.is_empty() {
                continue;
            }
            match classify(line) {
                Some(directive) => return Some(directive),
                None => debug!(line, "Ignoring non-directive line"),
            }
        }
    }
}

fn classify(line: &str) -> Option<Directive> {
    if line.starts_with(FUNCTION_CALL_PREFIX) {
        let (_, call) = line.split_once(':')?;
        let mut tokens = call.split('|').map(|token| token.trim().to_string());
        let name = tokens.next().unwrap_or_default();
        return Some(Directive::FunctionCall {
            name,
            raw_args: tokens.collect(),
        });
    }
    if let Some(rest) = line.strip_prefix(CALCULATION_ANSWER_PREFIX) {
        return Some(Directive::CalculationAnswer {
            literal_text: rest.trim().to_string(),
        });
    }
    if let Some(rest) = line.strip_prefix(FINAL_ANSWER_PREFIX) {
        return Some(Directive::FinalAnswer {
            literal_text: rest.trim().to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[&str]) -> Directive {
        Directive::FunctionCall {
            name: name.to_string(),
            raw_args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn function_call_splits_name_and_positional_args() {
        let directives: Vec<_> = parse_directives("FUNCTION_CALL: add|2|3").collect();
        assert_eq!(directives, vec![call("add", &["2", "3"])]);
    }

    #[test]
    fn tolerates_whitespace_blank_lines_and_commentary() {
        let text = "\n  Sure, here is the next step:\n\n   FUNCTION_CALL:  draw_rectangle | 500 |500| 800|800  \n\
                    CALCULATION_ANSWER: [42]\n\
                    some trailing chatter\n\
                    FINAL_ANSWER:   [42]  \n";
        let directives: Vec<_> = parse_directives(text).collect();
        assert_eq!(
            directives,
            vec![
                call("draw_rectangle", &["500", "500", "800", "800"]),
                Directive::CalculationAnswer {
                    literal_text: "[42]".into()
                },
                Directive::FinalAnswer {
                    literal_text: "[42]".into()
                },
            ]
        );
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        assert_eq!(parse_directives("final_answer: 1\nFunction_Call: add|1|2").count(), 0);
    }

    #[test]
    fn call_without_arguments_and_array_tokens() {
        let directives: Vec<_> =
            parse_directives("FUNCTION_CALL: open_paint\nFUNCTION_CALL: int_list_to_exponential_sum|[73, 78, 68]")
                .collect();
        assert_eq!(
            directives,
            vec![
                call("open_paint", &[]),
                call("int_list_to_exponential_sum", &["[73, 78, 68]"]),
            ]
        );
    }

    #[test]
    fn only_the_first_colon_separates_the_prefix() {
        let directives: Vec<_> = parse_directives("FUNCTION_CALL: add_text_in_paint|ratio: 3:4|10").collect();
        assert_eq!(directives, vec![call("add_text_in_paint", &["ratio: 3:4", "10"])]);
    }

    #[test]
    fn iteration_is_lazy() {
        let mut directives = parse_directives("FINAL_ANSWER: [1]\nFUNCTION_CALL: add|1|2");
        assert_eq!(
            directives.next(),
            Some(Directive::FinalAnswer {
                literal_text: "[1]".into()
            })
        );
        assert_eq!(directives.next(), Some(call("add", &["1", "2"])));
        assert_eq!(directives.next(), None);
    }

    #[test]
    fn display_round_trips_the_wire_form() {
        assert_eq!(call("add", &["2", "3"]).to_string(), "FUNCTION_CALL: add|2|3");
        assert_eq!(
            Directive::CalculationAnswer {
                literal_text: "[42]".into()
            }
            .to_string(),
            "CALCULATION_ANSWER: [42]"
        );
    }
}
