use crate::constants::{CALCULATION_ANSWER_PREFIX, FINAL_ANSWER_PREFIX, FUNCTION_CALL_PREFIX};
use std::fmt;

/// One classified instruction line from a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    FunctionCall { name: String, raw_args: Vec<String> },
    CalculationAnswer { literal_text: String },
    FinalAnswer { literal_text: String },
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::FunctionCall { name, raw_args } => {
                write!(f, "{FUNCTION_CALL_PREFIX} {name}")?;
                for arg in raw_args {
                    write!(f, "|{arg}")?;
                }
                Ok(())
            }
            Directive::CalculationAnswer { literal_text } => {
                write!(f, "{CALCULATION_ANSWER_PREFIX} {literal_text}")
            }
            Directive::FinalAnswer { literal_text } => {
                write!(f, "{FINAL_ANSWER_PREFIX} {literal_text}")
            }
        }
    }
}
