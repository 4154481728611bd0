use super::ToolRuntime;
use crate::constants::{CALCULATION_ANSWER_PREFIX, FINAL_ANSWER_PREFIX, FUNCTION_CALL_PREFIX};

impl ToolRuntime<'_> {
    /// System instructions sent with every completion: the preamble, the
    /// numbered tool catalog and the response format.
    pub fn compose_system_instructions(&self, preamble: &str) -> String {
        let mut sections = vec![preamble.trim().to_string()];

        if self.catalog.is_empty() {
            sections.push("Available tools:\n(none)".to_string());
        } else {
            sections.push(format!("Available tools:\n{}", self.catalog.render()));
        }

        sections.push(format!(
            "You must respond with EXACTLY ONE line in one of these formats (no additional text):\n\
             1. For function calls:\n   {FUNCTION_CALL_PREFIX} function_name|param1|param2|...\n\
             2. For calculations:\n   {CALCULATION_ANSWER_PREFIX} [number]\n\
             3. For final answer:\n   {FINAL_ANSWER_PREFIX} [number]"
        ));

        sections.push(
            "Important:\n\
             - Each operation must be a separate function call\n\
             - Pass array arguments as [1, 2, 3]\n\
             - Only call tools listed above, with all of their parameters"
                .to_string(),
        );

        sections.push(format!(
            "Example sequence:\n\
             {FUNCTION_CALL_PREFIX} strings_to_chars_to_int|INDIA\n\
             {CALCULATION_ANSWER_PREFIX} [42]\n\
             {FUNCTION_CALL_PREFIX} open_paint\n\
             {FUNCTION_CALL_PREFIX} draw_rectangle|500|500|800|800\n\
             {FUNCTION_CALL_PREFIX} add_text_in_paint|[42]|550|550\n\
             {FINAL_ANSWER_PREFIX} [42]"
        ));

        sections.push(format!(
            "DO NOT include any explanations or additional text.\n\
             Your response should be a single line starting with \
             {FUNCTION_CALL_PREFIX}, {CALCULATION_ANSWER_PREFIX}, or {FINAL_ANSWER_PREFIX}"
        ));

        sections.join("\n\n")
    }
}

pub(crate) fn compose_prompt(system: &str, body: &str) -> String {
    format!("{system}\n\nQuery: {body}")
}
