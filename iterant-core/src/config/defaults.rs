pub const DEFAULT_MAX_ITERATIONS: usize = 9;
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;

/// Tools that drive a desktop application and need time to take effect.
pub const DEFAULT_SETTLE_TOOLS: [&str; 4] = [
    "open_paint",
    "select_rectangle_tool",
    "draw_rectangle",
    "add_text_in_paint",
];

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a math agent solving problems in iterations. \
You have access to various mathematical tools.";
