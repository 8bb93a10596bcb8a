//! 示例脚本（GET /example 原样返回）

pub const EXAMPLE_SCRIPT: &str = "david: Hello! Welcome to our podcast. Today we're going to discuss some exciting topics.
janis: That's right, David. We have a lot of interesting content planned for our listeners.
david: So Janis, what's the first topic you'd like to cover today?
janis: Well, I think we should start with the basics of our service and how it works.";

pub const SCRIPT_FORMAT: &str =
    "Each line should start with 'david:' or 'janis:' followed by the text for that speaker";
