/// Wraps the message, quoted and unescaped, in the fixed chat reply template.
pub fn chat_reply(message: &str) -> String {
    format!("\"{message}\"에 대한 AI 답변입니다.")
}
