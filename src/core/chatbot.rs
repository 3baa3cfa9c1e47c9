use chrono::NaiveDateTime;

/// Keyword rules checked in order against the lower-cased message.
/// Matching is by substring, so "this" still counts as a greeting.
pub fn bot_response(message: &str, now: NaiveDateTime) -> String {
    let msg = message.to_lowercase();

    if msg.contains("hello") || msg.contains("hi") {
        "Hey 👋 How can I help you today?".to_string()
    } else if msg.contains("help") {
        "I’m a simple chatbot. Ask me about the time, date, or just chat 🙂".to_string()
    } else if msg.contains("time") {
        format!("The current time is {}", now.format("%H:%M:%S"))
    } else if msg.contains("date") {
        format!("Today's date is {}", now.format("%d %B %Y"))
    } else if msg.contains("bye") {
        "Goodbye! 👋 Have a great day.".to_string()
    } else {
        "🤖 I’m still learning. Try something else!".to_string()
    }
}
