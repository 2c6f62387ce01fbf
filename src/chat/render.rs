//! Full-transcript HTML rendering.
//!
//! Every update cycle re-renders the whole page from session state. There is
//! no incremental diffing; histories stay small within a single session.

use crate::chat::responder::BotReply;
use crate::chat::session::{ChatSession, PLACEHOLDER_INPUT};

/// Message shown in the transcript region when no turns exist.
pub const GREETING: &str = "Start chatting!";

/// Format the fixed apology shown when the responder failed.
pub fn apology(reason: &str) -> String {
    format!("Sorry, I encountered an error: {reason}")
}

/// Escape text for interpolation into HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the transcript region: the greeting when idle, otherwise two
/// bubbles per turn (user right-aligned, bot left-aligned).
pub fn render_transcript(session: &ChatSession) -> String {
    if session.turns().is_empty() {
        return format!("<div class=\"greeting\">{GREETING}</div>\n");
    }

    let mut out = String::new();
    for turn in session.turns() {
        out.push_str(&format!(
            "<div class=\"bubble user\">{}</div>\n",
            escape_html(&turn.user)
        ));
        let bot_text = match &turn.bot {
            BotReply::Text(text) => escape_html(text),
            BotReply::Failure(reason) => escape_html(&apology(reason)),
        };
        out.push_str(&format!("<div class=\"bubble bot\">{bot_text}</div>\n"));
    }
    out
}

/// Render the complete page: header with clear button, transcript region,
/// input area with send button. `input_value` is what the text box should
/// currently hold.
pub fn render_page(session: &ChatSession, input_value: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ChatBot Pro</title>
<style>
  body {{ height: 100vh; display: flex; flex-direction: column; background-color: #ecf0f1; margin: 0; padding: 0; font-family: Arial, sans-serif; }}
  header {{ position: relative; background-color: #2c3e50; }}
  header h1 {{ text-align: center; color: #ffffff; padding: 15px; margin: 0; }}
  header button {{ position: absolute; right: 20px; top: 15px; background-color: #e74c3c; color: white; border: none; padding: 8px 15px; border-radius: 5px; cursor: pointer; }}
  #transcript {{ flex: 1; padding: 20px; max-width: 800px; margin: 0 auto; width: 100%; box-sizing: border-box; overflow-y: auto; background-color: #f5f6fa; border-radius: 10px; display: flex; flex-direction: column; }}
  .greeting {{ text-align: center; color: #7f8c8d; margin-top: 20px; }}
  .bubble {{ padding: 10px 15px; border-radius: 15px; margin: 5px 10px; max-width: 70%; word-wrap: break-word; white-space: pre-wrap; }}
  .bubble.user {{ align-self: flex-end; background-color: #3498db; color: white; }}
  .bubble.bot {{ align-self: flex-start; background-color: #dcdcdc; color: #2c3e50; }}
  #input-area {{ display: flex; max-width: 800px; margin: 0 auto; width: 100%; box-sizing: border-box; background-color: #ffffff; border-radius: 10px; }}
  #input-area textarea {{ flex: 1; height: 50px; margin: 10px; padding: 10px; border: 1px solid #dcdcdc; border-radius: 5px; resize: none; font-size: 16px; }}
  #input-area button {{ width: 80px; height: 50px; margin: 10px 20px 10px 0; background-color: #3498db; color: white; border: none; border-radius: 5px; cursor: pointer; font-size: 16px; }}
</style>
</head>
<body>
<header>
  <h1>ChatBot Pro</h1>
  <button type="submit" form="chat-form" name="clear" value="1">Clear Chat</button>
</header>
<div id="transcript">
{transcript}</div>
<form id="chat-form" method="post" action="/">
  <div id="input-area">
    <textarea name="message" placeholder="{placeholder}" onkeydown="if(event.key==='Enter'&&!event.shiftKey){{event.preventDefault();this.form.requestSubmit(this.form.querySelector('[name=send]'));}}">{input}</textarea>
    <button type="submit" name="send" value="1">Send</button>
  </div>
</form>
</body>
</html>
"#,
        transcript = render_transcript(session),
        placeholder = PLACEHOLDER_INPUT,
        input = escape_html(input_value),
    )
}
