pub mod render;
pub mod responder;
pub mod session;

use tracing::{debug, warn};

use crate::chat::responder::{BotReply, Responder};
use crate::chat::session::{is_submittable, ChatSession, EventCycle};

/// Run one update cycle against the session.
///
/// Clear takes precedence over a simultaneous submit. A responder failure is
/// recorded as a `BotReply::Failure` turn rather than propagated, so a bad
/// model call never breaks the loop.
///
/// Returns the text the input field should hold afterwards: empty after a
/// clear or a successful submit, otherwise the cycle's input unchanged.
pub async fn handle_cycle(
    session: &mut ChatSession,
    responder: &dyn Responder,
    cycle: EventCycle,
) -> String {
    if cycle.clear {
        debug!(turns = session.turns().len(), "clearing conversation");
        session.clear();
        return String::new();
    }

    if cycle.submit && is_submittable(&cycle.input) {
        let bot = match responder.reply(&cycle.input).await {
            Ok(text) => BotReply::Text(text),
            Err(e) => {
                warn!(error = %e, "responder failed; recording failure turn");
                BotReply::Failure(e.to_string())
            }
        };
        session.push_turn(cycle.input, bot);
        debug!(turns = session.turns().len(), "turn appended");
        return String::new();
    }

    // No transition: redisplay as-is and preserve whatever was typed.
    cycle.input
}
