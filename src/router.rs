//! Fixed replies that never need the model.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::facts::{random_fact, FACT_MARKER};
use crate::history::Role;
use crate::portrait::is_picture_command;
use crate::session::Session;

pub const RESET_KEYWORD: &str = "start";

pub const GREETING_OPENER: &str = "Hey. I'm Todd, your ever-so-dry potato.";

pub const AFFIRMATIVE_REPLY: &str =
    "Oh? What a spud, always so eager. Try not to sprout with excitement.";

static AFFIRMATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:yes|yeah|yep|yup|sure|ok|okay|absolutely|of course)\b").unwrap()
});
static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:no|nope|nah|not really|not yet|haven't|i haven't|never)\b").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Reset,
    Portrait,
    Affirmative,
    Negative,
    Defer,
}

/// Priority order: reset, portrait flow, yes, no, then the model.
pub fn classify(text: &str, session: &Session) -> Intent {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(RESET_KEYWORD) {
        Intent::Reset
    } else if session.portrait.is_active() || is_picture_command(trimmed) {
        Intent::Portrait
    } else {
        classify_pledge(trimmed)
    }
}

fn classify_pledge(text: &str) -> Intent {
    if AFFIRMATIVE.is_match(text) {
        Intent::Affirmative
    } else if NEGATIVE.is_match(text) {
        Intent::Negative
    } else {
        Intent::Defer
    }
}

pub fn greeting() -> String {
    format!(
        "{GREETING_OPENER}\n{FACT_MARKER} {}\nIf you want your picture drawn as a potato, just say 'make me a potato'.\nAlso, have you taken the potato pledge?",
        random_fact()
    )
}

pub struct ReplyRouter {
    pledge_url: String,
}

impl ReplyRouter {
    pub fn new(pledge_url: impl Into<String>) -> Self {
        Self {
            pledge_url: pledge_url.into(),
        }
    }

    pub fn negative_reply(&self) -> String {
        format!(
            "Figures. Go take the potato pledge: {}. I'd roll my eyes if I had any.",
            self.pledge_url
        )
    }

    /// Answer from fixed logic, or `None` to hand the message to the model.
    /// Every answered turn except a reset is recorded in history.
    pub fn route(&self, session: &mut Session, text: &str) -> Option<String> {
        let reply = match classify(text, session) {
            Intent::Reset => {
                session.reset();
                return Some(greeting());
            }
            Intent::Portrait => match session.portrait.advance(text) {
                Some(reply) => reply,
                // flow bailed out, give the pledge checks a chance
                None => self.pledge_reply(classify_pledge(text.trim()))?,
            },
            intent => self.pledge_reply(intent)?,
        };

        session.history.push(Role::User, text);
        session.history.push(Role::Todd, reply.as_str());
        Some(reply)
    }

    fn pledge_reply(&self, intent: Intent) -> Option<String> {
        match intent {
            Intent::Affirmative => Some(AFFIRMATIVE_REPLY.to_string()),
            Intent::Negative => Some(self.negative_reply()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portrait::{PortraitState, QUESTIONS};

    fn router() -> ReplyRouter {
        ReplyRouter::new("https://example.com/pledge")
    }

    #[test]
    fn test_classify_priority() {
        let session = Session::new();
        assert_eq!(classify("", &session), Intent::Reset);
        assert_eq!(classify("  START ", &session), Intent::Reset);
        assert_eq!(classify("make me a potato", &session), Intent::Portrait);
        assert_eq!(classify("Yes please", &session), Intent::Affirmative);
        assert_eq!(classify("okay", &session), Intent::Affirmative);
        assert_eq!(classify("Nope", &session), Intent::Negative);
        assert_eq!(classify("not really", &session), Intent::Negative);
        assert_eq!(classify("I haven't", &session), Intent::Negative);
        assert_eq!(classify("nothing much", &session), Intent::Defer);
        assert_eq!(classify("what's up", &session), Intent::Defer);
    }

    #[test]
    fn test_active_portrait_wins_over_pledge() {
        let mut session = Session::new();
        session.portrait.advance("make me a potato");
        assert_eq!(classify("no", &session), Intent::Portrait);
    }

    #[test]
    fn test_greeting_resets_everything() {
        let router = router();
        let mut session = Session::new();
        router.route(&mut session, "make me a potato");
        router.route(&mut session, "yes");

        let reply = router.route(&mut session, "").unwrap();
        assert!(reply.starts_with(GREETING_OPENER));
        assert_eq!(reply.matches(FACT_MARKER).count(), 1);
        assert!(reply.contains("potato pledge"));
        assert!(session.history.is_seed());
        assert_eq!(session.portrait.state(), PortraitState::Idle);
    }

    #[test]
    fn test_greeting_shape_is_stable() {
        let router = router();
        let mut session = Session::new();
        let first = router.route(&mut session, "start").unwrap();
        session.history.push(Role::User, "lots of chatter");
        let second = router.route(&mut session, "Start").unwrap();
        assert_eq!(first.lines().count(), second.lines().count());
        assert_eq!(first.lines().next(), second.lines().next());
        assert!(session.history.is_seed());
    }

    #[test]
    fn test_pledge_replies_recorded() {
        let router = router();
        let mut session = Session::new();

        assert_eq!(router.route(&mut session, "yeah").as_deref(), Some(AFFIRMATIVE_REPLY));
        let no = router.route(&mut session, "nah").unwrap();
        assert!(no.contains("https://example.com/pledge"));

        let last: Vec<_> = session.history.recent(4).collect();
        assert_eq!(last[0].text, "yeah");
        assert_eq!(last[1].role, Role::Todd);
        assert_eq!(last[2].text, "nah");
        assert_eq!(last[3].text, no);
    }

    #[test]
    fn test_portrait_turns_recorded() {
        let router = router();
        let mut session = Session::new();
        let reply = router.route(&mut session, "make me a potato").unwrap();
        assert_eq!(reply, QUESTIONS[0].prompt);
        assert_eq!(session.history.last().unwrap().text, QUESTIONS[0].prompt);
    }

    #[test]
    fn test_unmatched_text_defers_without_touching_history() {
        let router = router();
        let mut session = Session::new();
        assert_eq!(router.route(&mut session, "tell me about fries"), None);
        assert!(session.history.is_seed());
    }
}
