//! The "make me a potato" questionnaire.
//!
//! Collects a handful of free-form answers one message at a time and
//! renders them into a potato portrait. Bad state never panics; it just
//! drops back to idle.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, warn};

pub struct QuestionSlot {
    pub key: &'static str,
    pub prompt: &'static str,
}

pub const GENDER_KEY: &str = "feminineOrMasculine";

pub const QUESTIONS: &[QuestionSlot] = &[
    QuestionSlot {
        key: GENDER_KEY,
        prompt: "Would you describe yourself as more feminine or masculine?",
    },
    QuestionSlot {
        key: "hairColor",
        prompt: "What's your hair color?",
    },
    QuestionSlot {
        key: "eyeColor",
        prompt: "What's your eye color?",
    },
    QuestionSlot {
        key: "height",
        prompt: "What's your approximate height?",
    },
];

pub const MASCULINE_IMAGE: &str =
    "https://storage.googleapis.com/msgsndr/SCPz31dkICCBwc0kwRoe/media/67cdb5fc3d108845a2d88ee5.jpeg";
pub const FEMININE_IMAGE: &str =
    "https://storage.googleapis.com/msgsndr/SCPz31dkICCBwc0kwRoe/media/67cdb5f6c6d47c54b7d4691a.jpeg";

static PICTURE_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:make me a potato|draw me(?: as a potato)?|potato me|potatize me)").unwrap()
});
static MASCULINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mascul|man|male|boy").unwrap());
static FEMININE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)femin|woman|female|girl").unwrap());

pub fn is_picture_command(input: &str) -> bool {
    PICTURE_COMMAND.is_match(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitState {
    Idle,
    CollectingAnswers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortraitStyle {
    Masculine,
    Feminine,
}

impl PortraitStyle {
    /// Masculine tokens are tested first, so "woman" and "female" match on
    /// "man" and "male". Anything unrecognized gets the feminine image.
    pub fn from_answer(answer: &str) -> Self {
        if MASCULINE.is_match(answer) {
            PortraitStyle::Masculine
        } else if FEMININE.is_match(answer) {
            PortraitStyle::Feminine
        } else {
            PortraitStyle::Feminine
        }
    }

    pub fn image_url(self) -> &'static str {
        match self {
            PortraitStyle::Masculine => MASCULINE_IMAGE,
            PortraitStyle::Feminine => FEMININE_IMAGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortraitSession {
    state: PortraitState,
    question_index: usize,
    answers: HashMap<&'static str, String>,
}

impl Default for PortraitSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PortraitSession {
    pub fn new() -> Self {
        Self {
            state: PortraitState::Idle,
            question_index: 0,
            answers: HashMap::new(),
        }
    }

    pub fn state(&self) -> PortraitState {
        self.state
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn answers(&self) -> &HashMap<&'static str, String> {
        &self.answers
    }

    pub fn is_active(&self) -> bool {
        self.state == PortraitState::CollectingAnswers
    }

    pub fn reset(&mut self) {
        self.state = PortraitState::Idle;
        self.question_index = 0;
        self.answers.clear();
    }

    /// Feed one message into the flow. `None` means the flow has nothing
    /// to say about it.
    pub fn advance(&mut self, input: &str) -> Option<String> {
        debug!(state = ?self.state, question = self.question_index, "portrait advance");

        if self.state == PortraitState::Idle && is_picture_command(input.trim()) {
            self.state = PortraitState::CollectingAnswers;
            self.question_index = 0;
            self.answers.clear();
            return Some(QUESTIONS[0].prompt.to_string());
        }

        if self.state != PortraitState::CollectingAnswers {
            return None;
        }

        let Some(slot) = QUESTIONS.get(self.question_index) else {
            warn!(question = self.question_index, "portrait question index out of range, resetting");
            self.reset();
            return None;
        };
        self.answers.insert(slot.key, input.to_string());
        self.question_index += 1;

        if let Some(next) = QUESTIONS.get(self.question_index) {
            return Some(next.prompt.to_string());
        }

        let portrait = render_portrait(&self.answers);
        self.reset();
        Some(portrait)
    }
}

pub fn render_portrait(answers: &HashMap<&'static str, String>) -> String {
    let answer = |key: &str| answers.get(key).map(String::as_str).unwrap_or_default();
    let style = answer(GENDER_KEY);
    let image = PortraitStyle::from_answer(style).image_url();

    format!(
        "Alright, I've immortalized you as a potato. Not sure why you'd want that, but here we are:
Style: {style} (though potatoes don't really care about gender).
Hair color: {hair} (mine's dirt brown, naturally).
Eye color: {eyes} (potato eyes are just sprouts, but I'll pretend to be impressed).
Height: {height} (I'm fun-sized, which is just another way of saying \"easily mashed\").
Here's your custom potato portrait! <br> <img src='{image}' alt='Custom Potato' style='max-width:200px;'>

Spud Fact: Potatoes have been around for about 10,000 years. That's a lot of time to develop this level of sarcasm.",
        hair = answer("hairColor"),
        eyes = answer("eyeColor"),
        height = answer("height"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FACT_MARKER;

    fn run(session: &mut PortraitSession, answers: &[&str]) -> Vec<Option<String>> {
        answers.iter().map(|a| session.advance(a)).collect()
    }

    #[test]
    fn test_picture_commands() {
        assert!(is_picture_command("Make me a potato"));
        assert!(is_picture_command("please DRAW ME AS A POTATO"));
        assert!(is_picture_command("potato me"));
        assert!(is_picture_command("potatize me now"));
        assert!(!is_picture_command("what is a potato"));
    }

    #[test]
    fn test_picture_command_starts_flow() {
        let mut session = PortraitSession::new();
        let reply = session.advance("make me a potato");
        assert_eq!(
            reply.as_deref(),
            Some("Would you describe yourself as more feminine or masculine?")
        );
        assert_eq!(session.state(), PortraitState::CollectingAnswers);
        assert_eq!(session.question_index(), 0);
    }

    #[test]
    fn test_idle_ignores_other_input() {
        let mut session = PortraitSession::new();
        assert_eq!(session.advance("hello"), None);
        assert_eq!(session.state(), PortraitState::Idle);
    }

    #[test]
    fn test_full_flow_masculine() {
        let mut session = PortraitSession::new();
        let replies = run(
            &mut session,
            &["make me a potato", "masculine", "brown", "green", "6 feet"],
        );
        assert_eq!(replies[1].as_deref(), Some(QUESTIONS[1].prompt));
        assert_eq!(replies[2].as_deref(), Some(QUESTIONS[2].prompt));
        assert_eq!(replies[3].as_deref(), Some(QUESTIONS[3].prompt));

        let portrait = replies[4].clone().unwrap();
        for answer in ["masculine", "brown", "green", "6 feet"] {
            assert!(portrait.contains(answer), "missing {answer}");
        }
        assert!(portrait.contains(MASCULINE_IMAGE));
        assert!(!portrait.contains(FEMININE_IMAGE));
        assert_eq!(portrait.matches("<img").count(), 1);
        assert_eq!(portrait.matches(FACT_MARKER).count(), 1);

        assert_eq!(session.state(), PortraitState::Idle);
        assert!(session.answers().is_empty());
        assert_eq!(session.question_index(), 0);
    }

    #[test]
    fn test_answers_are_kept_verbatim() {
        let mut session = PortraitSession::new();
        let replies = run(
            &mut session,
            &["potato me", "  Girl <b>  ", "Ash Blonde", "hazel", "5'4\""],
        );
        let portrait = replies[4].clone().unwrap();
        assert!(portrait.contains("  Girl <b>  "));
        assert!(portrait.contains("5'4\""));
        assert!(portrait.contains(FEMININE_IMAGE));
    }

    #[test]
    fn test_gender_rule() {
        assert_eq!(PortraitStyle::from_answer("Masculine"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("a boy"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("MAN"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("feminine"), PortraitStyle::Feminine);
        assert_eq!(PortraitStyle::from_answer("girl"), PortraitStyle::Feminine);
        // overlapping words hit the masculine tokens first
        assert_eq!(PortraitStyle::from_answer("woman"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("female"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("feminine man"), PortraitStyle::Masculine);
        assert_eq!(PortraitStyle::from_answer("neither"), PortraitStyle::Feminine);
        assert_eq!(PortraitStyle::from_answer(""), PortraitStyle::Feminine);
    }

    #[test]
    fn test_second_run_starts_clean() {
        let mut session = PortraitSession::new();
        run(&mut session, &["make me a potato", "masculine", "red", "blue", "tall"]);
        assert_eq!(
            session.advance("make me a potato").as_deref(),
            Some(QUESTIONS[0].prompt)
        );
        assert!(session.answers().is_empty());
    }

    #[test]
    fn test_out_of_range_index_resets() {
        let mut session = PortraitSession::new();
        session.advance("make me a potato");
        session.question_index = QUESTIONS.len() + 3;
        assert_eq!(session.advance("anything"), None);
        assert_eq!(session.state(), PortraitState::Idle);
        assert_eq!(session.question_index(), 0);
    }
}
