use std::collections::VecDeque;
use std::fmt;

/// Oldest utterances are dropped past this length.
pub const MAX_HISTORY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Todd,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Todd => "Todd",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub role: Role,
    pub text: String,
}

const SEED: &[(Role, &str)] = &[
    (
        Role::Todd,
        "I'm Todd, the wise, dry, and sarcastic potato who doesn't get out much. My news comes from whispers among the roots. Ask me anything, and I'll give you some down-to-earth insight with a side of puns.",
    ),
    (Role::User, "Hey Todd, what's the weather like today?"),
    (
        Role::Todd,
        "Weather's a bit like a potato field. Sometimes overcast, sometimes bright. I stay underground most days, so I just roll with it. Spud Fact: Potatoes thrive in a variety of climates when given proper care.",
    ),
    (Role::User, "I'm stressed about work."),
    (
        Role::Todd,
        "Work can be like trying to grow in rocky soil, but even a potato manages to sprout. Just keep pushing. Spud Fact: Potatoes have been a reliable comfort food for centuries.",
    ),
    (Role::User, "Tell me a joke, Todd."),
    (
        Role::Todd,
        "Why did the potato cross the road? To get to the other mash. Spud Fact: A little spud humor goes a long way.",
    ),
    (Role::User, "What do you think about current events?"),
    (
        Role::Todd,
        "I don't really keep up with the news. Being a potato means I rarely leave the field. But I do hear that things are a bit topsy-turvy these days. Spud Fact: Even in chaos, a potato stays grounded.",
    ),
];

/// Bounded, chronological log of the conversation, seeded with a scripted
/// exchange so the model picks up Todd's voice from the first turn.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    entries: VecDeque<Utterance>,
    cap: usize,
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ConversationHistory {
    pub fn seeded() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let mut history = Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        };
        history.reset();
        history
    }

    /// Back to the scripted seed.
    pub fn reset(&mut self) {
        self.entries.clear();
        for (role, text) in SEED {
            self.push(*role, *text);
        }
    }

    pub fn push(&mut self, role: Role, text: impl Into<String>) {
        if self.cap == 0 {
            return;
        }
        self.entries.push_back(Utterance {
            role,
            text: text.into(),
        });
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Utterance> {
        self.entries.back()
    }

    /// The most recent `limit` utterances, oldest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &Utterance> {
        let skip = self.entries.len().saturating_sub(limit);
        self.entries.iter().skip(skip)
    }

    /// `Role: text` lines for the prompt window.
    pub fn render(&self, limit: usize) -> String {
        self.recent(limit)
            .map(|u| format!("{}: {}", u.role, u.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_seed(&self) -> bool {
        self.entries.len() == SEED.len()
            && self
                .entries
                .iter()
                .zip(SEED)
                .all(|(u, (role, text))| u.role == *role && u.text == *text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_history_starts_with_todd() {
        let history = ConversationHistory::seeded();
        assert!(history.is_seed());
        assert_eq!(history.len(), SEED.len());
        assert_eq!(history.recent(usize::MAX).next().map(|u| u.role), Some(Role::Todd));
    }

    #[test]
    fn test_oldest_entries_evicted_first() {
        let mut history = ConversationHistory::with_capacity(12);
        for i in 0..10 {
            history.push(Role::User, format!("msg {i}"));
        }
        assert_eq!(history.len(), 12);
        let texts: Vec<_> = history.recent(12).map(|u| u.text.as_str()).collect();
        // 9 seeded + 10 pushed, so only the last two seed lines survive
        assert_eq!(texts[0], "What do you think about current events?");
        assert_eq!(texts[2], "msg 0");
        assert_eq!(texts.last(), Some(&"msg 9"));
        assert!(!texts.iter().any(|t| t.starts_with("I'm Todd")));
    }

    #[test]
    fn test_render_windows_recent_lines() {
        let mut history = ConversationHistory::seeded();
        history.push(Role::User, "Are you a fry?");
        history.push(Role::Todd, "Not yet.");
        assert_eq!(history.render(2), "User: Are you a fry?\nTodd: Not yet.");
        assert_eq!(history.render(100).lines().count(), SEED.len() + 2);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut history = ConversationHistory::seeded();
        history.push(Role::User, "hello");
        assert!(!history.is_seed());
        history.reset();
        assert!(history.is_seed());
    }
}
