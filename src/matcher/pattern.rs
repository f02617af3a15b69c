//! Pattern matching implementation.

/// Where in the address a word has to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Match anywhere in the address
    #[default]
    Substring,
    /// Match at the beginning of the address
    Prefix,
    /// Match at the end of the address
    Postfix,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Substring => write!(f, "substring"),
            MatchMode::Prefix => write!(f, "prefix"),
            MatchMode::Postfix => write!(f, "postfix"),
        }
    }
}

/// A list of target words and the mode they are matched in.
///
/// Matching is ASCII case-insensitive. A word longer than the address never
/// matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    words: Vec<String>,
    mode: MatchMode,
}

impl Pattern {
    /// Creates a new pattern. Word order is the order words are tested in.
    pub fn new(words: Vec<String>, mode: MatchMode) -> Self {
        Self { words, mode }
    }

    /// Parses a comma-separated word list.
    pub fn from_list(list: &str, mode: MatchMode) -> Self {
        Self::new(list.split(',').map(str::to_string).collect(), mode)
    }

    /// Returns the target words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the match mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Returns the words found in `address`, in list order.
    ///
    /// Prefix and postfix mode stop at the first matching word. Substring
    /// mode reports every matching word, so one address can count as several
    /// matches.
    pub fn matches<'a>(&'a self, address: &str) -> Vec<&'a str> {
        let address = address.as_bytes();
        let mut found = Vec::new();

        for word in &self.words {
            let word_bytes = word.as_bytes();
            if word_bytes.len() > address.len() {
                continue;
            }

            let matched = match self.mode {
                MatchMode::Prefix => address[..word_bytes.len()].eq_ignore_ascii_case(word_bytes),
                MatchMode::Postfix => address[address.len() - word_bytes.len()..]
                    .eq_ignore_ascii_case(word_bytes),
                MatchMode::Substring => address
                    .windows(word_bytes.len().max(1))
                    .any(|window| window.eq_ignore_ascii_case(word_bytes)),
            };

            if matched {
                found.push(word.as_str());
                if self.mode != MatchMode::Substring {
                    break;
                }
            }
        }

        found
    }

    /// Returns the expected number of attempts to hit the easiest word.
    ///
    /// `alphabet` is the number of distinct case-folded address characters.
    pub fn estimated_difficulty(&self, alphabet: u64) -> u64 {
        let shortest = self.words.iter().map(String::len).min().unwrap_or(0);
        alphabet.saturating_pow(shortest as u32)
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self, alphabet: u64) -> String {
        let diff = self.estimated_difficulty(alphabet);
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}
