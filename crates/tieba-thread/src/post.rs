use serde::{Deserialize, Serialize};

/// Like and collect state of the post shown on a detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostReactions {
    pub likes: u64,
    pub collected: bool,
}

impl PostReactions {
    /// Start from the counts rendered with the page.
    pub fn new(likes: u64, collected: bool) -> Self {
        Self { likes, collected }
    }

    /// Add one like and return the new total.
    pub fn like(&mut self) -> u64 {
        self.likes += 1;
        self.likes
    }

    /// Flip the collected flag and return the new state.
    pub fn toggle_collect(&mut self) -> bool {
        self.collected = !self.collected;
        self.collected
    }

    /// Text of the like button, e.g. `Like (1,235)`.
    pub fn like_label(&self) -> String {
        format!("Like ({})", format_count(self.likes))
    }
}

/// Format a count with `,` thousands separators.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
