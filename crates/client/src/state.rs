//! Presentation state that lives outside the game session.
use std::collections::VecDeque;

use mine_runtime::LeaderboardEntry;

/// Bounded log of status lines, newest last.
#[derive(Clone, Debug)]
pub struct MessageLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::new(),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn recent(&self, count: usize) -> impl Iterator<Item = &String> {
        self.lines.iter().skip(self.lines.len().saturating_sub(count))
    }
}

/// UI-only state: messages and the last leaderboard fetched.
#[derive(Clone, Debug)]
pub struct AppState {
    pub messages: MessageLog,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_size: usize,
}

impl AppState {
    pub const MESSAGE_CAPACITY: usize = 64;

    pub fn new(leaderboard_size: usize) -> Self {
        Self {
            messages: MessageLog::new(Self::MESSAGE_CAPACITY),
            leaderboard: Vec::new(),
            leaderboard_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_log_drops_oldest() {
        let mut log = MessageLog::new(2);
        log.push("one");
        log.push("two");
        log.push("three");
        let recent: Vec<&String> = log.recent(5).collect();
        assert_eq!(recent, vec!["two", "three"]);
        assert_eq!(log.recent(1).next().map(String::as_str), Some("three"));
    }
}
