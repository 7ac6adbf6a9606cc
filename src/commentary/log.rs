use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Who produced a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    System,
    Ai,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub kind: LogKind,
}

impl LogEntry {
    /// UTC wall clock as `HH:MM:SS.mmm`
    pub fn format_time(&self) -> String {
        self.timestamp.format("%H:%M:%S%.3f").to_string()
    }
}

/// Append-only log keeping the latest `retention` entries
#[derive(Debug, Clone)]
pub struct CommentaryLog {
    entries: VecDeque<LogEntry>,
    retention: Option<usize>,
    next_id: u64,
}

impl CommentaryLog {
    /// `None` keeps every entry
    pub fn new(retention: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            retention,
            next_id: 0,
        }
    }

    pub fn push(&mut self, kind: LogKind, message: impl Into<String>) {
        let entry = LogEntry {
            id: self.next_id,
            message: message.into(),
            timestamp: Utc::now(),
            kind,
        };
        self.next_id += 1;
        self.entries.push_back(entry);

        if let Some(limit) = self.retention {
            while self.entries.len() > limit {
                self.entries.pop_front();
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CommentaryLog {
    fn default() -> Self {
        Self::new(Some(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn messages(log: &CommentaryLog) -> Vec<&str> {
        log.entries().map(|e| e.message.as_str()).collect()
    }

    #[test]
    fn test_keeps_latest_entries() {
        let mut log = CommentaryLog::new(Some(3));
        for i in 0..5 {
            log.push(LogKind::System, format!("line {i}"));
        }

        assert_eq!(log.len(), 3);
        assert_eq!(messages(&log), vec!["line 2", "line 3", "line 4"]);
        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut log = CommentaryLog::new(None);
        for i in 0..50 {
            log.push(LogKind::Ai, format!("{i}"));
        }
        assert_eq!(log.len(), 50);
    }

    #[test]
    fn test_zero_retention_keeps_nothing() {
        let mut log = CommentaryLog::new(Some(0));
        log.push(LogKind::System, "gone");
        assert!(log.is_empty());
    }

    #[test]
    fn test_clear_keeps_ids_increasing() {
        let mut log = CommentaryLog::default();
        log.push(LogKind::System, "a");
        log.clear();
        log.push(LogKind::System, "b");
        assert_eq!(log.entries().next().unwrap().id, 1);
    }

    #[test]
    fn test_time_formatting() {
        let entry = LogEntry {
            id: 0,
            message: String::new(),
            timestamp: Utc.with_ymd_and_hms(1970, 1, 4, 1, 2, 3).unwrap()
                + Duration::milliseconds(45),
            kind: LogKind::Ai,
        };
        assert_eq!(entry.format_time(), "01:02:03.045");
    }

    #[test]
    fn test_stamps_are_utc_now() {
        let before = Utc::now();
        let mut log = CommentaryLog::default();
        log.push(LogKind::System, "boot");
        let stamp = log.entries().next().unwrap().timestamp;

        assert!(stamp >= before && stamp <= Utc::now());
    }
}
