use crate::config::AppConfig;
use chrono::Local;
use ratatui::layout::Rect;

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: String,
    pub text: String,
    pub kind: LogKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Game state transitions.
    State,
    /// Card selection and flips.
    Card,
    System,
}

pub struct AppState {
    pub config: AppConfig,
    pub log: Vec<LogEntry>,
    /// Last known terminal area, for mouse hit-testing.
    pub viewport: Rect,
    pub should_quit: bool,
    pub dirty: bool,
    timestamp_format: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let timestamp_format = config.ui.timestamp_format.clone();
        Self {
            config,
            log: Vec::new(),
            viewport: Rect::default(),
            should_quit: false,
            dirty: true,
            timestamp_format,
        }
    }

    pub fn push_log(&mut self, kind: LogKind, text: String) {
        self.log.push(LogEntry {
            timestamp: Local::now().format(&self.timestamp_format).to_string(),
            text,
            kind,
        });
        let max = self.config.ui.max_log_entries.max(1);
        if self.log.len() > max {
            let excess = self.log.len() - max;
            self.log.drain(..excess);
        }
        self.dirty = true;
    }

    pub fn system_message(&mut self, text: String) {
        self.push_log(LogKind::System, text);
    }
}
