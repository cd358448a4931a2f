#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
}

pub const READY_STATUS: &str = "Ready. Fill in the entries and submit.";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
    }

    pub fn value_updated(&mut self) {
        self.message = "Value updated".to_string();
    }

    pub fn entry_added(&mut self, total: usize) {
        self.message = format!("Added entry #{total}");
    }

    pub fn entry_removed(&mut self, index: usize, remaining: usize) {
        self.message = format!("Removed entry #{} • {remaining} left", index + 1);
    }

    pub fn submitting(&mut self) {
        self.message = "Submitting…".to_string();
    }

    pub fn issues_remaining(&mut self, count: usize) {
        self.message = format!("{count} issue(s) remaining");
    }

    pub fn saved(&mut self) {
        self.message = "Saved. Start a new entry to continue.".to_string();
    }

    pub fn failed(&mut self, reason: &str) {
        self.message = format!("Submission failed: {reason}");
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
