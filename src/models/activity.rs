use serde::Serialize;

/// One extracurricular offering. Serialized as-is by `GET /activities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String, // free text, never parsed
    pub max_participants: u32,
    /// Email addresses in signup order.
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn new(description: &str, schedule: &str, max_participants: u32) -> Self {
        Self {
            description: description.to_string(),
            schedule: schedule.to_string(),
            max_participants,
            participants: Vec::new(),
        }
    }

    pub fn with_participants(mut self, emails: &[&str]) -> Self {
        self.participants = emails.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }
}
