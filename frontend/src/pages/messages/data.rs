//! In-memory inbox backed by static threads. Sent messages live only in the page state.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u32,
    pub from_me: bool,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: &'static str,
    pub participant: &'static str,
    pub subtitle: &'static str,
    pub unread: u32,
    pub messages: Vec<Message>,
}

impl Thread {
    pub fn preview(&self) -> &str {
        self.messages.last().map(|m| m.body.as_str()).unwrap_or("")
    }
}

fn message(id: u32, from_me: bool, body: &str, sent_at: DateTime<Utc>) -> Message {
    Message {
        id,
        from_me,
        body: body.to_string(),
        sent_at,
    }
}

pub fn sample_threads(now: DateTime<Utc>) -> Vec<Thread> {
    vec![
        Thread {
            id: "t-chen",
            participant: "Dr. Maya Chen",
            subtitle: "Cognitive behavioral therapy",
            unread: 2,
            messages: vec![
                message(1, false, "Hi! Looking forward to our session tomorrow.", now - Duration::hours(20)),
                message(2, true, "Thanks, me too. Should I prepare anything?", now - Duration::hours(19)),
                message(3, false, "Jot down a few moments from this week that felt stressful.", now - Duration::hours(2)),
                message(4, false, "No need to be detailed, a sentence each is plenty.", now - Duration::hours(2)),
            ],
        },
        Thread {
            id: "t-morgan",
            participant: "Alex Morgan, LMFT",
            subtitle: "Couples and family therapy",
            unread: 0,
            messages: vec![
                message(5, true, "Could we move next week's session to Thursday?", now - Duration::days(3)),
                message(6, false, "Thursday at 4pm works. I've updated the booking.", now - Duration::days(2)),
            ],
        },
        Thread {
            id: "t-support",
            participant: "MindHaven Support",
            subtitle: "Account and billing",
            unread: 0,
            messages: vec![message(
                7,
                false,
                "Welcome to MindHaven! Reply here if you need help with your account.",
                now - Duration::days(10),
            )],
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbox {
    threads: Vec<Thread>,
    selected: Option<&'static str>,
    next_id: u32,
}

impl Inbox {
    pub fn new(threads: Vec<Thread>) -> Self {
        let next_id = threads
            .iter()
            .flat_map(|t| t.messages.iter().map(|m| m.id))
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            threads,
            selected: None,
            next_id,
        }
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn selected(&self) -> Option<&Thread> {
        let id = self.selected?;
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn total_unread(&self) -> u32 {
        self.threads.iter().map(|t| t.unread).sum()
    }

    /// Opening a thread marks it read.
    pub fn select(&mut self, id: &str) {
        if let Some(thread) = self.threads.iter_mut().find(|t| t.id == id) {
            thread.unread = 0;
            self.selected = Some(thread.id);
        }
    }

    pub fn send(&mut self, body: &str, now: DateTime<Utc>) -> Result<(), &'static str> {
        let body = body.trim();
        if body.is_empty() {
            return Err("Message cannot be empty");
        }
        let id = self.next_id;
        let selected = self.selected.ok_or("Select a conversation first")?;
        let thread = self
            .threads
            .iter_mut()
            .find(|t| t.id == selected)
            .ok_or("Select a conversation first")?;
        thread.messages.push(message(id, true, body, now));
        self.next_id += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_marks_thread_read() {
        let now = Utc::now();
        let mut inbox = Inbox::new(sample_threads(now));
        assert_eq!(inbox.total_unread(), 2);
        inbox.select("t-chen");
        assert_eq!(inbox.total_unread(), 0);
        assert_eq!(inbox.selected().map(|t| t.participant), Some("Dr. Maya Chen"));
        inbox.select("missing");
        assert_eq!(inbox.selected().map(|t| t.id), Some("t-chen"));
    }

    #[test]
    fn send_appends_to_selected_thread() {
        let now = Utc::now();
        let mut inbox = Inbox::new(sample_threads(now));
        assert_eq!(inbox.send("hello", now), Err("Select a conversation first"));
        inbox.select("t-morgan");
        assert_eq!(inbox.send("   ", now), Err("Message cannot be empty"));
        inbox.send("  See you Thursday ", now).unwrap();
        let thread = inbox.selected().unwrap();
        let last = thread.messages.last().unwrap();
        assert!(last.from_me);
        assert_eq!(last.body, "See you Thursday");
        assert_eq!(last.id, 8);
        assert_eq!(thread.preview(), "See you Thursday");
    }
}
