use std::io::{self, Write};

use crate::error::NotifyError;
use crate::model::{Event, User};

/// Delivers a single reminder. Called once per due pair, in order.
pub trait Notifier: Send + Sync {
    fn notify(&self, user: &User, event: &Event) -> Result<(), NotifyError>;
}

/// Writes one line per reminder to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, user: &User, event: &Event) -> Result<(), NotifyError> {
        write_reminder(&mut io::stdout().lock(), user, event)?;
        Ok(())
    }
}

fn write_reminder<W: Write>(out: &mut W, user: &User, event: &Event) -> io::Result<()> {
    writeln!(
        out,
        "Reminder sent to user: {} for event: {}",
        user.email, event.title
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_reminder_line() {
        let user = User {
            id: 1,
            email: "a@x.com".into(),
        };
        let event = Event {
            id: 1,
            title: "Launch".into(),
            description: String::new(),
            date: Utc::now(),
        };

        let mut out = Vec::new();
        write_reminder(&mut out, &user, &event).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Reminder sent to user: a@x.com for event: Launch\n"
        );
    }
}
