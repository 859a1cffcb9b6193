use chrono::{DateTime, Duration, Utc};

use crate::model::{Event, User};

/// Pairs every user with every event starting within `lead_time` of `now`.
///
/// The window has no lower bound: overdue events are always due. Pairs are
/// ordered by event, then by user, both in fetch order.
pub fn due_reminders<'a>(
    events: &'a [Event],
    users: &'a [User],
    lead_time: Duration,
    now: DateTime<Utc>,
) -> Vec<(&'a User, &'a Event)> {
    events
        .iter()
        .filter(|event| event.date - now <= lead_time)
        .flat_map(|event| users.iter().map(move |user| (user, event)))
        .collect()
}
