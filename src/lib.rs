pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod notify;
pub mod reconcile;
pub mod reminder;
pub mod server;
pub mod source;

pub use cache::TimedCache;
pub use config::Config;
pub use error::{ConfigError, CycleError, FetchError, NotifyError};
pub use model::{Event, User};
pub use notify::{Notifier, StdoutNotifier};
pub use reconcile::{CycleReport, Reconciler};
pub use reminder::due_reminders;
pub use source::Source;
