//! Terminal output for notifications and errors.

use colored::Colorize;
use taskdeck_core::notification::{Notification, NotificationKind};
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Prints every queued notification and returns how many were errors.
pub fn drain(events: &mut broadcast::Receiver<Notification>) -> usize {
    let mut errors = 0;
    loop {
        match events.try_recv() {
            Ok(notification) => {
                if notification.is_error() {
                    errors += 1;
                }
                print_notification(&notification);
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::debug!(target: "taskdeck::notify", "Skipped {} notifications", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    errors
}

fn print_notification(notification: &Notification) {
    match notification.kind {
        NotificationKind::Error => eprintln!("{} {}", "✗".red().bold(), notification.message.red()),
        NotificationKind::Success => println!("{} {}", "✓".green().bold(), notification.message.green()),
    }
}

pub fn error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "error:".red().bold(), err);
}
