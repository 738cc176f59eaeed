pub mod mailer;

pub use mailer::{LogMailer, ResetMailer};
