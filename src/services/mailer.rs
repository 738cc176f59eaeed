/// Delivery seam for password reset notices. The production deployment
/// plugs in an SMTP implementation; tests and local runs use [`LogMailer`].
pub trait ResetMailer {
    fn send_reset(&self, email: &str, reset_link: &str);
}

pub struct LogMailer;

impl ResetMailer for LogMailer {
    fn send_reset(&self, email: &str, reset_link: &str) {
        info!("password reset requested for {}: {}", email, reset_link);
    }
}
