/// A transient UI message with an absolute expiry time.
///
/// Deadlines are compared against egui's input clock at read time, so a
/// newer `show` always supersedes an older one; there is no detached timer
/// left around to clear the wrong message.
#[derive(Default)]
pub struct Notice {
    message: Option<(String, f64)>,
}

impl Notice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, text: impl Into<String>, now: f64, duration_secs: f64) {
        self.message = Some((text.into(), now + duration_secs));
    }

    /// The message, if it has not expired yet. Expired messages are cleared.
    pub fn current(&mut self, now: f64) -> Option<&str> {
        if let Some((_, expires_at)) = self.message {
            if now >= expires_at {
                self.message = None;
            }
        }
        self.message.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn is_visible(&self, now: f64) -> bool {
        matches!(self.message, Some((_, expires_at)) if now < expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_notice_clears_after_its_duration() {
        let mut notice = Notice::new();
        notice.show("Color copied!", 10.0, 2.0);

        assert_eq!(notice.current(10.0), Some("Color copied!"));
        assert_eq!(notice.current(11.9), Some("Color copied!"));
        assert_eq!(notice.current(12.0), None);
        assert_eq!(notice.current(12.1), None);
    }

    #[test]
    fn independent_notices_expire_independently() {
        let mut overlay = Notice::new();
        let mut page = Notice::new();
        overlay.show("Color copied!", 0.0, 2.0);
        page.show("Color copied to clipboard!", 0.0, 3.0);

        assert!(overlay.is_visible(1.9));
        assert!(page.is_visible(1.9));
        assert!(!overlay.is_visible(2.5));
        assert!(page.is_visible(2.5));
        assert!(!page.is_visible(3.5));
    }

    #[test]
    fn a_newer_message_extends_the_deadline() {
        let mut notice = Notice::new();
        notice.show("first", 0.0, 2.0);
        notice.show("second", 1.5, 2.0);

        // The first message's expiry has passed, but it cannot clear the
        // newer one.
        assert_eq!(notice.current(2.5), Some("second"));
        assert_eq!(notice.current(3.5), None);
    }

    #[test]
    fn an_empty_notice_shows_nothing() {
        let mut notice = Notice::new();
        assert_eq!(notice.current(0.0), None);
        assert!(!notice.is_visible(0.0));
    }
}
