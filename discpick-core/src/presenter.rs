use discpick_model::PendingSelectionRequest;

/// How the remaining decision time should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Calm,
    Urgent,
}

impl Urgency {
    /// Urgent once `remaining` drops to `threshold` seconds or below.
    pub fn for_remaining(remaining: u32, threshold: u32) -> Self {
        if remaining <= threshold {
            Urgency::Urgent
        } else {
            Urgency::Calm
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, Urgency::Urgent)
    }
}

/// The surface that shows a pending selection to a human.
///
/// All calls come from the coordinator task, one at a time.
pub trait Presenter: Send {
    /// Draws the candidate set with `highlighted` selected.
    fn render(&mut self, request: &PendingSelectionRequest, highlighted: usize);

    fn highlight(&mut self, index: usize);

    fn countdown(&mut self, remaining: u32, urgency: Urgency);

    /// A dismissible error; the surface may or may not still be open.
    fn show_error(&mut self, message: &str);

    /// Short confirmation shown after the backend accepted a decision.
    fn notify(&mut self, message: &str);

    /// Hides the surface.
    fn close(&mut self);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn render(&mut self, request: &PendingSelectionRequest, highlighted: usize) {
        (**self).render(request, highlighted)
    }

    fn highlight(&mut self, index: usize) {
        (**self).highlight(index)
    }

    fn countdown(&mut self, remaining: u32, urgency: Urgency) {
        (**self).countdown(remaining, urgency)
    }

    fn show_error(&mut self, message: &str) {
        (**self).show_error(message)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }

    fn close(&mut self) {
        (**self).close()
    }
}
