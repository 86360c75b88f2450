use std::io::Write;

use discpick_core::{Presenter, Urgency};
use discpick_model::{Candidate, PendingSelectionRequest};
use tracing::warn;

const SYNOPSIS_LIMIT: usize = 150;
const CALM_COUNTDOWN_STEP: u32 = 10;

/// Plain-text [`Presenter`] for an interactive terminal.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    open: bool,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, open: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

fn candidate_lines(position: usize, candidate: &Candidate, highlighted: bool) -> Vec<String> {
    let marker = if highlighted { '>' } else { ' ' };
    let mut heading = format!("{marker} [{}] {}", position + 1, candidate.label());
    if let Some(rating) = candidate.rating() {
        heading.push_str(&format!("  rated {rating:.1}"));
    }

    let mut lines = vec![heading];
    if !candidate.synopsis().is_empty() {
        lines.push(format!("      {}", truncate(candidate.synopsis(), SYNOPSIS_LIMIT)));
    }
    if !candidate.poster().is_placeholder() {
        lines.push(format!("      poster: {}", candidate.poster().as_str()));
    }
    lines
}

impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn render(&mut self, request: &PendingSelectionRequest, highlighted: usize) {
        self.open = true;
        self.emit(&format!(
            "\nMultiple {} found for disc {} ({}). Choose the correct title:",
            request.media_kind().plural_noun(),
            request.disc_id(),
            request.disc_kind()
        ));
        for (position, candidate) in request.candidates().iter().enumerate() {
            for line in candidate_lines(position, candidate, position == highlighted) {
                self.emit(&line);
            }
        }
        self.emit("Type a number to highlight, c to confirm, s to skip, r to retry, q to quit.");
    }

    fn highlight(&mut self, index: usize) {
        self.emit(&format!("Highlighted [{}]; press c to confirm.", index + 1));
    }

    fn countdown(&mut self, remaining: u32, urgency: Urgency) {
        if !self.open {
            return;
        }
        match urgency {
            Urgency::Urgent => self.emit(&format!("Auto-skip in {remaining}s!")),
            Urgency::Calm if remaining % CALM_COUNTDOWN_STEP == 0 => {
                self.emit(&format!("Auto-skip in {remaining}s"))
            }
            Urgency::Calm => {}
        }
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&format!("error: {message}"));
        if self.open {
            self.emit("Press r to retry.");
        }
    }

    fn notify(&mut self, message: &str) {
        self.emit(message);
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.emit("Selection closed.");
        }
    }
}
