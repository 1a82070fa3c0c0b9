use std::io::Write;

use mockpaper_core::{DownloadLinkView, Severity};
use mockpaper_logging::client_debug;

use super::constants::*;
use super::{ProgressTone, Surface, UiCommand};

/// Draws the submission UI as plain terminal lines.
///
/// Status and download changes print a line each; the progress bar is
/// redrawn in place with a carriage return.
pub struct TerminalSurface<W: Write> {
    out: W,
    status: Option<(String, Severity)>,
    bar: Option<String>,
    bar_open: bool,
    submit_enabled: Option<bool>,
    download: Option<DownloadLinkView>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: None,
            bar: None,
            bar_open: false,
            submit_enabled: None,
            download: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        self.close_bar();
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn close_bar(&mut self) {
        if self.bar_open {
            let _ = writeln!(self.out);
            self.bar_open = false;
        }
    }

    fn set_status(&mut self, text: String, severity: Severity) {
        let next = Some((text, severity));
        if self.status == next {
            return;
        }
        self.status = next;
        if let Some((text, severity)) = self.status.clone() {
            self.line(&format!("[{}] {}", severity_label(severity), text));
        }
    }

    fn set_progress(&mut self, visible: bool, percent: f64, tone: ProgressTone) {
        if !visible {
            self.close_bar();
            self.bar = None;
            return;
        }
        let bar = progress_line(percent, tone);
        if self.bar.as_deref() == Some(bar.as_str()) {
            return;
        }
        let _ = write!(self.out, "\r{bar}");
        let _ = self.out.flush();
        self.bar = Some(bar);
        self.bar_open = true;
    }

    fn set_download(&mut self, link: Option<DownloadLinkView>) {
        if self.download == link {
            return;
        }
        if let Some(link) = &link {
            self.line(&format!(
                "Download ready: {} ({} bytes, {})",
                link.file_name,
                link.byte_len,
                link.href.display()
            ));
        }
        self.download = link;
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn apply(&mut self, commands: Vec<UiCommand>) {
        for command in commands {
            match command {
                UiCommand::UpdateStatus { text, severity } => self.set_status(text, severity),
                UiCommand::ClearStatus => self.status = None,
                UiCommand::SetProgress {
                    visible,
                    percent,
                    tone,
                } => self.set_progress(visible, percent, tone),
                UiCommand::SetSubmitEnabled(enabled) => {
                    if self.submit_enabled != Some(enabled) {
                        client_debug!("Submit {}", if enabled { "enabled" } else { "disabled" });
                        self.submit_enabled = Some(enabled);
                    }
                }
                UiCommand::ReplaceDownloadLink(link) => self.set_download(link),
            }
        }
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => LABEL_INFO,
        Severity::Warning => LABEL_WARNING,
        Severity::Danger => LABEL_DANGER,
        Severity::Success => LABEL_SUCCESS,
    }
}

fn progress_line(percent: f64, tone: ProgressTone) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * PROGRESS_BAR_WIDTH as f64).round() as usize;
    let mut bar = String::with_capacity(PROGRESS_BAR_WIDTH + 16);
    bar.push('[');
    bar.extend(std::iter::repeat(PROGRESS_FILLED).take(filled));
    bar.extend(std::iter::repeat(PROGRESS_EMPTY).take(PROGRESS_BAR_WIDTH - filled));
    bar.push(']');
    bar.push_str(&format!(" {:>3.0}%", percent));
    match tone {
        ProgressTone::Neutral => {}
        ProgressTone::Success => bar.push_str(" done"),
        ProgressTone::Failure => bar.push_str(" failed"),
    }
    bar
}
