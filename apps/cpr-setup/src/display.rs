//! Output rendering and formatting

use console::{Style, Term};
use cpr_install::{EventSink, InstallEvent, InstallReport};
use cpr_types::ColorChoice;
use std::io;

/// Renders install progress and the final result
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool, color_choice: ColorChoice) -> Self {
        Self {
            json_output,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render the final report; human output was already streamed as events
    pub fn render_report(&self, report: &InstallReport) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
            println!("{json}");
        }
        Ok(())
    }

    /// Render a failure; JSON errors go to stdout so they replace the report
    pub fn render_error(&self, error: &crate::error::CliError) {
        if self.json_output {
            match serde_json::to_string_pretty(&error.to_json()) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("Error: {e}"),
            }
        } else {
            let label = self.style(Style::new().red().bold(), "Error:");
            eprintln!("{label} {error}");
        }
    }

    fn check(&self) -> String {
        self.style(Style::new().green(), "✓")
    }

    fn style(&self, style: Style, text: &str) -> String {
        if self.supports_color() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Check if color output is supported
    fn supports_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    /// Human-readable line for an event, `None` when nothing is printed
    fn format_event(&self, event: &InstallEvent) -> Option<(Stream, String)> {
        let line = match event {
            InstallEvent::Warning { message } => (
                Stream::Err,
                format!("{} {message}", self.style(Style::new().yellow(), "Warning:")),
            ),
            InstallEvent::Started {
                script_name,
                install_dir,
            } => (
                Stream::Out,
                format!("Installing {script_name} to {}...", install_dir.display()),
            ),
            InstallEvent::MadeExecutable { script_name } => (
                Stream::Out,
                format!("{} Made {script_name} executable", self.check()),
            ),
            InstallEvent::PermissionDenied {
                escalating: true,
                program,
                ..
            } => (
                Stream::Err,
                format!("Permission denied. Trying with {program}..."),
            ),
            InstallEvent::PermissionDenied { .. } => return None,
            InstallEvent::WrapperCreated { .. } => (
                Stream::Out,
                format!("{} Created Windows batch wrapper", self.check()),
            ),
            InstallEvent::Completed {
                script_name,
                destination,
                escalated_with,
            } => {
                let suffix = escalated_with
                    .as_deref()
                    .map(|program| format!(" (with {program})"))
                    .unwrap_or_default();
                (
                    Stream::Out,
                    format!(
                        "\n{} Successfully installed {script_name} to {}{suffix}\n\
                         You can now use the '{script_name}' command from anywhere!",
                        self.check(),
                        destination.display()
                    ),
                )
            }
        };
        Some(line)
    }
}

enum Stream {
    Out,
    Err,
}

impl EventSink for OutputRenderer {
    fn emit(&self, event: InstallEvent) {
        if self.json_output {
            return;
        }
        match self.format_event(&event) {
            Some((Stream::Out, line)) => println!("{line}"),
            Some((Stream::Err, line)) => eprintln!("{line}"),
            None => {}
        }
    }
}
