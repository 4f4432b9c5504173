//! Lab contact links.
//!
//! A lab's contact value is turned into a messaging link and handed to the first platform
//! launcher that accepts it. Every failure is swallowed and the next launcher tried; the
//! plain browser open runs last.

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Keep only the ASCII digits of a phone-like string
pub fn digits_only(contact: &str) -> String {
    contact.chars().filter(char::is_ascii_digit).collect()
}

/// Messaging link for a contact value, or `None` when it has no digits
pub fn whatsapp_url(contact: &str) -> Option<String> {
    let digits = digits_only(contact);
    if digits.is_empty() {
        None
    } else {
        Some(format!("{WHATSAPP_BASE}{digits}"))
    }
}

/// One way of opening an external URL
pub trait UrlOpener: Send + Sync {
    fn name(&self) -> &str;

    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs by running a launcher program with the URL as its last argument
#[derive(Debug, Clone)]
pub struct CommandOpener {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandOpener {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        let program = program.into();
        let name = std::iter::once(program.as_str())
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            name,
            program,
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// The user's `$BROWSER`, if set
    pub fn from_browser_env() -> Option<Self> {
        std::env::var("BROWSER")
            .ok()
            .filter(|browser| !browser.trim().is_empty())
            .map(|browser| Self::new(browser, &[]))
    }
}

impl UrlOpener for CommandOpener {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self, url: &str) -> io::Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} exited with {status}", self.name),
            ))
        }
    }
}

/// Launchers available on this platform, in the order they are tried
pub fn platform_openers() -> Vec<Box<dyn UrlOpener>> {
    let mut openers: Vec<Box<dyn UrlOpener>> = Vec::new();

    #[cfg(target_os = "linux")]
    {
        openers.push(Box::new(CommandOpener::new("xdg-open", &[])));
        openers.push(Box::new(CommandOpener::new("gio", &["open"])));
    }
    #[cfg(target_os = "macos")]
    {
        openers.push(Box::new(CommandOpener::new("open", &[])));
    }
    #[cfg(target_os = "windows")]
    {
        openers.push(Box::new(CommandOpener::new("cmd", &["/C", "start", ""])));
    }

    openers
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Opened { method: String },
    Failed { url: String },
}

impl OpenOutcome {
    /// Status line text for this outcome
    pub fn status_message(&self) -> String {
        match self {
            OpenOutcome::Opened { method } => format!("تم فتح الرابط ({method})"),
            OpenOutcome::Failed { url } => format!("تعذر فتح الرابط، افتحه يدوياً: {url}"),
        }
    }
}

/// Tries each opener in order, then the fallback
pub struct LinkLauncher {
    openers: Vec<Box<dyn UrlOpener>>,
    fallback: Option<Box<dyn UrlOpener>>,
}

impl LinkLauncher {
    pub fn new(openers: Vec<Box<dyn UrlOpener>>, fallback: Option<Box<dyn UrlOpener>>) -> Self {
        Self { openers, fallback }
    }

    /// Platform launchers with `$BROWSER` as the fallback
    pub fn system() -> Self {
        let fallback = CommandOpener::from_browser_env()
            .map(|opener| Box::new(opener) as Box<dyn UrlOpener>);
        Self::new(platform_openers(), fallback)
    }

    pub fn open(&self, url: &str) -> OpenOutcome {
        for opener in self.openers.iter().chain(self.fallback.iter()) {
            match opener.open(url) {
                Ok(()) => {
                    log::debug!("opened {url} with {}", opener.name());
                    return OpenOutcome::Opened {
                        method: opener.name().to_string(),
                    };
                }
                Err(err) => {
                    log::debug!("{} could not open {url}: {err}", opener.name());
                }
            }
        }

        log::warn!("no launcher could open {url}");
        OpenOutcome::Failed {
            url: url.to_string(),
        }
    }
}

/// Open `url` off the render loop and report the outcome on `tx`
pub fn spawn_open(
    launcher: Arc<LinkLauncher>,
    url: String,
    tx: UnboundedSender<OpenOutcome>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let outcome = launcher.open(&url);
        let _ = tx.send(outcome);
    })
}
