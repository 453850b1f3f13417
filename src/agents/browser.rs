use crate::error::{AdvisorError, Result};
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;
use url::Url;

/// Opens links outside the tool.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &Url) -> Result<()>;
}

/// Hands URLs to the platform's default browser.
pub struct SystemBrowser;

impl SystemBrowser {
    fn command(url: &Url) -> Command {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("open");
            command.arg(url.as_str());
            command
        } else if cfg!(target_os = "windows") {
            // No shell in between, so `&` in a query string stays part of the URL.
            let mut command = Command::new("rundll32");
            command.args(["url.dll,FileProtocolHandler", url.as_str()]);
            command
        } else {
            let mut command = Command::new("xdg-open");
            command.arg(url.as_str());
            command
        }
    }
}

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &Url) -> Result<()> {
        match url.scheme() {
            "https" | "http" => {}
            scheme => {
                return Err(AdvisorError::ProjectValidation(format!(
                    "Refusing to open '{scheme}' link"
                )));
            }
        }

        debug!("Opening {}", url);
        let mut child = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(AdvisorError::Io)?;

        // Some openers only return once the browser exits; reap off the prompt thread.
        thread::spawn(move || match child.wait() {
            Ok(status) if !status.success() => debug!("Link opener exited with {}", status),
            Ok(_) => {}
            Err(e) => debug!("Failed to wait for link opener: {}", e),
        });
        Ok(())
    }
}
