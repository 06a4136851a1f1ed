//! Opening the viewer in the user's browser
//!
//! Uses the platform's URL opener: `start` on Windows (through `cmd`), `open`
//! on macOS and `xdg-open` elsewhere. A failed launch is logged and otherwise
//! ignored; the server keeps running.

use crate::config::Platform;
use tokio::process::Command;

/// Program and arguments that open `url` on `platform`
///
/// Returns `None` for platforms without a known opener.
#[must_use]
pub fn launch_command(platform: Platform, url: &str) -> Option<(&'static str, Vec<String>)> {
    match platform {
        // `start` is a cmd builtin; the empty string is the window title
        Platform::Windows => Some((
            "cmd",
            vec!["/C".into(), "start".into(), String::new(), url.into()],
        )),
        Platform::Macos => Some(("open", vec![url.into()])),
        Platform::Linux => Some(("xdg-open", vec![url.into()])),
        Platform::Other => None,
    }
}

/// Open `url` in the default browser without waiting for it
///
/// Must be called from within a tokio runtime.
pub fn open(platform: Platform, url: &str) {
    let Some((program, args)) = launch_command(platform, url) else {
        tracing::warn!(?platform, %url, "don't know how to open a browser on this platform");
        return;
    };

    let url = url.to_string();
    tokio::spawn(async move {
        match Command::new(program).args(&args).status().await {
            Ok(status) if status.success() => {
                tracing::debug!(program, %url, "browser opened");
            }
            Ok(status) => {
                tracing::warn!(program, %url, %status, "browser launcher exited with failure");
            }
            Err(e) => {
                tracing::warn!(program, %url, error = %e, "failed to launch browser");
            }
        }
    });
}
