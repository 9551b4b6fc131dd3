//! Process-wide interrupt flag set from SIGINT/SIGTERM.
//!
//! Handlers are installed without `SA_RESTART`, so a blocking read returns
//! `ErrorKind::Interrupted` and the line source can check [`interrupted`]
//! instead of silently retrying.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether an interrupt has been received since startup.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

#[cfg(unix)]
extern "C" fn on_signal(_signum: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Install handlers for SIGINT and SIGTERM.
///
/// # Errors
///
/// Returns an error if `sigaction` fails for either signal.
#[cfg(unix)]
pub fn install() -> anyhow::Result<()> {
    use anyhow::Context;

    let handler = on_signal as extern "C" fn(libc::c_int);
    for signum in [libc::SIGINT, libc::SIGTERM] {
        // SAFETY: `action` is fully initialised before use and the handler only
        // performs an atomic store, which is async-signal-safe.
        let rc = unsafe {
            let mut action: libc::sigaction = std::mem::zeroed();
            action.sa_sigaction = handler as libc::sighandler_t;
            action.sa_flags = 0;
            libc::sigemptyset(&raw mut action.sa_mask);
            libc::sigaction(signum, &raw const action, std::ptr::null_mut())
        };
        if rc != 0 {
            return Err(std::io::Error::last_os_error())
                .with_context(|| format!("failed to install handler for signal {signum}"));
        }
    }
    Ok(())
}

/// No-op outside Unix: the default Ctrl-C behaviour terminates the process.
///
/// # Errors
///
/// Never fails.
#[cfg(not(unix))]
pub fn install() -> anyhow::Result<()> {
    Ok(())
}
