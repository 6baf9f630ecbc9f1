//! Terminal output and the notifier/navigator adapters built on it.

use registration::{Navigator, Notifier};
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::info;

/// Shared line-oriented output.
#[derive(Clone)]
pub struct Terminal {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Terminal {
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(std::io::stdout()))
    }

    pub fn from_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            out: Arc::new(Mutex::new(writer)),
        }
    }

    /// Terminal writing into an in-memory buffer.
    pub fn capture() -> (Self, CapturedOutput) {
        let captured = CapturedOutput::default();
        (Self::from_writer(Box::new(captured.clone())), captured)
    }

    /// Print a full line.
    pub fn line(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }

    /// Print a prompt without a trailing newline.
    pub fn prompt(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = write!(out, "{}: ", text);
        let _ = out.flush();
    }
}

/// In-memory sink for terminal output.
#[derive(Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Prints notifications as tagged lines.
pub struct TerminalNotifier {
    terminal: Terminal,
}

impl TerminalNotifier {
    pub fn new(terminal: Terminal) -> Self {
        Self { terminal }
    }
}

impl Notifier for TerminalNotifier {
    fn success(&self, message: &str) {
        self.terminal.line(&format!("[ok] {}", message));
    }

    fn error(&self, message: &str) {
        self.terminal.line(&format!("[error] {}", message));
    }
}

/// Navigator that publishes the current route on a watch channel.
pub struct RouteNavigator {
    terminal: Terminal,
    route: watch::Sender<Option<String>>,
}

impl RouteNavigator {
    /// Create the navigator and a receiver observing route changes.
    pub fn new(terminal: Terminal) -> (Self, watch::Receiver<Option<String>>) {
        let (route, receiver) = watch::channel(None);
        (Self { terminal, route }, receiver)
    }
}

impl Navigator for RouteNavigator {
    fn go_to(&self, path: &str) {
        info!(path, "Navigating");
        self.terminal.line(&format!("-> {}", path));
        self.route.send_replace(Some(path.to_string()));
    }
}
