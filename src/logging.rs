//! Tracing and panic reporting.

use alloc::string::{String, ToString};
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::sync::Once;

use tracing::Metadata;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, writer::MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;

const TRACING_PREFIX: &str = "[signbridge]";

// ============================================================================
// Global State
// ============================================================================

static PANIC_HOOK_INSTALLED: Once = Once::new();
static TRACING_INSTALLED: Once = Once::new();

// ============================================================================
// Installation
// ============================================================================

/// Install a stderr subscriber filtered at `level` (idempotent).
///
/// `RUST_LOG` takes precedence over `level` when it is set.
pub fn install_tracing(level: &str) {
    install_tracing_with(level, io::stderr);
}

/// Install a subscriber writing through `writer` (idempotent).
pub fn install_tracing_with<W>(level: &str, writer: W)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let layer = fmt::layer()
            .with_writer(PrefixedWriter { inner: writer })
            .with_ansi(false)
            .without_time()
            .with_filter(filter);

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            eprintln!("signbridge tracing subscriber failed to initialize");
        }
    });
}

/// Install a panic hook that reports through `tracing` before chaining to
/// the previous hook (idempotent).
pub fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            report_panic(info);
            previous(info);
        }));
    });
}

// ============================================================================
// Panic Reporting
// ============================================================================

fn report_panic(info: &PanicHookInfo<'_>) {
    let message = panic_message(info);
    let location = info
        .location()
        .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
        .unwrap_or_default();

    tracing::error!(
        target: "signbridge::panic",
        message = %message,
        location = %location
    );
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

// ============================================================================
// Output Writer
// ============================================================================

#[derive(Clone)]
struct PrefixedWriter<M> {
    inner: M,
}

impl<'a, M> MakeWriter<'a> for PrefixedWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = PrefixedWriterInner<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        PrefixedWriterInner {
            inner: self.inner.make_writer(),
            wrote_prefix: false,
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        PrefixedWriterInner {
            inner: self.inner.make_writer_for(meta),
            wrote_prefix: false,
        }
    }
}

struct PrefixedWriterInner<W> {
    inner: W,
    wrote_prefix: bool,
}

impl<W: Write> Write for PrefixedWriterInner<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.wrote_prefix {
            self.inner.write_all(TRACING_PREFIX.as_bytes())?;
            self.inner.write_all(b" ")?;
            self.wrote_prefix = true;
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Ok(mut bytes) = self.0.lock() {
                bytes.extend_from_slice(buf);
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prefix_written_once_per_event() {
        let capture = Capture::default();
        let writer = PrefixedWriter {
            inner: {
                let capture = capture.clone();
                move || capture.clone()
            },
        };
        let mut line = writer.make_writer();
        line.write_all(b"router setup complete").expect("write succeeds");
        line.write_all(b"\n").expect("write succeeds");
        let bytes = capture.0.lock().expect("lock").clone();
        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "[signbridge] router setup complete\n"
        );
    }

    #[test]
    fn test_install_is_idempotent() {
        install_tracing("debug");
        install_tracing("trace");
        install_panic_hook();
        install_panic_hook();
        tracing::info!("still logging");
    }
}
