//! Tracing subscriber setup: console formatter and initialisation.
use std::fmt::Write as _;

/// Target used for `==>` stage headers.
pub const STAGE_TARGET: &str = "inifmt::stage";

/// Extracts the `message` field and any structured fields from a
/// [`tracing::Event`].
#[derive(Debug, Default)]
pub(super) struct MessageExtractor {
    pub(super) message: String,
    pub(super) fields: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits inifmt-style
/// console output.
#[derive(Debug)]
pub(super) struct InifmtFormatter {
    pub(super) ansi: bool,
}

impl InifmtFormatter {
    fn paint(&self, code: &str, text: &str) -> String {
        if self.ansi {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for InifmtFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;
        let fields = &extractor.fields;

        match level {
            tracing::Level::ERROR => writeln!(writer, "{} {msg}", self.paint("31", "ERROR")),
            tracing::Level::WARN => writeln!(writer, "{}  {msg}", self.paint("33", "WARN")),
            tracing::Level::INFO if metadata.target() == STAGE_TARGET => {
                writeln!(writer, "{} {}", self.paint("1;34", "==>"), self.paint("1", msg))
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  {}", self.paint("2", &format!("{msg}{fields}"))),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Every event goes to stderr so that stdout carries only command output.
/// `verbose` lowers the console filter from `INFO` to `DEBUG`; `RUST_LOG`
/// overrides both.  Must be called once at program startup.
pub fn init_subscriber(verbose: bool) {
    use std::io::IsTerminal as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(console_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(InifmtFormatter {
            ansi: std::io::stderr().is_terminal(),
        })
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
