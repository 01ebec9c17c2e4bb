// SPDX-FileCopyrightText: 2026 macaddresslookup contributors
//
// SPDX-License-Identifier: GPL-3.0-only

use std::{fmt::Write as _, fs::OpenOptions, io, path::Path, sync::Arc};

use time::macros::format_description;
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::Writer,
        time::{FormatTime, UtcTime},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

const VERBOSE_FILTER: &str = "warn,macaddresslookup=debug,macaddresslookup_client=debug";

/// WARN unless `verbose`. `RUST_LOG` is honored when not verbose.
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

fn timer() -> impl FormatTime {
    UtcTime::new(format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
    ))
}

/// `LEVEL <timestamp> message`, one event per line.
struct LevelFirst<T> {
    timer: T,
}

impl<S, N, T> FormatEvent<S, N> for LevelFirst<T>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
    T: FormatTime,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        write!(writer, "{} ", event.metadata().level())?;
        self.timer.format_time(&mut writer)?;
        writer.write_char(' ')?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .event_format(LevelFirst { timer: timer() })
}

/// Log to stderr and append to `log_file`. Falls back to stderr alone if the
/// file can't be opened.
pub fn init(verbose: bool, log_file: &Path) {
    let (file_layer, file_err) = match OpenOptions::new().create(true).append(true).open(log_file)
    {
        Ok(file) => (Some(layer(Arc::new(file))), None),
        Err(err) => (None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(layer(io::stderr))
        .with(file_layer)
        .init();

    if let Some(err) = file_err {
        tracing::warn!("Failed to open log file `{}`: {}", log_file.display(), err);
    }
}
