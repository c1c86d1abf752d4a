// Timestamped and redirected output.
//
// `TimestampWriter` wraps any writer and prefixes each line with the local
// time. `timed_output` and `redirect_output` run a closure against stamped
// stdout or a file, and `open_sink` combines both for the CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};

/// Layout of the per-line prefix.
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type Clock = Box<dyn Fn() -> NaiveDateTime + Send>;

/// Writer that prefixes every line with `[YYYY-MM-DD HH:MM:SS]: `.
pub struct TimestampWriter<W: Write> {
    inner: W,
    clock: Clock,
    at_line_start: bool,
}

impl<W: Write> TimestampWriter<W> {
    /// Stamp with the local wall clock.
    pub fn new(inner: W) -> Self {
        Self::with_clock(inner, || Local::now().naive_local())
    }

    /// Stamp with a custom clock (fixed times in tests).
    pub fn with_clock(inner: W, clock: impl Fn() -> NaiveDateTime + Send + 'static) -> Self {
        Self {
            inner,
            clock: Box::new(clock),
            at_line_start: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for TimestampWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for line in buf.split_inclusive(|&b| b == b'\n') {
            if self.at_line_start {
                let stamp = (self.clock)().format(STAMP_FORMAT);
                write!(self.inner, "[{stamp}]: ")?;
            }
            self.inner.write_all(line)?;
            self.at_line_start = line.ends_with(b"\n");
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Run `f` with stdout stamped line by line.
pub fn timed_output<T, F>(f: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let stdout = io::stdout();
    timed_output_to(stdout.lock(), f)
}

/// Run `f` with `sink` stamped line by line, flushing it afterwards.
pub fn timed_output_to<W, T, F>(sink: W, f: F) -> Result<T>
where
    W: Write,
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let mut writer = TimestampWriter::new(sink);
    let value = f(&mut writer)?;
    writer.flush().context("Failed to flush timestamped output")?;
    Ok(value)
}

/// Run `f` with its output going to `path` instead of stdout.
/// The file is created (or truncated) first.
pub fn redirect_output<T, F>(path: &Path, f: F) -> Result<T>
where
    F: FnOnce(&mut dyn Write) -> Result<T>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let value = f(&mut writer)?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(value)
}

/// Build the CLI's output sink: stdout or a file, optionally stamped.
pub fn open_sink(timestamps: bool, file: Option<&Path>) -> Result<Box<dyn Write>> {
    let base: Box<dyn Write> = match file {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout()),
    };

    Ok(if timestamps {
        Box::new(TimestampWriter::new(base))
    } else {
        base
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, 30)
            .and_then(|d| d.and_hms_opt(12, 5, 9))
            .unwrap()
    }

    #[test]
    fn stamps_each_line() {
        let mut writer = TimestampWriter::with_clock(Vec::new(), fixed);
        writeln!(writer, "first").unwrap();
        write!(writer, "second\nthi").unwrap();
        writeln!(writer, "rd").unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(
            out,
            "[2023-10-30 12:05:09]: first\n\
             [2023-10-30 12:05:09]: second\n\
             [2023-10-30 12:05:09]: third\n"
        );
    }

    fn assert_stamped(line: &str, body: &str) {
        let (stamp, rest) = line
            .strip_prefix('[')
            .and_then(|l| l.split_once("]: "))
            .unwrap_or_else(|| panic!("line is not stamped: {line:?}"));
        assert!(NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).is_ok(), "{stamp}");
        assert_eq!(rest, body);
    }

    #[test]
    fn timed_output_to_stamps_sink() {
        let mut buf = Vec::new();
        let n = timed_output_to(&mut buf, |w| {
            writeln!(w, "one")?;
            writeln!(w, "two")?;
            Ok(2)
        })
        .unwrap();
        assert_eq!(n, 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_stamped(lines[0], "one");
        assert_stamped(lines[1], "two");
    }

    #[test]
    fn timed_output_returns_closure_value() {
        let value = timed_output(|w| {
            writeln!(w, "stamped on stdout")?;
            Ok("done")
        })
        .unwrap();
        assert_eq!(value, "done");
    }

    #[test]
    fn timed_output_propagates_errors() {
        let result: Result<()> = timed_output_to(Vec::new(), |_| anyhow::bail!("boom"));
        assert!(result.unwrap_err().to_string().contains("boom"));
    }

    #[test]
    fn stamped_sink_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stamped.txt");
        {
            let mut sink = open_sink(true, Some(&path)).unwrap();
            writeln!(sink, "first").unwrap();
            write!(sink, "sec").unwrap();
            writeln!(sink, "ond").unwrap();
            sink.flush().unwrap();
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_stamped(lines[0], "first");
        assert_stamped(lines[1], "second");
    }

    #[test]
    fn plain_sink_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.txt");
        {
            let mut sink = open_sink(false, Some(&path)).unwrap();
            writeln!(sink, "as is").unwrap();
            sink.flush().unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "as is\n");
    }

    #[test]
    fn redirect_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let n = redirect_output(&path, |w| {
            writeln!(w, "hello")?;
            Ok(42)
        })
        .unwrap();
        assert_eq!(n, 42);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }
}
