//! Log sanitization for patient inputs.
//!
//! Feature values typed into the assessment forms are health data. Call sites
//! never log them, and this writer redacts anything that slips through:
//! - `feature_key=value` / `feature_key: value` pairs for every known feature
//! - e-mail addresses
//! - UUIDs
//!
//! Input is capped at `MAX_SANITIZE_BYTES` per line.

use std::sync::OnceLock;

use regex::Regex;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::DiagnosticDomain;

const MAX_SANITIZE_BYTES: usize = 16 * 1024;

struct Patterns {
    feature_value: Regex,
    others: Vec<(Regex, &'static str)>,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| {
        let mut keys: Vec<&str> = DiagnosticDomain::ALL
            .iter()
            .flat_map(|d| d.feature_keys().iter().copied())
            .collect();
        keys.sort_unstable();
        keys.dedup();

        // Keys are plain snake_case identifiers, no escaping needed.
        let feature_value = Regex::new(&format!(
            r#"\b({})\b(\s*[:=]\s*)"?[^\s,;}}"]+"?"#,
            keys.join("|")
        ))
        .expect("valid feature pattern");

        let others = vec![
            (
                Regex::new(r"(?i)\b[a-z0-9._%+-]{1,64}@(?:[a-z0-9-]{1,63}\.)+[a-z]{2,}\b")
                    .expect("valid email pattern"),
                "[REDACTED-EMAIL]",
            ),
            (
                Regex::new(
                    r"[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}",
                )
                .expect("valid uuid pattern"),
                "[REDACTED-UUID]",
            ),
        ];

        Patterns {
            feature_value,
            others,
        }
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Redact patient values and identifiers from a string.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, MAX_SANITIZE_BYTES);
    let p = patterns();

    let mut out = p
        .feature_value
        .replace_all(prefix, "$1$2[REDACTED]")
        .into_owned();
    for (regex, replacement) in &p.others {
        if regex.is_match(&out) {
            out = regex.replace_all(&out, *replacement).into_owned();
        }
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// `MakeWriter` wrapper that sanitizes each formatted log line.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        if self.buffer.len() > MAX_SANITIZE_BYTES * 2 {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }
        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redacts_feature_values() {
        let out = sanitize("encoding glucose=130 bmi: 28.5 age=\"45\"");
        assert_eq!(
            out,
            "encoding glucose=[REDACTED] bmi: [REDACTED] age=[REDACTED]"
        );
    }

    #[test]
    fn test_leaves_plain_text_alone() {
        let line = "Loaded scaler for domain=heart (standard_scaler)";
        assert_eq!(sanitize(line), line);
    }

    #[test]
    fn test_redacts_identifiers() {
        let out = sanitize("patient 550e8400-e29b-41d4-a716-446655440000 mail jane@clinic.org");
        assert!(out.contains("[REDACTED-UUID]"));
        assert!(out.contains("[REDACTED-EMAIL]"));
        assert!(!out.contains("jane@"));
    }

    #[test]
    fn test_truncates_long_input() {
        let long = "x".repeat(MAX_SANITIZE_BYTES + 10);
        assert!(sanitize(&long).ends_with("[TRUNCATED]"));
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter {
                inner: &mut sink,
                buffer: Vec::new(),
            };
            writer.write_all(b"insulin=80\nok").unwrap();
            writer.flush().unwrap();
        }
        assert_eq!(String::from_utf8(sink).unwrap(), "insulin=[REDACTED]\nok");
    }
}
