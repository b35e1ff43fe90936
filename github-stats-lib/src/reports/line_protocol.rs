use crate::Result;
use crate::metrics::MetricRecord;
use chrono::{DateTime, Utc};
use core::fmt::Write;
use std::borrow::Cow;

/// Write one InfluxDB line protocol line per record.
pub fn generate<W: Write>(records: &[MetricRecord], timestamp: DateTime<Utc>, writer: &mut W) -> Result<()> {
    // nanosecond timestamps overflow i64 after 2262; fall back to seconds scaled up
    let nanos = timestamp
        .timestamp_nanos_opt()
        .unwrap_or_else(|| timestamp.timestamp().saturating_mul(1_000_000_000));

    for record in records {
        write!(writer, "{}", escape(record.name()))?;

        for (key, value) in record.tags() {
            write!(writer, ",{}={}", escape(key), escape(value))?;
        }

        for (i, (key, value)) in record.fields().iter().enumerate() {
            let separator = if i == 0 { ' ' } else { ',' };
            write!(writer, "{separator}{}={value}i", escape(key))?;
        }

        writeln!(writer, " {nanos}")?;
    }

    Ok(())
}

/// Escape commas, equals signs, and spaces in names, tag keys, and tag values.
fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains([',', '=', ' ']) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if matches!(c, ',' | '=' | ' ') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Cow::Owned(escaped)
}
