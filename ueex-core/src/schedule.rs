//! ENTSO-E Schedule_MarketDocument generator.
//!
//! Renders a [`ScheduleDocument`] as an IEC 62325-451-7 schedule document:
//! a fixed header followed by one `TimeSeries` per entry, each carrying 24
//! hourly `Point`s over the delivery day in UTC.
//!
//! Output is deterministic for a given document and creation instant.
//! Identifier text is escaped, so caller-supplied ids containing markup
//! characters still yield well-formed XML.

use std::borrow::Cow;

use chrono::{DateTime, Duration, NaiveTime, SecondsFormat, Utc};

use crate::errors::{Result, ScheduleError};
use crate::models::schedule::{ScheduleDocument, TimeSeriesEntry, HOURS_PER_DAY};

pub const SCHEDULE_NAMESPACE: &str = "urn:iec62325.351:tc57wg16:451-7:scheduledocument:7:0";
pub const XML_MIME_TYPE: &str = "application/xml";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const ROOT_ELEMENT: &str = "Schedule_MarketDocument";
/// EIC coding scheme attribute value.
const CODING_SCHEME_EIC: &str = "A01";
const DOCUMENT_TYPE: &str = "A01";
const BUSINESS_TYPE: &str = "A01";
/// Active energy.
const PRODUCT: &str = "8716867000016";
const OBJECT_AGGREGATION: &str = "A01";
/// Megawatt.
const MEASUREMENT_UNIT: &str = "MAW";
/// Sequential fixed-size blocks.
const CURVE_TYPE: &str = "A01";
const RESOLUTION: &str = "PT60M";

// ============================================================================
// Escaping / formatting helpers
// ============================================================================

/// Escape `&`, `<`, `>`, `"` and `'` for text and attribute positions.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// `2025-06-01T00:00:00Z`: UTC, whole seconds.
fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Shortest round-trip decimal; negative zero prints as `0`.
fn format_quantity(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

// ============================================================================
// XmlWriter
// ============================================================================

/// Minimal indented XML writer for a single document.
struct XmlWriter {
    buf: String,
    depth: usize,
}

impl XmlWriter {
    fn new() -> Self {
        let mut buf = String::with_capacity(8 * 1024);
        buf.push_str(XML_DECLARATION);
        buf.push('\n');
        Self { buf, depth: 0 }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
    }

    fn start_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.buf.push('<');
        self.buf.push_str(name);
        for (key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape_xml(value));
            self.buf.push('"');
        }
        self.buf.push('>');
    }

    fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.indent();
        self.start_tag(name, attrs);
        self.buf.push('\n');
        self.depth += 1;
        self
    }

    fn close(&mut self, name: &str) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
        self
    }

    fn leaf_with(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> &mut Self {
        self.indent();
        self.start_tag(name, attrs);
        self.buf.push_str(&escape_xml(text));
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
        self
    }

    fn leaf(&mut self, name: &str, text: &str) -> &mut Self {
        self.leaf_with(name, &[], text)
    }

    /// Element carrying an EIC code with its `codingScheme` attribute.
    fn eic(&mut self, name: &str, code: &str) -> &mut Self {
        self.leaf_with(name, &[("codingScheme", CODING_SCHEME_EIC)], code)
    }

    fn interval(&mut self, name: &str, interval: &DeliveryInterval) -> &mut Self {
        self.open(name, &[])
            .leaf("start", &interval.start)
            .leaf("end", &interval.end)
            .close(name)
    }

    fn finish(self) -> String {
        self.buf
    }
}

// ============================================================================
// Document building
// ============================================================================

/// The 24-hour UTC window of the delivery day, pre-formatted.
struct DeliveryInterval {
    start: String,
    end: String,
}

impl DeliveryInterval {
    fn for_document(doc: &ScheduleDocument) -> Result<Self> {
        let start = doc.delivery_date.and_time(NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| ScheduleError::DeliveryDate(doc.delivery_date.to_string()))?;
        Ok(Self {
            start: format_instant(start),
            end: format_instant(end),
        })
    }
}

/// Check the structural invariants the builder relies on.
pub fn validate(doc: &ScheduleDocument) -> Result<()> {
    if doc.time_series_list.is_empty() {
        return Err(ScheduleError::EmptyTimeSeries);
    }
    for (index, entry) in doc.time_series_list.iter().enumerate() {
        if entry.hourly_values.len() != HOURS_PER_DAY {
            return Err(ScheduleError::HourlyValueCount {
                position: index + 1,
                expected: HOURS_PER_DAY,
                actual: entry.hourly_values.len(),
            });
        }
    }
    Ok(())
}

/// Build the document stamped with the current instant.
pub fn build_schedule_xml(doc: &ScheduleDocument) -> Result<String> {
    build_schedule_xml_at(doc, Utc::now())
}

/// Build the document with an explicit `createdDateTime`.
///
/// Identical inputs produce byte-identical output.
pub fn build_schedule_xml_at(doc: &ScheduleDocument, created_at: DateTime<Utc>) -> Result<String> {
    validate(doc)?;
    let interval = DeliveryInterval::for_document(doc)?;
    let revision = doc.revision_number.to_string();
    let created = format_instant(created_at);

    let mut w = XmlWriter::new();
    w.open(ROOT_ELEMENT, &[("xmlns", SCHEDULE_NAMESPACE)])
        .leaf("mRID", &doc.document_id)
        .leaf("revisionNumber", &revision)
        .leaf("type", DOCUMENT_TYPE)
        .leaf("process.processType", doc.process_type.code())
        .eic("sender_MarketParticipant.mRID", &doc.sender.eic)
        .leaf("sender_MarketParticipant.marketRole.type", doc.sender.role_code.code())
        .eic("receiver_MarketParticipant.mRID", &doc.receiver.eic)
        .leaf("receiver_MarketParticipant.marketRole.type", doc.receiver.role_code.code())
        .leaf("createdDateTime", &created)
        .interval("schedule_Time_Period.timeInterval", &interval);

    for (index, entry) in doc.time_series_list.iter().enumerate() {
        write_time_series(&mut w, doc, index + 1, entry, &interval);
    }

    w.close(ROOT_ELEMENT);

    let xml = w.finish();
    tracing::debug!(
        document_id = %doc.document_id,
        series = doc.time_series_list.len(),
        bytes = xml.len(),
        "schedule document built"
    );
    Ok(xml)
}

fn write_time_series(
    w: &mut XmlWriter,
    doc: &ScheduleDocument,
    series_id: usize,
    entry: &TimeSeriesEntry,
    interval: &DeliveryInterval,
) {
    // Blank counterparties fall back to the document-level participants.
    let in_party = non_empty_or(&entry.counterparty_in_eic, &doc.sender.eic);
    let out_party = non_empty_or(&entry.counterparty_out_eic, &doc.receiver.eic);

    w.open("TimeSeries", &[])
        .leaf("mRID", &series_id.to_string())
        .leaf("businessType", BUSINESS_TYPE)
        .leaf("product", PRODUCT)
        .leaf("objectAggregation", OBJECT_AGGREGATION)
        .eic("in_Domain.mRID", &entry.in_domain)
        .eic("out_Domain.mRID", &entry.out_domain)
        .eic("in_MarketParticipant.mRID", in_party)
        .eic("out_MarketParticipant.mRID", out_party)
        .leaf("measurement_Unit.name", MEASUREMENT_UNIT)
        .leaf("curveType", CURVE_TYPE)
        .open("Period", &[])
        .interval("timeInterval", interval)
        .leaf("resolution", RESOLUTION);

    for (hour, value) in entry.hourly_values.iter().enumerate() {
        w.open("Point", &[])
            .leaf("position", &(hour + 1).to_string())
            .leaf("quantity", &format_quantity(*value))
            .close("Point");
    }

    w.close("Period").close("TimeSeries");
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
