//! Price history: quotation page parsing, synthetic series and statistics.
//!
//! Network access lives in the server; everything here is a pure function of
//! its inputs plus an injectable random generator, so the fallback series and
//! the derived intraday/bilateral prices are reproducible in tests.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use rand::Rng;

use crate::models::enums::PricePeriod;
use crate::models::prices::{PriceDataPoint, PriceHistory, PriceSource, PriceStats};

/// Days covered by the synthetic series (one quarter).
pub const SYNTHETIC_DAYS: i64 = 90;

/// Parsed prices outside this open interval (UAH/MWh) are discarded.
const MIN_PLAUSIBLE_PRICE: f64 = 100.0;
const MAX_PLAUSIBLE_PRICE: f64 = 50_000.0;

/// Currency marker that closes a free-text price quote, any letter case.
const CURRENCY_MARKER: &str = "грн";

// ============================================================================
// Date / number parsing
// ============================================================================

/// Parse `DD.MM.YYYY`, `DD/MM/YY`, `DD-MM` and similar into a date.
///
/// A missing or empty year (`12.05.`) means `current_year`; two-digit years
/// are in the 2000s.
pub fn parse_date(value: &str, current_year: i32) -> Option<NaiveDate> {
    let parts: Vec<&str> = value.split(['.', '-', '/']).collect();
    if parts.len() < 2 {
        return None;
    }
    let day: u32 = leading_int(parts[0])?;
    let month: u32 = leading_int(parts[1])?;
    let mut year = match parts.get(2).map(|raw| raw.trim()) {
        Some(raw) if !raw.is_empty() => leading_int(raw)?,
        _ => current_year,
    };
    if year < 100 {
        year += 2000;
    }
    if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn leading_int<T: std::str::FromStr>(value: &str) -> Option<T> {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Parse a quoted price such as `3 512,75`: whitespace dropped, the first
/// comma is the decimal separator, trailing garbage ignored.
pub fn parse_price(value: &str) -> Option<f64> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let normalized = compact.replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in normalized.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    normalized[..end].parse().ok()
}

fn is_plausible_price(price: f64) -> bool {
    price > MIN_PLAUSIBLE_PRICE && price < MAX_PLAUSIBLE_PRICE
}

// ============================================================================
// Quotation page parsing
// ============================================================================

/// Extract daily prices from the UEEX quotation page.
///
/// Two passes: free-text quotes (`12.05.2025 ... 3 512,75 грн`) which
/// overwrite the day-ahead price of an already seen date, then table rows
/// (`<td>date</td> ... <td>price</td>`) which only add unseen dates.
/// Intraday and bilateral prices are derived from the day-ahead price.
/// The result is sorted by date.
pub fn parse_quotations<R: Rng + ?Sized>(
    html: &str,
    current_year: i32,
    rng: &mut R,
) -> Vec<PriceDataPoint> {
    let mut prices: Vec<PriceDataPoint> = Vec::new();

    for (date_str, price_str) in scan_text_quotes(html) {
        let price = parse_price(&price_str);
        let date = parse_date(&date_str, current_year);
        let (Some(price), Some(date)) = (price, date) else {
            continue;
        };
        if !is_plausible_price(price) {
            continue;
        }
        match prices.iter_mut().find(|p| p.date == date) {
            Some(existing) => existing.day_ahead = price,
            None => prices.push(derived_point(date, price, rng)),
        }
    }

    for (date_str, price_str) in scan_table_rows(html) {
        let price = parse_price(price_str);
        let date = parse_date(date_str, current_year);
        let (Some(price), Some(date)) = (price, date) else {
            continue;
        };
        if is_plausible_price(price) && !prices.iter().any(|p| p.date == date) {
            prices.push(derived_point(date, price, rng));
        }
    }

    prices.sort_by_key(|p| p.date);
    prices
}

fn derived_point<R: Rng + ?Sized>(date: NaiveDate, price: f64, rng: &mut R) -> PriceDataPoint {
    PriceDataPoint {
        date,
        day_ahead: price,
        intraday: price * (1.0 + (rng.random::<f64>() * 0.1 - 0.05)),
        bilateral: price * (0.9 + rng.random::<f64>() * 0.1),
    }
}

fn starts_with_ignore_case(chars: &[char], marker: &[char]) -> bool {
    chars.len() >= marker.len()
        && chars
            .iter()
            .zip(marker)
            .all(|(a, b)| a.to_lowercase().eq(b.to_lowercase()))
}

fn is_date_sep(c: char) -> bool {
    matches!(c, '.' | '-' | '/')
}

/// Length of the run of ASCII digits starting at `i`, capped at `max`.
fn digit_run(chars: &[char], i: usize, max: usize) -> usize {
    chars[i.min(chars.len())..]
        .iter()
        .take(max)
        .take_while(|c| c.is_ascii_digit())
        .count()
}

/// Match `\d{1,2}[.-/]\d{1,2}[.-/]\d{2,4}` at `start`; returns the end index.
fn match_date_at(chars: &[char], start: usize) -> Option<usize> {
    let day_len = digit_run(chars, start, 2);
    for d in (1..=day_len).rev() {
        let sep1 = start + d;
        if !chars.get(sep1).copied().is_some_and(is_date_sep) {
            continue;
        }
        let month_len = digit_run(chars, sep1 + 1, 2);
        for m in (1..=month_len).rev() {
            let sep2 = sep1 + 1 + m;
            if !chars.get(sep2).copied().is_some_and(is_date_sep) {
                continue;
            }
            let year_len = digit_run(chars, sep2 + 1, 4);
            if year_len >= 2 {
                return Some(sep2 + 1 + year_len);
            }
        }
    }
    None
}

/// Find `date <non-digits> number <non-digits containing грн>` quotes.
fn scan_text_quotes(html: &str) -> Vec<(String, String)> {
    let chars: Vec<char> = html.chars().collect();
    let marker: Vec<char> = CURRENCY_MARKER.chars().collect();
    let mut quotes = Vec::new();

    let mut i = 0;
    while i < chars.len() {
        let Some(date_end) = match_date_at(&chars, i) else {
            i += 1;
            continue;
        };

        let mut j = date_end;
        while j < chars.len() && !chars[j].is_ascii_digit() {
            j += 1;
        }
        let number_start = j;
        while j < chars.len()
            && (chars[j].is_ascii_digit() || chars[j].is_whitespace() || chars[j] == ',')
        {
            j += 1;
        }
        // Back off to the last digit of the number.
        let mut number_end = j;
        while number_end > number_start && !chars[number_end - 1].is_ascii_digit() {
            number_end -= 1;
        }
        if number_end - number_start < 2 {
            i += 1;
            continue;
        }

        let mut k = number_end;
        let mut marker_end = None;
        while k < chars.len() && !chars[k].is_ascii_digit() {
            if starts_with_ignore_case(&chars[k..], &marker) {
                marker_end = Some(k + marker.len());
                break;
            }
            k += 1;
        }

        match marker_end {
            Some(end) => {
                quotes.push((
                    chars[i..date_end].iter().collect(),
                    chars[number_start..number_end].iter().collect(),
                ));
                i = end;
            }
            None => i += 1,
        }
    }
    quotes
}

/// Next `<td ...>content</td>` cell at or after `from`:
/// `(content_start, content_end, after_cell)`.
fn next_cell(html: &str, from: usize) -> Option<(usize, usize, usize)> {
    let mut pos = from;
    loop {
        let open = pos + html.get(pos..)?.find("<td")?;
        let after_name = open + 3;
        let is_td = html[after_name..]
            .chars()
            .next()
            .is_some_and(|c| c == '>' || c.is_whitespace());
        if !is_td {
            pos = after_name;
            continue;
        }
        let content_start = after_name + html[after_name..].find('>')? + 1;
        let content_end = content_start + html[content_start..].find("</td>")?;
        return Some((content_start, content_end, content_end + "</td>".len()));
    }
}

/// Find the first cell at or after `from` whose whole content satisfies
/// `accept`; returns the content and the index after the cell.
fn find_cell<'a>(html: &'a str, from: usize, accept: fn(char) -> bool) -> Option<(&'a str, usize)> {
    let mut pos = from;
    while let Some((start, end, after)) = next_cell(html, pos) {
        let content = &html[start..end];
        if !content.is_empty() && content.chars().all(accept) {
            return Some((content, after));
        }
        pos = after;
    }
    None
}

/// Find `<tr>` rows holding a date cell followed by a price cell.
fn scan_table_rows(html: &str) -> Vec<(&str, &str)> {
    let mut rows = Vec::new();
    let mut pos = 0;
    while let Some(offset) = html[pos..].find("<tr") {
        let row = pos + offset;
        let Some(row_body) = html[row..].find('>').map(|gt| row + gt + 1) else {
            break;
        };
        let matched = find_cell(html, row_body, |c| c.is_ascii_digit() || is_date_sep(c))
            .and_then(|(date, after_date)| {
                find_cell(html, after_date, |c| {
                    c.is_ascii_digit() || c.is_whitespace() || c == ',' || c == '.'
                })
                .map(|(price, after_price)| (date, price, after_price))
            });
        match matched {
            Some((date, price, after)) => {
                rows.push((date, price));
                pos = after;
            }
            None => pos = row + 3,
        }
    }
    rows
}

// ============================================================================
// Synthetic series
// ============================================================================

fn is_winter(month: u32) -> bool {
    // November through March.
    month >= 11 || month <= 3
}

/// Plausible day-ahead, intraday and bilateral prices for the
/// [`SYNTHETIC_DAYS`] days ending at `today`.
///
/// Winter months start from a higher base, weekends are cheaper, and two
/// sine trends (weekly, monthly) plus daily noise shape the curve.
pub fn generate_synthetic<R: Rng + ?Sized>(today: NaiveDate, rng: &mut R) -> Vec<PriceDataPoint> {
    let mut base_day_ahead = if is_winter(today.month()) { 3800.0 } else { 3200.0 };
    let mut data = Vec::with_capacity(SYNTHETIC_DAYS as usize);

    for i in (0..SYNTHETIC_DAYS).rev() {
        let date = today - Duration::days(i);
        let weekend_factor = match date.weekday() {
            Weekday::Sat | Weekday::Sun => 0.85,
            _ => 1.0,
        };
        let variation = 0.92 + rng.random::<f64>() * 0.16;
        let days_back = i as f64;
        let week_trend = (days_back / 7.0 * PI).sin() * 150.0;
        let month_trend = (days_back / 30.0 * PI).sin() * 300.0;

        let day_ahead =
            ((base_day_ahead + week_trend + month_trend) * weekend_factor * variation).round();
        let intraday = (day_ahead * (1.02 + rng.random::<f64>() * 0.08)).round();
        let bilateral = (day_ahead * (0.88 + rng.random::<f64>() * 0.1)).round();

        data.push(PriceDataPoint {
            date,
            day_ahead: day_ahead.clamp(1500.0, 6000.0),
            intraday: intraday.clamp(1500.0, 6500.0),
            bilateral: bilateral.clamp(1400.0, 5500.0),
        });

        base_day_ahead += (rng.random::<f64>() - 0.5) * 30.0;
    }
    data
}

// ============================================================================
// Period filter / statistics
// ============================================================================

/// Points dated on or after `today - period.days()`.
pub fn filter_period(data: &[PriceDataPoint], period: PricePeriod, today: NaiveDate) -> Vec<PriceDataPoint> {
    let cutoff = today - Duration::days(period.days());
    data.iter().filter(|p| p.date >= cutoff).copied().collect()
}

/// Day-ahead statistics; an empty series yields all zeros.
pub fn compute_stats(data: &[PriceDataPoint]) -> PriceStats {
    let (Some(first), Some(last)) = (data.first(), data.last()) else {
        return PriceStats::default();
    };
    let sum: f64 = data.iter().map(|p| p.day_ahead).sum();
    let min = data.iter().map(|p| p.day_ahead).fold(f64::INFINITY, f64::min);
    let max = data.iter().map(|p| p.day_ahead).fold(f64::NEG_INFINITY, f64::max);

    let change = if first.day_ahead != 0.0 {
        (last.day_ahead - first.day_ahead) / first.day_ahead * 100.0
    } else {
        0.0
    };

    PriceStats {
        average: (sum / data.len() as f64).round(),
        min,
        max,
        last_price: last.day_ahead,
        change: (change * 100.0).round() / 100.0,
    }
}

/// Filter `all` to `period` and wrap it with statistics and provenance.
pub fn build_history(
    all: &[PriceDataPoint],
    period: PricePeriod,
    source: PriceSource,
    now: DateTime<Utc>,
    notice: Option<String>,
) -> PriceHistory {
    let data = filter_period(all, period, now.date_naive());
    let stats = compute_stats(&data);
    PriceHistory {
        data,
        stats,
        source,
        last_updated: now,
        notice,
    }
}
