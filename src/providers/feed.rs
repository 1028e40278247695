//! Parser for the ECB euro foreign exchange reference feed.
//!
//! The document nests three levels of `Cube` elements under its root:
//!
//! ```xml
//! <gesmes:Envelope ...>
//!   <Cube>
//!     <Cube time="2018-11-30">
//!       <Cube currency="USD" rate="1.1435"/>
//!       ...
//! ```
//!
//! Only the first date group is read. Rates are kept exactly as written.

use crate::core::error::{RateError, RateResult};
use crate::core::rates::RateTable;
use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use rust_decimal::Decimal;
use tracing::debug;

/// Every rate in the feed is quoted against the euro.
pub const ECB_BASE_CURRENCY: &str = "EUR";

const CUBE: &[u8] = b"Cube";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Root,
    Outer,
    DateGroup,
    Other,
}

pub fn parse_feed(body: &[u8]) -> RateResult<RateTable> {
    let mut reader = Reader::from_reader(body);
    reader.config_mut().trim_text(true);
    let decoder = reader.decoder();

    let mut table = RateTable::with_base(ECB_BASE_CURRENCY);
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;
    let mut seen_outer = false;
    let mut seen_date_group = false;
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| {
            RateError::feed_parse(format!("{e} at position {}", reader.buffer_position()))
        })?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                if stack.is_empty() && seen_root {
                    return Err(RateError::feed_parse(format!(
                        "content after the root element at position {}",
                        reader.buffer_position()
                    )));
                }
                let is_cube = e.local_name().as_ref() == CUBE;
                let frame = match stack.last() {
                    None if !seen_root => {
                        seen_root = true;
                        Frame::Root
                    }
                    Some(Frame::Root) if is_cube && !seen_outer => {
                        seen_outer = true;
                        Frame::Outer
                    }
                    Some(Frame::Outer) if is_cube && !seen_date_group => {
                        seen_date_group = true;
                        if let Some(time) = attribute(e, "time", decoder)? {
                            table.set_published(parse_date(&time)?);
                        }
                        Frame::DateGroup
                    }
                    Some(Frame::DateGroup) if is_cube => {
                        let (currency, rate) = rate_entry(e, decoder)?;
                        table.insert(ECB_BASE_CURRENCY, &currency, rate);
                        Frame::Other
                    }
                    _ => Frame::Other,
                };
                if matches!(event, Event::Start(_)) {
                    stack.push(frame);
                }
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(ref text) if stack.is_empty() && !is_blank(text) => {
                return Err(RateError::feed_parse(format!(
                    "text outside the root element at position {}",
                    reader.buffer_position()
                )));
            }
            Event::CData(_) if stack.is_empty() => {
                return Err(RateError::feed_parse(format!(
                    "CDATA outside the root element at position {}",
                    reader.buffer_position()
                )));
            }
            Event::Eof => {
                if !seen_root {
                    return Err(RateError::feed_parse("document has no root element"));
                }
                if !stack.is_empty() {
                    return Err(RateError::feed_parse("unexpected end of document"));
                }
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    debug!(
        quotes = table.quotes(ECB_BASE_CURRENCY).map_or(0, |q| q.len()),
        published = ?table.published(),
        "Parsed rate feed"
    );
    Ok(table)
}

fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn attribute(
    element: &BytesStart<'_>,
    name: &str,
    decoder: quick_xml::encoding::Decoder,
) -> RateResult<Option<String>> {
    let attr = element
        .try_get_attribute(name)
        .map_err(RateError::feed_parse)?;
    attr.map(|a| {
        a.decode_and_unescape_value(decoder)
            .map(|value| value.trim().to_string())
            .map_err(RateError::feed_parse)
    })
    .transpose()
}

fn rate_entry(
    element: &BytesStart<'_>,
    decoder: quick_xml::encoding::Decoder,
) -> RateResult<(String, Decimal)> {
    let currency = attribute(element, "currency", decoder)?
        .ok_or_else(|| RateError::feed_parse("rate element without a currency attribute"))?;
    let rate = attribute(element, "rate", decoder)?.ok_or_else(|| {
        RateError::feed_parse(format!("rate element for {currency} without a rate attribute"))
    })?;
    let rate = Decimal::from_str_exact(&rate)
        .map_err(|e| RateError::feed_parse(format!("invalid rate '{rate}' for {currency}: {e}")))?;
    Ok((currency, rate))
}

fn parse_date(value: &str) -> RateResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| RateError::feed_parse(format!("invalid date '{value}': {e}")))
}
