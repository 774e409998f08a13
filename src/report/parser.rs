//! CSV decoding for credential report payloads.
//!
//! The first record is the header. Every subsequent record must have the same
//! number of fields; the reader is not flexible, so a short or long row is a
//! parse error rather than a silently dropped line.

use super::RawReport;
use csv::ReaderBuilder;

/// Parse a raw report payload.
///
/// An empty payload is valid and yields an empty report.
///
/// # Examples
///
/// ```
/// use aws_credential_report::report::parser::parse_report;
///
/// let report = parse_report(b"user,arn\nalice,arn:aws:iam::1:user/alice\n").unwrap();
/// assert_eq!(report.header, ["user", "arn"]);
/// assert_eq!(report.rows.len(), 1);
/// ```
pub fn parse_report(content: &[u8]) -> Result<RawReport, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(content);

    let mut records = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()));

    let header = match records.next() {
        Some(header) => header?,
        None => return Ok(RawReport::default()),
    };
    let rows = records.collect::<Result<Vec<_>, _>>()?;

    Ok(RawReport::new(header, rows))
}
