//! Row-level merge of per-profile credential reports.
//!
//! All reports must share one column layout. The merged table prepends a
//! `profile` column and, when requested, drops rows whose `arn` ends in
//! `:root`. The suffix test is a plain string check, not an ARN parse.

use super::{MergedTable, ProfileResult};
use crate::error::ReportError;

/// Column prepended to every merged row.
pub const PROFILE_COLUMN: &str = "profile";

/// Column holding the identity ARN used for root filtering.
pub const ARN_COLUMN: &str = "arn";

/// ARN suffix identifying an account's root user.
pub const ROOT_ARN_SUFFIX: &str = ":root";

/// Combine ordered profile results into one table.
///
/// Results are emitted in slice order and rows in source order.
/// Profiles whose payload was empty carry no header and are skipped; the
/// first non-empty header becomes canonical and every other header must
/// match it exactly. When every payload was empty the canonical header has
/// no columns, so the table is just `profile` (and excluding root fails for
/// want of an `arn` column).
pub fn merge_reports(
    results: &[ProfileResult],
    exclude_root: bool,
) -> Result<MergedTable, ReportError> {
    if results.is_empty() {
        return Ok(MergedTable::default());
    }

    let mut with_schema = results.iter().filter(|result| !result.header.is_empty());
    let canonical: &[String] = with_schema
        .next()
        .map_or(&[][..], |first| first.header.as_slice());

    for result in with_schema {
        if result.header != canonical {
            return Err(ReportError::HeaderMismatch {
                profile: result.profile.clone(),
                expected: canonical.to_vec(),
                found: result.header.clone(),
            });
        }
    }

    let arn_index = if exclude_root {
        Some(find_column(canonical, ARN_COLUMN)?)
    } else {
        None
    };

    let mut header = Vec::with_capacity(canonical.len() + 1);
    header.push(PROFILE_COLUMN.to_string());
    header.extend(canonical.iter().cloned());

    let mut rows = Vec::new();
    for result in results {
        for row in &result.rows {
            if arn_index.is_some_and(|idx| is_root_row(row, idx)) {
                continue;
            }

            let mut merged = Vec::with_capacity(row.len() + 1);
            merged.push(result.profile.clone());
            merged.extend(row.iter().cloned());
            rows.push(merged);
        }
    }

    Ok(MergedTable { header, rows })
}

/// Position of `name` in `header`, matched exactly.
pub fn find_column(header: &[String], name: &str) -> Result<usize, ReportError> {
    header
        .iter()
        .position(|column| column == name)
        .ok_or_else(|| ReportError::MissingColumn {
            column: name.to_string(),
        })
}

fn is_root_row(row: &[String], arn_index: usize) -> bool {
    row.get(arn_index)
        .is_some_and(|arn| arn.ends_with(ROOT_ARN_SUFFIX))
}
