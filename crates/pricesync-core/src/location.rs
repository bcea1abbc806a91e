//! Furniture (location) validation, grouping and manual assignment.
//!
//! A location is invalid when it is a placeholder meaning "unassigned":
//! empty, the literal `"NO"`, or any text containing one of
//! [`UNASSIGNED_MARKERS`] regardless of case. Only records with a valid
//! location are exported in per-location groups.
use std::collections::HashMap;

use serde::Serialize;

use crate::code::normalize_code_str;
use crate::error::AssignError;
use crate::record::ProductRecord;

/// Placeholder texts meaning "no location", matched as case-insensitive substrings.
pub const UNASSIGNED_MARKERS: [&str; 3] = ["no encontrado", "sin mueble", "sin asignar"];

/// Exact placeholder values.
const UNASSIGNED_EXACT: [&str; 5] = ["", "NO", "no encontrado", "sin mueble", "sin asignar"];

/// Returns true when `location` assigns a product to a real place.
pub fn is_location_valid(location: &str) -> bool {
    let trimmed = location.trim();
    if UNASSIGNED_EXACT.contains(&trimmed) {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    !UNASSIGNED_MARKERS.iter().any(|m| lowered.contains(m))
}

/// Records sharing one valid location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationGroup {
    /// The location tag, trimmed.
    pub location: String,
    /// Records in their dataset order.
    pub records: Vec<ProductRecord>,
}

/// Partitions records with a valid location by tag.
///
/// Groups are ordered by first appearance of their tag; records keep their
/// relative order within a group. Records with an invalid location are left
/// out.
pub fn group_by_location(records: &[ProductRecord]) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in records.iter().filter(|r| is_location_valid(&r.location)) {
        let tag = record.location.trim();
        let pos = match positions.get(tag) {
            Some(&pos) => pos,
            None => {
                positions.insert(tag.to_owned(), groups.len());
                groups.push(LocationGroup {
                    location: tag.to_owned(),
                    records: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[pos].records.push(record.clone());
    }
    groups
}

/// One line of a [`location_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationStatus {
    /// The location tag, trimmed.
    pub location: String,
    /// Whether the tag will be exported as a group.
    pub valid: bool,
    /// Number of records carrying this tag.
    pub count: usize,
}

/// Lists every distinct location tag with its validity and record count.
pub fn location_report(records: &[ProductRecord]) -> Vec<LocationStatus> {
    let mut report: Vec<LocationStatus> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let tag = record.location.trim();
        match positions.get(tag) {
            Some(&pos) => report[pos].count += 1,
            None => {
                positions.insert(tag, report.len());
                report.push(LocationStatus {
                    location: tag.to_owned(),
                    valid: is_location_valid(tag),
                    count: 1,
                });
            }
        }
    }
    report
}

/// Records waiting for a manual location assignment.
pub fn unassigned(records: &[ProductRecord]) -> Vec<&ProductRecord> {
    records
        .iter()
        .filter(|r| !is_location_valid(&r.location))
        .collect()
}

/// Sets the location of every record whose normalized code equals `code`.
///
/// Returns the new record sequence and the number of records touched.
///
/// # Errors
///
/// [`AssignError::UnknownCode`] when no record carries `code`.
pub fn assign_location(
    records: &[ProductRecord],
    code: &str,
    location: &str,
) -> Result<(Vec<ProductRecord>, usize), AssignError> {
    let wanted = normalize_code_str(code);
    let mut touched = 0usize;
    let assigned: Vec<ProductRecord> = records
        .iter()
        .map(|r| {
            if normalize_code_str(&r.code) == wanted {
                touched += 1;
                r.with_location(location.trim())
            } else {
                r.clone()
            }
        })
        .collect();

    if touched == 0 {
        return Err(AssignError::UnknownCode { code: wanted });
    }
    tracing::debug!(code = %wanted, location, touched, "location assigned");
    Ok((assigned, touched))
}
