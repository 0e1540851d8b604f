//! Local filtering used when the remote service cannot filter by text.

use crate::api::response::{AirportPage, Pagination};
use crate::domain::airport::AirportSummary;

/// Returns `true` if any searchable field of `airport` contains `needle`,
/// ignoring case. A blank needle matches everything.
#[must_use]
pub fn matches(airport: &AirportSummary, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    [
        &airport.airport_name,
        &airport.iata_code,
        &airport.icao_code,
        &airport.city_iata_code,
        &airport.country_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

/// Filters `rows` by `needle` and slices out `[offset, offset + limit)`.
///
/// `total` in the returned pagination is the filtered count.
#[must_use]
pub fn paginate(rows: Vec<AirportSummary>, needle: Option<&str>, offset: u32, limit: u32) -> AirportPage {
    let filtered: Vec<AirportSummary> = rows
        .into_iter()
        .filter(|airport| needle.map_or(true, |n| matches(airport, n)))
        .collect();

    let total = u32::try_from(filtered.len()).unwrap_or(u32::MAX);
    let airports: Vec<AirportSummary> = filtered
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    let count = u32::try_from(airports.len()).unwrap_or(u32::MAX);

    AirportPage {
        airports,
        pagination: Pagination {
            offset,
            limit,
            count,
            total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn airport(name: &str, iata: &str, country: &str) -> AirportSummary {
        AirportSummary {
            airport_name: name.to_string(),
            iata_code: iata.to_string(),
            country_name: country.to_string(),
            ..AirportSummary::default()
        }
    }

    #[test]
    fn test_matches_any_field_case_insensitively() {
        let jfk = airport("John F Kennedy", "JFK", "United States");

        assert!(matches(&jfk, "kennedy"));
        assert!(matches(&jfk, "jfk"));
        assert!(matches(&jfk, "STATES"));
        assert!(matches(&jfk, "  "));
        assert!(!matches(&jfk, "heathrow"));
    }

    #[test]
    fn test_paginate_slices_filtered_rows() {
        let rows: Vec<AirportSummary> = (0..20)
            .map(|i| airport(&format!("Field {i}"), "", if i % 2 == 0 { "Canada" } else { "Chile" }))
            .collect();

        let page = paginate(rows, Some("canada"), 9, 9);

        assert_eq!(page.pagination.total, 10);
        assert_eq!(page.pagination.count, 1);
        assert_eq!(page.airports[0].airport_name, "Field 18");
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let page = paginate(vec![airport("Anaa", "AAA", "French Polynesia")], None, 9, 9);
        assert!(page.airports.is_empty());
        assert_eq!(page.pagination.total, 1);
    }
}
