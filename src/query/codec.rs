//! URL query-string codec for [`RecallQuery`].
//!
//! The location query string is a derived, serialized projection of the
//! canonical query — never an independent source of truth. Callers re-derive
//! the query from the string on every load so back/forward navigation and
//! shared links reproduce state exactly.
//!
//! Wire keys: `q`, `region`, `start_date`, `end_date`, `status` (repeatable),
//! `signal_type` (repeatable). Dates are `YYYY-MM-DD`. Statuses are emitted
//! upper-case and parsed case-insensitively; signal types pass through
//! verbatim (the server is case-sensitive there).

use chrono::NaiveDate;

use crate::model::{ConfidenceLevel, Region};

use super::RecallQuery;

const KEY_FREE_TEXT: &str = "q";
const KEY_REGION: &str = "region";
const KEY_START_DATE: &str = "start_date";
const KEY_END_DATE: &str = "end_date";
const KEY_STATUS: &str = "status";
const KEY_SIGNAL_TYPE: &str = "signal_type";

const DATE_FMT: &str = "%Y-%m-%d";

/// Parse a location query string into a canonical query. Total: malformed
/// dates, unknown regions, and unknown status tokens are dropped rather
/// than surfaced, favoring a usable-but-partial filter state. Unrecognized
/// keys are ignored — the canonical form is closed.
///
/// A leading `?` is tolerated so callers can pass a raw location suffix.
pub fn decode(query_string: &str) -> RecallQuery {
    let mut query = RecallQuery::default();

    let raw = query_string.strip_prefix('?').unwrap_or(query_string);
    for pair in raw.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let Some(value) = decode_component(value) else {
            // Undecodable percent sequence: drop the pair, keep the rest.
            continue;
        };

        match key {
            KEY_FREE_TEXT => query = query.set_free_text(Some(value.as_str())),
            KEY_REGION => {
                if let Ok(region) = value.parse::<Region>() {
                    query = query.set_region(Some(region));
                }
            }
            KEY_START_DATE => {
                if let Some(d) = parse_date(&value) {
                    query = query.set_start_date(Some(d));
                }
            }
            KEY_END_DATE => {
                if let Some(d) = parse_date(&value) {
                    query = query.set_end_date(Some(d));
                }
            }
            KEY_STATUS => {
                if let Ok(status) = value.parse::<ConfidenceLevel>() {
                    query.statuses.insert(status);
                }
            }
            KEY_SIGNAL_TYPE => {
                // Blank tags are unrepresentable in the canonical form.
                if !value.trim().is_empty() {
                    query.signal_types.insert(value);
                }
            }
            _ => {}
        }
    }

    query
}

/// Serialize a canonical query. Total, never fails, and deterministic:
/// keys are emitted in a fixed order and the repeatable keys follow their
/// sets' canonical ordering, keeping generated links diffable.
pub fn encode(query: &RecallQuery) -> String {
    let mut pairs: Vec<String> = Vec::new();

    if let Some(text) = &query.free_text {
        pairs.push(pair(KEY_FREE_TEXT, text));
    }
    if let Some(region) = query.region {
        pairs.push(pair(KEY_REGION, region.as_wire()));
    }
    if let Some(start) = query.start_date {
        pairs.push(pair(KEY_START_DATE, &start.format(DATE_FMT).to_string()));
    }
    if let Some(end) = query.end_date {
        pairs.push(pair(KEY_END_DATE, &end.format(DATE_FMT).to_string()));
    }
    for status in &query.statuses {
        pairs.push(pair(KEY_STATUS, status.as_wire()));
    }
    for signal in &query.signal_types {
        pairs.push(pair(KEY_SIGNAL_TYPE, signal));
    }

    pairs.join("&")
}

fn pair(key: &str, value: &str) -> String {
    format!("{key}={}", urlencoding::encode(value))
}

/// Percent-decode one component, treating `+` as a space (HTML form
/// encoding, what `URLSearchParams` produces). Returns `None` on invalid
/// percent sequences.
fn decode_component(raw: &str) -> Option<String> {
    let plus_unfolded = raw.replace('+', " ");
    urlencoding::decode(&plus_unfolded)
        .ok()
        .map(|c| c.into_owned())
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FMT).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn decode_full_query() {
        let q = decode("q=baby+formula&region=IN&start_date=2025-01-01&end_date=2025-03-31&status=CONFIRMED&status=WATCH&signal_type=Sample%20Failure");
        assert_eq!(q.free_text.as_deref(), Some("baby formula"));
        assert_eq!(q.region, Some(Region::In));
        assert_eq!(q.start_date, Some(date("2025-01-01")));
        assert_eq!(q.end_date, Some(date("2025-03-31")));
        assert!(q.statuses.contains(&ConfidenceLevel::Confirmed));
        assert!(q.statuses.contains(&ConfidenceLevel::Watch));
        assert!(q.signal_types.contains("Sample Failure"));
    }

    #[test]
    fn decode_tolerates_malformed_tokens() {
        let q = decode("?start_date=not-a-date&status=BOGUS&status=CONFIRMED");
        assert_eq!(q.start_date, None);
        assert_eq!(q.statuses.len(), 1);
        assert!(q.statuses.contains(&ConfidenceLevel::Confirmed));
    }

    #[test]
    fn decode_drops_unknown_region_and_keys() {
        let q = decode("region=EU&utm_source=mail&q=tesla");
        assert_eq!(q.region, None);
        assert_eq!(q.free_text.as_deref(), Some("tesla"));
    }

    #[test]
    fn decode_is_case_insensitive_for_status_only() {
        let q = decode("status=confirmed&signal_type=recall");
        assert!(q.statuses.contains(&ConfidenceLevel::Confirmed));
        // Signal types are opaque and case-sensitive: stored verbatim.
        assert!(q.signal_types.contains("recall"));
        assert!(!q.signal_types.contains("Recall"));
    }

    #[test]
    fn decode_empty_and_lone_keys() {
        assert_eq!(decode(""), RecallQuery::default());
        assert_eq!(decode("?"), RecallQuery::default());
        // A valueless or empty-valued `q` must not become Some("").
        assert_eq!(decode("q=").free_text, None);
        assert_eq!(decode("q").free_text, None);
    }

    #[test]
    fn decode_drops_blank_signal_types() {
        let q = decode("signal_type=&signal_type=%20%20&signal_type=Recall");
        assert_eq!(q.signal_types.len(), 1);
        assert!(q.signal_types.contains("Recall"));
    }

    #[test]
    fn decode_clamps_inverted_range() {
        let q = decode("start_date=2025-06-15&end_date=2025-06-01");
        assert_eq!(q.start_date, Some(date("2025-06-15")));
        assert_eq!(q.end_date, Some(date("2025-06-15")));
    }

    #[test]
    fn encode_orders_keys_stably() {
        let q = RecallQuery::default()
            .set_free_text(Some("cough syrup"))
            .set_region(Some(Region::Us))
            .set_start_date(Some(date("2025-01-01")))
            .toggle_status(ConfidenceLevel::Watch)
            .toggle_status(ConfidenceLevel::Confirmed)
            .toggle_signal("Recall");
        assert_eq!(
            encode(&q),
            "q=cough%20syrup&region=US&start_date=2025-01-01&status=CONFIRMED&status=WATCH&signal_type=Recall"
        );
    }

    #[test]
    fn encode_empty_query_is_empty_string() {
        assert_eq!(encode(&RecallQuery::default()), "");
    }

    #[test]
    fn roundtrip_preserves_reserved_characters() {
        let q = RecallQuery::default()
            .set_free_text(Some("a&b=c?d"))
            .toggle_signal("Regulatory Action");
        assert_eq!(decode(&encode(&q)), q);
    }
}
