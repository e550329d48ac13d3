use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::Trip;

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("static slug pattern"));
static SEPARATOR_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("static separator pattern"));

/// Lowercase, drop punctuation, collapse whitespace and dashes into single dashes.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let stripped = NON_SLUG_CHARS.replace_all(&lowered, "");
    SEPARATOR_RUNS.replace_all(&stripped, "-").into_owned()
}

/// `{slug(name)}_{first 8 chars of id}.json`
pub fn trip_filename(trip: &Trip) -> String {
    let short_id: String = trip.id.chars().take(8).collect();
    format!("{}_{}.json", slugify(&trip.name), short_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("Summer Vacation"), "summer-vacation");
        assert_eq!(slugify("  France -- to   Spain! "), "france-to-spain");
        assert_eq!(slugify("Côte d'Azur 2024"), "côte-dazur-2024");
        assert_eq!(slugify("snake_case_kept"), "snake_case_kept");
    }

    #[test]
    fn filename_uses_short_id() {
        let trip = Trip::with_id("1234567890abcdef", "Road Trip");
        assert_eq!(trip_filename(&trip), "road-trip_12345678.json");
    }

    #[test]
    fn short_ids_are_kept_whole() {
        let trip = Trip::with_id("abc", "X");
        assert_eq!(trip_filename(&trip), "x_abc.json");
    }
}
