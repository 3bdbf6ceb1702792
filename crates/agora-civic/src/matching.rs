//! Ward-name matching heuristic.
//!
//! Council directories and boundary APIs rarely agree on the exact spelling
//! of a ward: one says `Holborn & Covent Garden Ward`, the other
//! `Holborn and Covent Garden`. Matching therefore normalizes both sides and
//! accepts substring containment in either direction.

/// Normalizes a ward name for comparison.
///
/// Lowercases, replaces `&` with `and`, strips punctuation, drops the word
/// `ward`, and collapses whitespace.
pub fn normalize_ward_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('&', " and ");

    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| *word != "ward")
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns whether two ward names refer to the same ward.
///
/// Both names are normalized; a match is containment in either direction, so
/// a directory's `St James's` matches a boundary lookup's `St James's Ward`
/// and vice versa. Empty names never match.
pub fn wards_match(left: &str, right: &str) -> bool {
    let left = normalize_ward_name(left);
    let right = normalize_ward_name(right);

    if left.is_empty() || right.is_empty() {
        return false;
    }

    left.contains(&right) || right.contains(&left)
}

/// Picks the entries of a councillor directory that represent any of the
/// given wards.
///
/// `entries` pairs an arbitrary payload with its ward name; the payloads of
/// matching entries are returned in their original order, deduplicated by
/// index.
pub fn match_by_ward<'a, T>(
    wards: &[String],
    entries: impl IntoIterator<Item = (&'a str, T)>,
) -> Vec<T> {
    entries
        .into_iter()
        .filter(|(entry_ward, _)| wards.iter().any(|ward| wards_match(ward, entry_ward)))
        .map(|(_, payload)| payload)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_ward_word() {
        assert_eq!(normalize_ward_name("Abbey Ward"), "abbey");
        assert_eq!(normalize_ward_name("  ABBEY  "), "abbey");
    }

    #[test]
    fn test_normalize_handles_ampersand_and_punctuation() {
        assert_eq!(
            normalize_ward_name("Holborn & Covent Garden"),
            "holborn and covent garden"
        );
        assert_eq!(normalize_ward_name("St James's Ward"), "st james s");
    }

    #[test]
    fn test_wards_match_ignores_ward_suffix() {
        assert!(wards_match("Abbey Ward", "Abbey"));
        assert!(wards_match("abbey", "ABBEY WARD"));
    }

    #[test]
    fn test_wards_match_containment_both_directions() {
        assert!(wards_match("Central", "Central and Walton"));
        assert!(wards_match("Central and Walton", "Central"));
    }

    #[test]
    fn test_wards_do_not_match_disjoint_names() {
        assert!(!wards_match("Abbey", "Riverside"));
        assert!(!wards_match("", "Riverside"));
        assert!(!wards_match("Ward", "Ward"));
    }

    #[test]
    fn test_match_by_ward_selects_payloads() {
        let wards = vec!["Holborn & Covent Garden".to_owned()];
        let entries = vec![
            ("Holborn and Covent Garden Ward", "cllr-a"),
            ("Bloomsbury", "cllr-b"),
            ("Covent Garden", "cllr-c"),
        ];

        let matched = match_by_ward(&wards, entries);
        assert_eq!(matched, vec!["cllr-a", "cllr-c"]);
    }
}
