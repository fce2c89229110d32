const MIN_ROUTABLE_LEN: usize = 10;

const ADDRESS_NOUNS: &[&str] = &[
    "street", "road", "avenue", "lane", "sector", "colony", "building",
    "nagar", "marg", "block", "society", "apartment", "tower", "plaza",
    "market", "chowk", "complex", "floor", "phase",
];

/// Heuristic check that a free-text address stands a chance of geocoding.
/// Accepts strings of at least ten characters that carry a digit or one of
/// the known address nouns. Anything else gets the "needs valid address"
/// outcome before a single network call is made.
pub fn is_routable(address: &str) -> bool {
    let trimmed = address.trim();
    if trimmed.len() < MIN_ROUTABLE_LEN {
        return false;
    }

    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }

    let lower = trimmed.to_lowercase();
    ADDRESS_NOUNS.iter().any(|noun| lower.contains(noun))
}

#[cfg(test)]
mod tests {
    use super::is_routable;

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(!is_routable(""));
        assert!(!is_routable("     "));
    }

    #[test]
    fn rejects_short_strings_even_with_digits() {
        assert!(!is_routable("Flat 4"));
    }

    #[test]
    fn accepts_long_string_with_digit() {
        assert!(is_routable("Flat 402, Tower B, Navi Mumbai"));
    }

    #[test]
    fn accepts_long_string_with_address_noun() {
        assert!(is_routable("Palm Beach Road, Navi Mumbai"));
        assert!(is_routable("shivaji nagar, pune"));
    }

    #[test]
    fn address_noun_match_is_case_insensitive() {
        assert!(is_routable("MG ROAD BANGALORE"));
    }

    #[test]
    fn rejects_long_prose_without_digit_or_noun() {
        assert!(!is_routable("somewhere near the big tree"));
    }
}
