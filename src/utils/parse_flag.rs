/// Read an on/off setting such as `GEO_DEBUG=yes`. Missing or blank
/// values give `default`.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(t) if !t.is_empty() => matches!(t.as_str(), "1" | "true" | "yes" | "on"),
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_uses_default() {
        assert!(parse_flag(Some("  "), true));
        assert!(!parse_flag(None, false));
    }

    #[test]
    fn recognises_truthy_words() {
        for v in ["1", "true", "YES", "on"] {
            assert!(parse_flag(Some(v), false), "{v}");
        }
        assert!(!parse_flag(Some("off"), true));
    }
}
