/// Build an absolute URL from a base URL and a path
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        assert_eq!(
            absolute_url("https://protech.example/", "/services/ac-install/orrville-oh"),
            "https://protech.example/services/ac-install/orrville-oh"
        );
        assert_eq!(absolute_url("https://protech.example", "services"), "https://protech.example/services");
        assert_eq!(absolute_url("https://protech.example", "/"), "https://protech.example");
    }

    #[test]
    fn absolute_paths_pass_through() {
        assert_eq!(absolute_url("https://a.example", "https://b.example/x"), "https://b.example/x");
    }
}
