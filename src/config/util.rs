//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Path component of a site URL, without surrounding slashes.
///
/// Port, credentials, query and fragment are ignored. Returns `None` when
/// the string is not an absolute URL.
///
/// # Examples
/// ```ignore
/// extract_url_path("https://acme.github.io/site/") -> Some("site")
/// extract_url_path("https://acme-electric.com")    -> Some("")
/// extract_url_path("acme-electric.com")            -> None
/// ```
pub fn extract_url_path(url_str: &str) -> Option<String> {
    let parsed = url::Url::parse(url_str).ok()?;
    Some(parsed.path().trim_matches('/').to_string())
}

/// Find the config file, searching `start` and then each ancestor.
///
/// An absolute `config_name` is returned as-is when it exists.
///
/// ```text
/// /home/user/site/data/          ← start
/// /home/user/site/voltpress.toml  ← found!
/// ```
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

/// Find the config file by searching upward from the current directory.
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_url_path() {
        assert_eq!(
            extract_url_path("https://acme.github.io/site/"),
            Some("site".to_string())
        );
        assert_eq!(
            extract_url_path("https://acme.github.io/a/b"),
            Some("a/b".to_string())
        );
        assert_eq!(
            extract_url_path("https://acme-electric.com"),
            Some(String::new())
        );
        assert_eq!(
            extract_url_path("https://acme-electric.com/"),
            Some(String::new())
        );
        assert_eq!(extract_url_path("acme-electric.com"), None);
    }

    #[test]
    fn test_extract_url_path_ignores_extras() {
        assert_eq!(
            extract_url_path("https://user:pw@acme.com:8080/site?x=1#top"),
            Some("site".to_string())
        );
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("data/exports");
        std::fs::create_dir_all(&nested).unwrap();
        let config = dir.path().join("voltpress.toml");
        std::fs::write(&config, "").unwrap();

        let found = find_config_file_from(&nested, Path::new("voltpress.toml"));
        assert_eq!(found, Some(config));
    }

    #[test]
    fn test_find_config_file_missing() {
        let dir = TempDir::new().unwrap();
        let found = find_config_file_from(dir.path(), Path::new("no-such-config.toml"));
        assert_eq!(found, None);
    }

    #[test]
    fn test_find_config_file_absolute() {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("custom.toml");
        std::fs::write(&config, "").unwrap();

        assert_eq!(
            find_config_file_from(Path::new("/"), &config),
            Some(config.clone())
        );
        assert_eq!(
            find_config_file_from(Path::new("/"), &dir.path().join("gone.toml")),
            None
        );
    }
}
