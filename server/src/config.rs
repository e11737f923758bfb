use std::path::PathBuf;

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_DIST_DIR: &str = "client/dist";

pub fn port() -> u16 {
    std::env::var("HEXMAP_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Directory holding the compiled editor bundle.
pub fn dist_dir() -> PathBuf {
    std::env::var("HEXMAP_DIST_DIR")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_unset() {
        temp_env::with_var_unset("HEXMAP_PORT", || {
            assert_eq!(port(), DEFAULT_SERVER_PORT);
        });
    }

    #[test]
    fn port_reads_valid_override() {
        temp_env::with_var("HEXMAP_PORT", Some("8080"), || {
            assert_eq!(port(), 8080);
        });
    }

    #[test]
    fn port_rejects_zero_and_garbage() {
        temp_env::with_var("HEXMAP_PORT", Some("0"), || {
            assert_eq!(port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("HEXMAP_PORT", Some("not-a-port"), || {
            assert_eq!(port(), DEFAULT_SERVER_PORT);
        });
        temp_env::with_var("HEXMAP_PORT", Some("70000"), || {
            assert_eq!(port(), DEFAULT_SERVER_PORT);
        });
    }

    #[test]
    fn dist_dir_defaults_and_overrides() {
        temp_env::with_var_unset("HEXMAP_DIST_DIR", || {
            assert_eq!(dist_dir(), PathBuf::from(DEFAULT_DIST_DIR));
        });
        temp_env::with_var("HEXMAP_DIST_DIR", Some("   "), || {
            assert_eq!(dist_dir(), PathBuf::from(DEFAULT_DIST_DIR));
        });
        temp_env::with_var("HEXMAP_DIST_DIR", Some("/srv/hexmap"), || {
            assert_eq!(dist_dir(), PathBuf::from("/srv/hexmap"));
        });
    }
}
