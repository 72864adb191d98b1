use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Chartflow";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("{}=info", env!("CARGO_PKG_NAME"))
}

/// Get the application data directory
/// ~/Chartflow/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Chartflow")
}

/// Path of the clinic database
pub fn database_path() -> PathBuf {
    app_data_dir().join("chartflow.db")
}

/// Directory exported reports are written to
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Chartflow"));
    }

    #[test]
    fn database_and_exports_under_app_data() {
        let app = app_data_dir();
        assert!(database_path().starts_with(&app));
        assert!(exports_dir().starts_with(&app));
        assert!(exports_dir().ends_with("exports"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
