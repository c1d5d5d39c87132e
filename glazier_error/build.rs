// build.rs - TOML-driven generation of reporting constants
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    reporting: ReportingConstants,
    paths: DefaultPaths,
}

#[derive(serde::Deserialize)]
struct ReportingConstants {
    help_uri: String,
    logs_archive_name: String,
}

#[derive(serde::Deserialize)]
struct DefaultPaths {
    windows_cache_dir: String,
    windows_logs_dir: String,
    unix_cache_dir: String,
    unix_logs_dir: String,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GLAZIER_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=GLAZIER_CONFIG_DIR");

    let profile = env::var("GLAZIER_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("GLAZIER_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of glazier_error directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_constants(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_constants(config: &CompileTimeConfig, profile: &str) {
    if !config.reporting.help_uri.starts_with("https://") {
        panic!("REPORTING: help_uri must be an https:// URL");
    }

    if config.reporting.help_uri.contains('#') {
        panic!("REPORTING: help_uri must not carry a fragment, the error code is appended as one");
    }

    if !config.reporting.logs_archive_name.ends_with(".zip")
        || config.reporting.logs_archive_name.contains(&['/', '\\'][..])
    {
        panic!("REPORTING: logs_archive_name must be a bare .zip file name");
    }

    let paths = [
        &config.paths.windows_cache_dir,
        &config.paths.windows_logs_dir,
        &config.paths.unix_cache_dir,
        &config.paths.unix_logs_dir,
    ];
    if paths.iter().any(|p| p.trim().is_empty()) {
        panic!("PATHS: default directories must not be empty");
    }

    if profile == "production" && config.paths.unix_cache_dir.starts_with("/tmp") {
        panic!("PRODUCTION: unix_cache_dir must not live under /tmp");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod reporting {{
        pub const HELP_URI: &str = {:?};
        pub const LOGS_ARCHIVE_NAME: &str = {:?};
    }}

    pub mod paths {{
        pub const WINDOWS_CACHE_DIR: &str = {:?};
        pub const WINDOWS_LOGS_DIR: &str = {:?};
        pub const UNIX_CACHE_DIR: &str = {:?};
        pub const UNIX_LOGS_DIR: &str = {:?};
    }}
}}
"#,
        profile,
        config.reporting.help_uri,
        config.reporting.logs_archive_name,
        config.paths.windows_cache_dir,
        config.paths.windows_logs_dir,
        config.paths.unix_cache_dir,
        config.paths.unix_logs_dir,
    );

    fs::write(output_path, constants_code).unwrap();
}
