//! Integration tests for configuration loading.

use corruption_scanner::models::config::{
    load_config, parse_config, save_config, Config, SectionConfig, DEFAULT_SAMPLE_SECS,
};
use corruption_scanner::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SAMPLE: &str = r#"
results_dir = "/srv/results"
max_workers = 6

[audio]
directories = ["/music", "/podcasts"]

[video]
timeout_secs = 45

[[video.sections]]
name = "TV"
directories = ["/media/tv"]
output_file = "Corrupt_TV.csv"

[[video.sections]]
name = "Anime"
directories = ["/media/anime", "/media/anime2"]
output_file = "Corrupt_Anime.csv"

[[video.sections]]
name = "Movies"
directories = ["/media/movies"]
output_file = "Corrupt_Movies.csv"
"#;

#[test]
fn test_parse_full_config_keeps_section_order() {
    let config = parse_config(SAMPLE).unwrap();

    assert_eq!(config.workers(), 6);
    assert_eq!(config.audio.directories.len(), 2);
    assert_eq!(config.audio.output_file, "Corrupt_Audio.csv");
    assert_eq!(config.video.timeout_secs, 45);
    assert_eq!(config.video.sample_secs, DEFAULT_SAMPLE_SECS);

    let names: Vec<_> = config.video.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["TV", "Anime", "Movies"]);
}

#[test]
fn test_report_paths_join_results_dir() {
    let config = parse_config(SAMPLE).unwrap();

    assert_eq!(
        config.audio_report_path(),
        Path::new("/srv/results").join("Corrupt_Audio.csv")
    );
    assert_eq!(
        config.section_report_path(&config.video.sections[1]),
        Path::new("/srv/results").join("Corrupt_Anime.csv")
    );
    assert!(config.validate_audio().is_ok());
    assert!(config.validate_video().is_ok());
}

#[test]
fn test_validation_errors() {
    let config = parse_config("").unwrap();
    assert!(matches!(config.validate_audio(), Err(Error::InvalidConfig(_))));
    assert!(matches!(config.validate_video(), Err(Error::InvalidConfig(_))));

    let mut config = Config::default();
    config.video.sections.push(SectionConfig {
        name: "  ".to_string(),
        directories: vec![PathBuf::from("/media")],
        output_file: "x.csv".to_string(),
    });
    assert!(matches!(config.validate_video(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_section_requires_output_file() {
    let config =
        parse_config("[[video.sections]]\nname = \"TV\"\ndirectories = [\"/tv\"]\n").unwrap();
    assert!(config.video.sections[0].output_file.is_empty());
    assert!(matches!(config.validate_video(), Err(Error::InvalidConfig(_))));

    let config = parse_config("[[video.sections]]\noutput_file = \"tv.csv\"\n").unwrap();
    assert!(matches!(config.validate_video(), Err(Error::InvalidConfig(_))));
}

#[test]
fn test_load_missing_config() {
    let result = load_config(Some(Path::new("/nonexistent/config.toml")));
    assert!(matches!(result, Err(Error::ConfigNotFound(_))));
}

#[test]
fn test_save_and_load_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let original = parse_config(SAMPLE).unwrap();
    save_config(&original, &path).unwrap();
    assert!(path.exists());

    let loaded = load_config(Some(path.as_path())).unwrap();
    assert_eq!(loaded.results_dir, original.results_dir);
    assert_eq!(loaded.video.sections.len(), 3);
    assert_eq!(loaded.video.sections[2].name, "Movies");
}

#[test]
fn test_load_malformed_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, "[audio\ndirectories = ").unwrap();

    assert!(matches!(
        load_config(Some(path.as_path())),
        Err(Error::TomlParse(_))
    ));
}
