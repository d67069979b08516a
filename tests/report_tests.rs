//! Integration tests for CSV report writing.

use corruption_scanner::core::report::{write_report, ReportKind};
use corruption_scanner::models::scan::CorruptFile;
use std::path::PathBuf;
use tempfile::TempDir;

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let header = reader
        .headers()
        .unwrap()
        .iter()
        .map(String::from)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (header, rows)
}

#[test]
fn test_audio_report_written_even_when_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Results").join("Corrupt_Audio.csv");

    let written = write_report(&path, ReportKind::Audio, &[]).unwrap();

    assert!(written);
    let (header, rows) = read_rows(&path);
    assert_eq!(header, ["File Path", "Error"]);
    assert!(rows.is_empty());
}

#[test]
fn test_video_report_skipped_when_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Corrupt_TV.csv");

    let written = write_report(&path, ReportKind::Video, &[]).unwrap();

    assert!(!written);
    assert!(!path.exists());
}

#[test]
fn test_video_report_rows_and_quoting() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Corrupt_Movies.csv");
    let rows = vec![
        CorruptFile {
            path: PathBuf::from("/movies/Heat, 1995.mkv"),
            reason: "Playback failed at start: error while decoding \"MB\"".to_string(),
        },
        CorruptFile {
            path: PathBuf::from("/movies/Ran.avi"),
            reason: "Playback process timed out, Please Check Manually".to_string(),
        },
    ];

    assert!(write_report(&path, ReportKind::Video, &rows).unwrap());

    let (header, read) = read_rows(&path);
    assert_eq!(header, ["Corrupted File Path", "Reason"]);
    assert_eq!(read.len(), 2);
    assert_eq!(read[0][0], "/movies/Heat, 1995.mkv");
    assert_eq!(
        read[0][1],
        "Playback failed at start: error while decoding \"MB\""
    );
    assert_eq!(read[1][0], "/movies/Ran.avi");
}

#[test]
fn test_report_overwrites_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Corrupt_Audio.csv");
    let row = CorruptFile {
        path: PathBuf::from("/music/a.mp3"),
        reason: "FFprobe Error: bad".to_string(),
    };

    write_report(&path, ReportKind::Audio, &[row.clone(), row]).unwrap();
    write_report(&path, ReportKind::Audio, &[]).unwrap();

    let (_, rows) = read_rows(&path);
    assert!(rows.is_empty());
}
