//! Per-file corruption checks.
//!
//! Every check delegates to ffprobe or ffmpeg and classifies the outcome.
//! Classification is kept separate from process execution so the verdict
//! rules can be exercised without the tools installed.

use crate::models::scan::Verdict;
use crate::services::ffmpeg::{self, Decoder, SeekPoint};
use crate::services::ffprobe::{self, DurationProbe};
use crate::services::process::ProcessOutcome;
use crate::Result;
use std::future::Future;
use std::path::Path;
use std::time::Duration;

const TIMED_OUT: &str = "Process timed out, Please Check Manually";
const PLAYBACK_TIMED_OUT: &str = "Playback process timed out, Please Check Manually";

/// How thoroughly video files are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ValidationMode {
    /// Probe container and streams with ffprobe (fast).
    Metadata,
    /// Decode the first seconds with ffmpeg (slower).
    Playback,
    /// Decode at the start, middle and end (slowest).
    Indepth,
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationMode::Metadata => write!(f, "metadata"),
            ValidationMode::Playback => write!(f, "playback"),
            ValidationMode::Indepth => write!(f, "indepth"),
        }
    }
}

/// Options shared by every video validation in a scan.
#[derive(Debug, Clone, Copy)]
pub struct VideoCheck {
    pub mode: ValidationMode,
    pub decoder: Decoder,
    pub timeout: Duration,
    pub sample_secs: u32,
}

/// Which playback sample a decode belongs to; only affects the reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackStage {
    Quick,
    Start,
    Middle,
    End,
}

impl PlaybackStage {
    fn failure_prefix(self) -> &'static str {
        match self {
            PlaybackStage::Quick => "Playback failed at start",
            PlaybackStage::Start => "Playback failed at the start",
            PlaybackStage::Middle => "Playback failed at the middle",
            PlaybackStage::End => "Playback failed at the end",
        }
    }
}

/// Validate an audio file with ffprobe.
pub async fn validate_audio(path: &Path, timeout: Duration) -> Verdict {
    let is_non_empty = std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false);
    if !is_non_empty {
        return Verdict::corrupt("File is empty or does not exist");
    }

    match ffprobe::probe_streams(path, timeout).await {
        Ok(outcome) => classify_audio_probe(&outcome),
        Err(e) => Verdict::corrupt(format!("Unexpected Error: {}", e)),
    }
}

/// Validate a video file according to `check.mode`.
pub async fn validate_video(path: &Path, check: &VideoCheck) -> Verdict {
    let result = match check.mode {
        ValidationMode::Metadata => ffprobe::probe_streams(path, check.timeout)
            .await
            .map(|outcome| classify_metadata_probe(&outcome)),
        ValidationMode::Playback => validate_playback(path, check).await,
        ValidationMode::Indepth => validate_playback_indepth(path, check).await,
    };

    result.unwrap_or_else(|e| Verdict::corrupt(format!("Error occurred: {}", e)))
}

async fn validate_playback(path: &Path, check: &VideoCheck) -> Result<Verdict> {
    let outcome = ffmpeg::decode_sample(
        path,
        check.decoder,
        SeekPoint::Beginning,
        check.sample_secs,
        check.timeout,
    )
    .await?;
    Ok(classify_playback(&outcome, PlaybackStage::Quick))
}

async fn validate_playback_indepth(path: &Path, check: &VideoCheck) -> Result<Verdict> {
    run_indepth(
        |seek| ffmpeg::decode_sample(path, check.decoder, seek, check.sample_secs, check.timeout),
        || ffprobe::probe_duration(path, check.timeout),
        check.sample_secs,
    )
    .await
}

/// Decode the start, probe the duration, then decode the middle and the end.
///
/// Stops at the first sample that does not come back valid.
async fn run_indepth<D, DFut, P, PFut>(decode: D, probe: P, sample_secs: u32) -> Result<Verdict>
where
    D: Fn(SeekPoint) -> DFut,
    DFut: Future<Output = Result<ProcessOutcome>>,
    P: FnOnce() -> PFut,
    PFut: Future<Output = Result<DurationProbe>>,
{
    let start = decode(SeekPoint::Offset(0.0)).await?;
    let verdict = classify_playback(&start, PlaybackStage::Start);
    if !verdict.is_valid() {
        return Ok(verdict);
    }

    let duration = probe().await?;
    let midpoint = match midpoint_from_probe(&duration) {
        Ok(midpoint) => midpoint,
        Err(verdict) => return Ok(verdict),
    };

    let middle = decode(SeekPoint::Offset(midpoint)).await?;
    let verdict = classify_playback(&middle, PlaybackStage::Middle);
    if !verdict.is_valid() {
        return Ok(verdict);
    }

    let end = decode(SeekPoint::FromEnd(sample_secs)).await?;
    Ok(classify_playback(&end, PlaybackStage::End))
}

/// Classify an ffprobe run against an audio file.
pub fn classify_audio_probe(outcome: &ProcessOutcome) -> Verdict {
    match outcome {
        ProcessOutcome::TimedOut => Verdict::corrupt(TIMED_OUT),
        ProcessOutcome::Completed { success: true, .. } => Verdict::Valid,
        ProcessOutcome::Completed { stderr, .. } => {
            Verdict::corrupt(format!("FFprobe Error: {}", stderr.trim()))
        }
    }
}

/// Classify an ffprobe run against a video file.
pub fn classify_metadata_probe(outcome: &ProcessOutcome) -> Verdict {
    match outcome {
        ProcessOutcome::TimedOut => Verdict::corrupt(TIMED_OUT),
        ProcessOutcome::Completed { success: true, .. } => Verdict::Valid,
        ProcessOutcome::Completed { stderr, .. } => {
            let stderr = stderr.trim();
            if stderr.contains("Invalid data found") {
                Verdict::corrupt(format!("Invalid data found: {}", stderr))
            } else {
                Verdict::corrupt(format!("Metadata validation failed: {}", stderr))
            }
        }
    }
}

fn classify_playback(outcome: &ProcessOutcome, stage: PlaybackStage) -> Verdict {
    match outcome {
        ProcessOutcome::TimedOut => Verdict::corrupt(PLAYBACK_TIMED_OUT),
        ProcessOutcome::Completed { success: true, .. } => Verdict::Valid,
        ProcessOutcome::Completed { stderr, .. } => {
            Verdict::corrupt(format!("{}: {}", stage.failure_prefix(), stderr.trim()))
        }
    }
}

/// Turn a duration probe into the midpoint seek offset, or a corrupt verdict.
fn midpoint_from_probe(probe: &DurationProbe) -> std::result::Result<f64, Verdict> {
    match probe {
        DurationProbe::Seconds(seconds) => Ok(seconds / 2.0),
        DurationProbe::Failed(stderr) => Err(Verdict::corrupt(format!(
            "Failed to fetch file duration: {}",
            stderr
        ))),
        DurationProbe::Missing => Err(Verdict::corrupt("Failed to fetch file duration")),
        DurationProbe::TimedOut => Err(Verdict::corrupt(PLAYBACK_TIMED_OUT)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_audio_probe_verdicts() {
        assert_eq!(
            classify_audio_probe(&ProcessOutcome::completed(0, "", "")),
            Verdict::Valid
        );
        assert_eq!(
            classify_audio_probe(&ProcessOutcome::completed(1, "", "  moov atom not found\n")),
            Verdict::corrupt("FFprobe Error: moov atom not found")
        );
        assert_eq!(
            classify_audio_probe(&ProcessOutcome::TimedOut),
            Verdict::corrupt(TIMED_OUT)
        );
    }

    #[test]
    fn test_metadata_probe_distinguishes_invalid_data() {
        let invalid = ProcessOutcome::completed(
            1,
            "",
            "broken.mkv: Invalid data found when processing input\n",
        );
        assert_eq!(
            classify_metadata_probe(&invalid),
            Verdict::corrupt("Invalid data found: broken.mkv: Invalid data found when processing input")
        );

        let other = ProcessOutcome::completed(1, "", "No such file or directory");
        assert_eq!(
            classify_metadata_probe(&other),
            Verdict::corrupt("Metadata validation failed: No such file or directory")
        );
    }

    #[test]
    fn test_playback_stage_messages() {
        let failed = ProcessOutcome::completed(69, "", "error while decoding MB 3 4\n");
        assert_eq!(
            classify_playback(&failed, PlaybackStage::Quick),
            Verdict::corrupt("Playback failed at start: error while decoding MB 3 4")
        );
        assert_eq!(
            classify_playback(&failed, PlaybackStage::Middle),
            Verdict::corrupt("Playback failed at the middle: error while decoding MB 3 4")
        );
        assert_eq!(
            classify_playback(&ProcessOutcome::TimedOut, PlaybackStage::End),
            Verdict::corrupt(PLAYBACK_TIMED_OUT)
        );
    }

    #[test]
    fn test_midpoint_from_probe() {
        assert_eq!(midpoint_from_probe(&DurationProbe::Seconds(120.0)), Ok(60.0));
        assert_eq!(
            midpoint_from_probe(&DurationProbe::Missing),
            Err(Verdict::corrupt("Failed to fetch file duration"))
        );
        assert_eq!(
            midpoint_from_probe(&DurationProbe::Failed("bad header".to_string())),
            Err(Verdict::corrupt("Failed to fetch file duration: bad header"))
        );
        assert_eq!(
            midpoint_from_probe(&DurationProbe::TimedOut),
            Err(Verdict::corrupt(PLAYBACK_TIMED_OUT))
        );
    }

    /// Run the in-depth sequence against canned outcomes, recording every seek.
    async fn indepth_with(
        outcomes: Vec<ProcessOutcome>,
        duration: DurationProbe,
    ) -> (Verdict, Vec<SeekPoint>, bool) {
        let seeks = RefCell::new(Vec::new());
        let probed = Cell::new(false);
        let outcomes = RefCell::new(outcomes.into_iter());

        let verdict = run_indepth(
            |seek| {
                seeks.borrow_mut().push(seek);
                let outcome = outcomes
                    .borrow_mut()
                    .next()
                    .expect("more decodes than outcomes");
                std::future::ready(Ok::<_, crate::Error>(outcome))
            },
            || {
                probed.set(true);
                std::future::ready(Ok::<_, crate::Error>(duration))
            },
            5,
        )
        .await
        .unwrap();

        (verdict, seeks.into_inner(), probed.get())
    }

    #[tokio::test]
    async fn test_indepth_all_samples_pass() {
        let ok = ProcessOutcome::completed(0, "", "");
        let (verdict, seeks, probed) =
            indepth_with(vec![ok.clone(), ok.clone(), ok], DurationProbe::Seconds(90.0)).await;

        assert_eq!(verdict, Verdict::Valid);
        assert!(probed);
        assert_eq!(
            seeks,
            [
                SeekPoint::Offset(0.0),
                SeekPoint::Offset(45.0),
                SeekPoint::FromEnd(5)
            ]
        );
    }

    #[tokio::test]
    async fn test_indepth_stops_at_middle_failure() {
        let ok = ProcessOutcome::completed(0, "", "");
        let broken = ProcessOutcome::completed(1, "", "corrupt packet\n");
        let (verdict, seeks, _) =
            indepth_with(vec![ok, broken], DurationProbe::Seconds(60.0)).await;

        assert_eq!(
            verdict,
            Verdict::corrupt("Playback failed at the middle: corrupt packet")
        );
        assert_eq!(seeks, [SeekPoint::Offset(0.0), SeekPoint::Offset(30.0)]);
    }

    #[tokio::test]
    async fn test_indepth_start_failure_skips_duration_probe() {
        let broken = ProcessOutcome::completed(1, "", "moov atom not found");
        let (verdict, seeks, probed) =
            indepth_with(vec![broken], DurationProbe::Seconds(60.0)).await;

        assert_eq!(
            verdict,
            Verdict::corrupt("Playback failed at the start: moov atom not found")
        );
        assert_eq!(seeks, [SeekPoint::Offset(0.0)]);
        assert!(!probed);
    }

    #[tokio::test]
    async fn test_indepth_duration_timeout() {
        let ok = ProcessOutcome::completed(0, "", "");
        let (verdict, seeks, probed) = indepth_with(vec![ok], DurationProbe::TimedOut).await;

        assert_eq!(verdict, Verdict::corrupt(PLAYBACK_TIMED_OUT));
        assert_eq!(seeks.len(), 1);
        assert!(probed);
    }

    #[tokio::test]
    async fn test_audio_missing_file_short_circuits() {
        let verdict = validate_audio(
            Path::new("/nonexistent/dir/song.mp3"),
            Duration::from_secs(1),
        )
        .await;
        assert_eq!(verdict, Verdict::corrupt("File is empty or does not exist"));
    }

    #[tokio::test]
    async fn test_audio_empty_file_short_circuits() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("empty.flac");
        std::fs::write(&path, b"").unwrap();

        let verdict = validate_audio(&path, Duration::from_secs(1)).await;
        assert_eq!(verdict, Verdict::corrupt("File is empty or does not exist"));
    }
}
