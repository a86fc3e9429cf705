//! Reference-recording tooling for the CLI

use std::path::{Path, PathBuf};

use ai_speech::{AudioProbe, SamplePreparer, SpeechConfig};
use domain::VoiceProfile;

/// Probe a recording, print its profile and suitability report.
/// Returns whether the recording passed every guideline.
pub async fn check(config: &SpeechConfig, file: &Path) -> anyhow::Result<bool> {
    let probe = AudioProbe::from_config(config);
    let profile = probe
        .probe(file)
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("🔍 Analyzing: {}", file.display());
    print_profile(&profile);

    let report = profile.suitability();
    if report.is_suitable() {
        println!("✅ Recording looks good as a voice reference");
        return Ok(true);
    }

    println!("⚠️  Issues:");
    for issue in &report.issues {
        println!("   - {issue}");
    }
    println!("💡 Recommendations:");
    for recommendation in &report.recommendations {
        println!("   - {recommendation}");
    }

    Ok(false)
}

/// Normalize a recording into the prepared-sample format and report the
/// output path.
pub async fn prepare(
    config: &SpeechConfig,
    file: &Path,
    output: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    let preparer = SamplePreparer::from_config(config);

    println!("🔄 Preparing: {}", file.display());

    let out = match output {
        Some(path) => preparer.prepare_to(file, path).await,
        None => preparer.prepare(file).await,
    }
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("✅ Prepared sample written to {}", out.display());
    println!("   Use it with: maitre chat (speech.reference_audio in config.toml)");
    println!("   or switch live with: /voice {}", out.display());

    Ok(out)
}

fn print_profile(profile: &VoiceProfile) {
    println!("📊 Voice profile:");
    println!("   Sample rate: {} Hz", profile.sample_rate);
    println!("   Duration: {:.1}s", profile.duration_secs);
    println!("   Channels: {}", profile.channels);
    match profile.bit_rate {
        Some(rate) => println!("   Bit rate: {rate} bps"),
        None => println!("   Bit rate: unknown"),
    }
    println!(
        "   Matched voice: {} at {} wpm",
        profile.preferred_voice(),
        profile.speaking_rate()
    );
}
