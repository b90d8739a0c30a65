// In app/src/samples.rs

use anyhow::{Context, Result};
use core_types::Sample;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads samples from a JSON Lines file, one `Sample` object per line.
pub fn load_samples(path: &Path) -> Result<Vec<Sample>> {
    let file = File::open(path).with_context(|| format!("Failed to open samples file {}", path.display()))?;

    let mut samples = Vec::new();
    let stream = serde_json::Deserializer::from_reader(BufReader::new(file)).into_iter::<Sample>();
    for (index, sample) in stream.enumerate() {
        let sample = sample.with_context(|| format!("Malformed sample #{} in {}", index + 1, path.display()))?;
        samples.push(sample);
    }

    tracing::info!(count = samples.len(), path = %path.display(), "Loaded samples.");
    Ok(samples)
}
