use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;

use crate::host::AudioError;

/// Duration of the audio file at `path`, read from its headers.
pub fn probe_duration(path: &Path) -> Result<Duration, AudioError> {
    let tagged = lofty::read_from_path(path).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(tagged.properties().duration())
}
