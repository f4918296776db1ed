use std::path::Path;

use fairway_golf::scoring::{BestScore, ParseBestScoreError};

/// Failure reading or writing the best-score file.
#[derive(Debug)]
pub enum ScoreStoreError {
    Io(std::io::Error),
    Parse(ParseBestScoreError),
}

impl std::fmt::Display for ScoreStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "best score file: {e}"),
            Self::Parse(e) => write!(f, "best score file: {e}"),
        }
    }
}

impl std::error::Error for ScoreStoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ScoreStoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseBestScoreError> for ScoreStoreError {
    fn from(e: ParseBestScoreError) -> Self {
        Self::Parse(e)
    }
}

/// Read the stored best. A missing file means no best yet.
pub fn load(path: &Path) -> Result<BestScore, ScoreStoreError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content.parse()?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BestScore::NONE),
        Err(e) => Err(e.into()),
    }
}

pub fn save(path: &Path, best: BestScore) -> Result<(), ScoreStoreError> {
    std::fs::write(path, format!("{best}\n"))?;
    Ok(())
}

/// Fold a finished hole into the stored best. An unreadable file is treated as
/// empty and overwritten. Returns the best after recording.
pub fn record(path: &Path, strokes: u32) -> Result<BestScore, ScoreStoreError> {
    let mut best = load(path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Discarding unreadable best score");
        BestScore::NONE
    });
    if best.record(strokes) {
        save(path, best)?;
        tracing::info!(path = %path.display(), %best, "New best score");
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_no_best() {
        let dir = tempfile::tempdir().unwrap();
        let best = load(&dir.path().join("best.txt")).unwrap();
        assert_eq!(best, BestScore::NONE);
    }

    #[test]
    fn reads_number_and_sentinel() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "4").unwrap();
        assert_eq!(load(file.path()).unwrap(), BestScore::new(4));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "none").unwrap();
        assert_eq!(load(file.path()).unwrap(), BestScore::NONE);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "lots").unwrap();
        assert!(matches!(load(file.path()), Err(ScoreStoreError::Parse(_))));
    }

    #[test]
    fn record_keeps_minimum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.txt");

        assert_eq!(record(&path, 5).unwrap(), BestScore::new(5));
        assert_eq!(record(&path, 7).unwrap(), BestScore::new(5));
        assert_eq!(record(&path, 3).unwrap(), BestScore::new(3));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3\n");
    }

    #[test]
    fn record_replaces_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.txt");
        std::fs::write(&path, "corrupt").unwrap();
        assert_eq!(record(&path, 6).unwrap(), BestScore::new(6));
        assert_eq!(load(&path).unwrap(), BestScore::new(6));
    }
}
