use crate::collision::CollisionCheck;
use crate::error::OrganizeError;
use crate::resolver::FallbackPolicy;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Answers accepted by the confirmation prompt, compared lowercased
const AFFIRMATIVE: [&str; 4] = ["", "y", "ye", "yes"];

/// What happens to a source file once its destination is known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl TransferMode {
    /// Progress verb, e.g. `copying a -> b`
    pub fn verb(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copying",
            TransferMode::Move => "moving",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copied",
            TransferMode::Move => "moved",
        }
    }
}

/// Settings for one run, fixed before any file is touched
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizerConfig {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: TransferMode,
    pub fallback_policy: FallbackPolicy,
    pub collision_check: CollisionCheck,
}

impl OrganizerConfig {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            mode: TransferMode::default(),
            fallback_policy: FallbackPolicy::default(),
            collision_check: CollisionCheck::default(),
        }
    }

    pub fn with_mode(mut self, mode: TransferMode) -> Self {
        self.mode = mode;
        self
    }

    /// Checks that both roots are existing directories, reporting every miss.
    pub fn validate(&self) -> Result<(), Vec<OrganizeError>> {
        let errors: Vec<OrganizeError> = [&self.source, &self.destination]
            .into_iter()
            .filter(|path| !path.is_dir())
            .map(|path| OrganizeError::Directory { path: path.clone() })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Only the line terminator is stripped; surrounding spaces make an answer negative.
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim_end_matches(['\r', '\n']).to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

/// Asks `continue? [Y/n]` and reads one line of answer.
///
/// End of input counts as a refusal.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    write!(output, "continue? [Y/n]").context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    let read = input
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    if read == 0 {
        return Ok(false);
    }
    Ok(is_affirmative(&answer))
}
