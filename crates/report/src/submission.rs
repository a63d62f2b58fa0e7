//! Submission payloads and the sinks that deliver them.
//!
//! Payloads serialize as one flat JSON object tagged by `type`:
//!
//! ```text
//! {"type":"lead","name":"Asha","phone":"9876543210"}
//! {"type":"score","name":"Asha","phone":"9876543210","score":6,"flips":22,"elapsed":73,"generation":1}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Lead {
        name: String,
        phone: String,
    },
    Score {
        name: String,
        phone: String,
        score: usize,
        flips: u32,
        elapsed: u32,
        generation: u64,
    },
}

impl Submission {
    pub fn lead(user: &User) -> Self {
        Submission::Lead {
            name: user.name.clone(),
            phone: user.phone.clone(),
        }
    }

    pub fn score(user: &User, score: usize, flips: u32, elapsed: u32, generation: u64) -> Self {
        Submission::Score {
            name: user.name.clone(),
            phone: user.phone.clone(),
            score,
            flips,
            elapsed,
            generation,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Lead { .. } => "lead",
            Submission::Score { .. } => "score",
        }
    }
}

/// Destination for submissions
///
/// Runs on the reporter's blocking worker, never on the game loop.
pub trait Submitter: Send + 'static {
    fn submit(&mut self, submission: &Submission) -> anyhow::Result<()>;
}

/// Accepts and drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSubmitter;

impl Submitter for NullSubmitter {
    fn submit(&mut self, _submission: &Submission) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Appends one JSON object per line to a file
#[derive(Debug)]
pub struct JsonLinesSubmitter {
    path: PathBuf,
    out: BufWriter<File>,
}

impl JsonLinesSubmitter {
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("open submission log {}", path.display()))?;
        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Submitter for JsonLinesSubmitter {
    fn submit(&mut self, submission: &Submission) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, submission)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            name: "Asha".to_string(),
            phone: "9876543210".to_string(),
        }
    }

    #[test]
    fn test_lead_wire_shape() {
        let json = serde_json::to_value(Submission::lead(&user())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "lead", "name": "Asha", "phone": "9876543210"})
        );
    }

    #[test]
    fn test_score_wire_shape() {
        let json = serde_json::to_value(Submission::score(&user(), 6, 22, 73, 2)).unwrap();
        assert_eq!(json["type"], "score");
        assert_eq!(json["score"], 6);
        assert_eq!(json["flips"], 22);
        assert_eq!(json["elapsed"], 73);
        assert_eq!(json["generation"], 2);
    }

    #[test]
    fn test_json_lines_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.jsonl");

        let mut sink = JsonLinesSubmitter::open(&path).unwrap();
        sink.submit(&Submission::lead(&user())).unwrap();
        sink.submit(&Submission::score(&user(), 8, 16, 40, 1)).unwrap();
        drop(sink);

        let mut sink = JsonLinesSubmitter::open(&path).unwrap();
        assert_eq!(sink.path(), path.as_path());
        sink.submit(&Submission::score(&user(), 3, 30, 95, 2)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let kinds: Vec<String> = text
            .lines()
            .map(|line| {
                serde_json::from_str::<Submission>(line)
                    .unwrap()
                    .kind()
                    .to_string()
            })
            .collect();
        assert_eq!(kinds, ["lead", "score", "score"]);
    }

    #[test]
    fn test_null_submitter_accepts_everything() {
        assert!(NullSubmitter.submit(&Submission::lead(&user())).is_ok());
    }
}
