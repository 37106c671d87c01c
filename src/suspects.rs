use crate::repeats::{Profiler, RunError};
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Expected longest run per motif
pub type Fingerprint = HashMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspect {
    pub name: String,
    pub fingerprint: Fingerprint,
}

impl Suspect {
    pub fn new(name: impl Into<String>, fingerprint: Fingerprint) -> Suspect {
        Suspect {
            name: name.into(),
            fingerprint,
        }
    }
}

impl Profiler {
    /// True if every motif in <fingerprint> has exactly the expected longest run in the sequence
    /// An empty fingerprint always matches, negative counts never do
    pub fn match_suspect(&self, name: &str, fingerprint: &Fingerprint) -> Result<bool, RunError> {
        for (motif, expected) in fingerprint {
            let observed = self.longest_run(motif)? as i64;
            if observed != *expected {
                debug!("{name}: {motif} observed {observed}, expected {expected}");
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn verdict(&self, suspect: &Suspect) -> Result<Verdict, RunError> {
        Ok(Verdict {
            name: suspect.name.clone(),
            matched: self.match_suspect(&suspect.name, &suspect.fingerprint)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub name: String,
    pub matched: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.matched {
            write!(f, "{} guilty", self.name)
        } else {
            write!(f, "{} innocent", self.name)
        }
    }
}
