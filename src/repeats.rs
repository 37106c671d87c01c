use crate::suspects::Fingerprint;
use log::debug;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    EmptyMotif,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunError::EmptyMotif => write!(f, "Invalid argument: motif must not be empty"),
        }
    }
}

impl Error for RunError {}

/// A DNA sequence used to profile suspects.
/// The sequence is never modified after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiler {
    seq: String,
}

impl Profiler {
    pub fn new(seq: impl Into<String>) -> Profiler {
        Profiler { seq: seq.into() }
    }

    pub fn seq(&self) -> &str {
        &self.seq
    }

    pub fn longest_run(&self, motif: &str) -> Result<usize, RunError> {
        longest_run(&self.seq, motif)
    }

    /// Observed longest run for every motif, e.g. to print the profile of a sequence
    pub fn profile<'a, I>(&self, motifs: I) -> Result<Fingerprint, RunError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        motifs
            .into_iter()
            .map(|motif| {
                self.longest_run(motif)
                    .map(|run| (motif.to_string(), run as i64))
            })
            .collect()
    }
}

/// Return the longest number of back-to-back repetitions of <motif> in <seq>
/// A run is tiled greedily: after a run ends, scanning resumes right after the last copy,
/// so a run is never re-discovered from one base further along.
/// Returns 0 if the motif does not occur at all, including when it is longer than the sequence.
pub fn longest_run(seq: &str, motif: &str) -> Result<usize, RunError> {
    if motif.is_empty() {
        return Err(RunError::EmptyMotif);
    }
    // comparing bytes is safe for any UTF-8 text: a complete motif can only match on a char boundary
    let seq = seq.as_bytes();
    let motif = motif.as_bytes();
    let step = motif.len();
    let mut max_run = 0;
    let mut i = 0;

    while i + step <= seq.len() {
        let mut count = 0;
        while i + step <= seq.len() && &seq[i..i + step] == motif {
            count += 1;
            i += step;
        }
        if count > max_run {
            max_run = count;
        }
        if count == 0 {
            i += 1;
        }
    }
    debug!(
        "Longest run of {} is {max_run}",
        String::from_utf8_lossy(motif)
    );
    Ok(max_run)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ1: &str = "AACCCTGCGCGCGCGCGATCTATCTATCTATCTATCCAGCATTAGCTAGCATCAAGATAGATAGATGAATTTCGAAATGAATGAATGAATGAATGAATGAATG";
    const SEQ2: &str = "CCAGATAGATAGATAGATAGATAGATGTCACAGGGATGCTGAGGGCTGCTTCGTACGTACTCCTGATTTCGGGGATCGCTGACACTAATGCGTGCGAGCGGATCGATCTCTATCTATCTATCTATCTATCCTATAGCATAGACATCCAGATAGATAGATC";

    #[test]
    fn test_longest_run_short_sequence() {
        let p = Profiler::new("CTAGATAGATAGATAGATGACTA");
        assert_eq!(p.longest_run("AGAT"), Ok(4));
    }

    #[test]
    fn test_longest_run_seq1() {
        let p = Profiler::new(SEQ1);
        assert_eq!(p.longest_run("AGAT"), Ok(3));
        assert_eq!(p.longest_run("AATG"), Ok(7));
        assert_eq!(p.longest_run("TATC"), Ok(4));
    }

    #[test]
    fn test_longest_run_seq2() {
        let p = Profiler::new(SEQ2);
        assert_eq!(p.longest_run("AGAT"), Ok(6));
        assert_eq!(p.longest_run("AATG"), Ok(1));
        assert_eq!(p.longest_run("TATC"), Ok(5));
    }

    #[test]
    fn test_empty_motif() {
        assert_eq!(longest_run("AGAT", ""), Err(RunError::EmptyMotif));
        assert_eq!(longest_run("", ""), Err(RunError::EmptyMotif));
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(Profiler::new("").longest_run("A"), Ok(0));
    }

    #[test]
    fn test_motif_longer_than_sequence() {
        assert_eq!(longest_run("AG", "AGAT"), Ok(0));
    }

    #[test]
    fn test_motif_absent() {
        assert_eq!(longest_run("CCCCCCCC", "AGAT"), Ok(0));
    }

    #[test]
    fn test_single_occurrence() {
        assert_eq!(longest_run("CCAGATCC", "AGAT"), Ok(1));
    }

    #[test]
    fn test_exact_tiling() {
        assert_eq!(longest_run(&"xyz".repeat(3), "xyz"), Ok(3));
        assert_eq!(longest_run(&"AGAT".repeat(12), "AGAT"), Ok(12));
    }

    // the remainder of an overlapping stretch is not counted
    #[test]
    fn test_non_overlapping_tiling() {
        assert_eq!(longest_run("AAA", "AA"), Ok(1));
        assert_eq!(longest_run("AAAA", "AA"), Ok(2));
        assert_eq!(longest_run("AAAAA", "AA"), Ok(2));
        assert_eq!(longest_run("ATATA", "ATA"), Ok(1));
    }

    // an occurrence overlapping the tail of a run is skipped, the run itself still counts
    #[test]
    fn test_occurrence_hidden_by_run() {
        assert_eq!(longest_run("ABABAB", "ABAB"), Ok(1));
        assert_eq!(longest_run("AAAAA", "AAA"), Ok(1));
        assert_eq!(longest_run("ATATAGATA", "ATA"), Ok(1));
    }

    const SEQS: [&str; 10] = [
        "",
        "A",
        "AAA",
        "AAAAA",
        "ATATATA",
        "ABABABAB",
        "ABABAABAB",
        "CTAGATAGATAGATAGATGACTA",
        "AATGAATGCCAATGAATGAATG",
        "GATTACA",
    ];
    const MOTIFS: [&str; 12] = [
        "A", "AA", "AAA", "ATA", "AB", "ABAB", "BA", "AGAT", "AATG", "TATC", "GATTACA", "ACAG",
    ];

    #[test]
    fn test_zero_iff_absent() {
        for seq in SEQS {
            for motif in MOTIFS {
                let run = longest_run(seq, motif).unwrap();
                assert_eq!(run == 0, !seq.contains(motif), "{motif} in {seq}");
            }
        }
    }

    #[test]
    fn test_back_to_back_copies() {
        for motif in MOTIFS {
            for k in 0..10 {
                assert_eq!(longest_run(&motif.repeat(k), motif), Ok(k), "{k} x {motif}");
            }
        }
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(longest_run("ÄGÄGxÄG", "ÄG"), Ok(2));
    }

    #[test]
    fn test_longest_run_is_deterministic() {
        let p = Profiler::new(SEQ1);
        let first = p.longest_run("AATG");
        assert_eq!(first, p.longest_run("AATG"));
        assert_eq!(p.seq(), SEQ1);
    }

    #[test]
    fn test_profile() {
        let p = Profiler::new(SEQ1);
        let profile = p.profile(["AGAT", "AATG", "TATC"]).expect("Unable to profile");
        assert_eq!(profile.get("AGAT"), Some(&3));
        assert_eq!(profile.get("AATG"), Some(&7));
        assert_eq!(profile.get("TATC"), Some(&4));
        assert!(p.profile([""]).is_err());
    }
}
