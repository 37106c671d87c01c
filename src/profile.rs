use crate::database::{parse_database, Database};
use crate::repeats::{Profiler, RunError};
use crate::suspects::{Suspect, Verdict};
use crate::Cli;
use human_sort::compare as human_compare;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::error::Error;
use std::path::Path;

/// Match every suspect in the database against the sequence and print the verdicts
pub fn profile_suspects(args: &Cli) -> Result<(), Box<dyn Error>> {
    let seq = crate::utils::read_sequence(&args.sequence, args.uppercase, args.verbatim)?;
    let profiler = Profiler::new(seq);
    info!("Read sequence of {} bases", profiler.seq().len());

    let database = load_database(&args.database)?;
    info!(
        "Matching {} suspects on {} motifs",
        database.suspects.len(),
        database.motifs.len()
    );

    if args.profile {
        let name = sample_name(&args.sequence);
        println!("{}", profile_table(&profiler, &database.motifs, &name)?);
    }

    let mut verdicts = match_suspects(&profiler, &database.suspects, args.threads)?;
    if args.sorted {
        verdicts.sort_by(|a, b| human_compare(&a.name, &b.name));
    }

    let guilty = verdicts.iter().filter(|v| v.matched).count();
    match guilty {
        0 => warn!("No suspect matches the sequence"),
        1 => info!("1 suspect matches the sequence"),
        n => warn!("{n} suspects match the sequence"),
    }

    for verdict in verdicts
        .iter()
        .filter(|verdict| verdict.matched || !args.guilty_only)
    {
        println!("{verdict}");
    }
    Ok(())
}

fn load_database(filename: &str) -> Result<Database, Box<dyn Error>> {
    let reader = crate::utils::reader(filename)
        .map_err(|err| format!("couldn't open {filename}: {err}"))?;
    Ok(parse_database(reader)?)
}

/// Verdicts in the same order as <suspects>, regardless of the number of threads
pub fn match_suspects(
    profiler: &Profiler,
    suspects: &[Suspect],
    threads: usize,
) -> Result<Vec<Verdict>, Box<dyn Error>> {
    if threads > 1 {
        debug!("Matching suspects with {threads} threads");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        let verdicts = pool.install(|| {
            suspects
                .par_iter()
                .map(|suspect| profiler.verdict(suspect))
                .collect::<Result<Vec<Verdict>, RunError>>()
        })?;
        Ok(verdicts)
    } else {
        // When running single threaded no pool is set up at all
        Ok(suspects
            .iter()
            .map(|suspect| profiler.verdict(suspect))
            .collect::<Result<Vec<Verdict>, RunError>>()?)
    }
}

/// Basename of the sequence file without extension, ignoring a trailing `.gz`
fn sample_name(filename: &str) -> String {
    let path = Path::new(filename.strip_suffix(".gz").unwrap_or(filename));
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("sequence")
        .to_string()
}

/// CSV header and a single row with the observed longest run per motif, in database column order
pub fn profile_table(
    profiler: &Profiler,
    motifs: &[String],
    name: &str,
) -> Result<String, RunError> {
    let observed = profiler.profile(motifs.iter().map(String::as_str))?;
    let counts = motifs
        .iter()
        .map(|motif| observed.get(motif).copied().unwrap_or_default().to_string())
        .collect::<Vec<String>>();
    Ok(format!(
        "name,{}\n{name},{}",
        motifs.join(","),
        counts.join(",")
    ))
}
