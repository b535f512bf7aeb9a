use definitions::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::io::BufReader;
use std::io::{BufWriter, Write};
use sv_simulator::evidence::*;
use sv_simulator::History;
#[macro_use]
extern crate log;

fn main() -> std::io::Result<()> {
    let matches = svsim_cli::svsim_commands::svsim_parser().get_matches();
    if let Some(("simulate", sub_m)) = matches.subcommand() {
        let path: &String = sub_m.get_one("profile").unwrap();
        use std::io::Read;
        let mut rdr = std::fs::File::open(path).map(std::io::BufReader::new)?;
        let mut file = String::new();
        rdr.read_to_string(&mut file)?;
        let config: svsim_cli::pipeline::SimulationConfig =
            toml::from_str(&file).map_err(to_io_error)?;
        return svsim_cli::pipeline::run_pipeline(&config);
    }
    if let Some((_, sub_m)) = matches.subcommand() {
        let level = match sub_m.get_count("verbose") {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    }
    match matches.subcommand() {
        Some(("evidence", sub_m)) => evidence(sub_m),
        Some(("compare", sub_m)) => compare(sub_m),
        _ => unreachable!(),
    }
}

/// Either a whole history or a single genome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum GenomeOrHistory {
    History(History),
    Genome(Genome),
}

impl GenomeOrHistory {
    fn into_genome(self) -> Genome {
        match self {
            GenomeOrHistory::History(mut history) => history.genomes.pop().unwrap_or_default(),
            GenomeOrHistory::Genome(genome) => genome,
        }
    }
}

fn to_io_error<E: std::error::Error + Send + Sync + 'static>(why: E) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, why)
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &str) -> std::io::Result<T> {
    debug!("OPEN\t{path}");
    let rdr = std::fs::File::open(path).map(BufReader::new)?;
    serde_json::de::from_reader(rdr).map_err(to_io_error)
}

fn parse_genome(path: &str) -> std::io::Result<Genome> {
    parse_json::<GenomeOrHistory>(path).map(GenomeOrHistory::into_genome)
}

fn evidence(matches: &clap::ArgMatches) -> std::io::Result<()> {
    debug!("START\tEvidence");
    let reference: &String = matches.get_one("reference").unwrap();
    let history: &String = matches.get_one("history").unwrap();
    let reference = parse_genome(reference)?;
    let genome = parse_genome(history)?;
    let mut ref_adjacencies = HashSet::new();
    get_adjacencies_from_genome(&reference, true, &mut ref_adjacencies);
    let adjacencies = get_adjacencies_from_genome(&genome, false, &mut ref_adjacencies);
    let segments = get_scn_profile_from_genome(&genome);
    let telomeres = get_telomeres_from_genome(&genome);
    let (_, novel) = get_novel_adjacencies(&reference, &genome);
    info!(
        "EVIDENCE\t{}\t{}\t{}\t{}",
        adjacencies.len(),
        novel.len(),
        segments.len(),
        telomeres.len()
    );
    let output: Option<&String> = matches.get_one("output");
    let mut wtr: BufWriter<Box<dyn Write>> = match output {
        Some(path) => BufWriter::new(Box::new(std::fs::File::create(path)?)),
        None => BufWriter::new(Box::new(std::io::stdout())),
    };
    let mut adjacency_lines: Vec<_> = adjacencies
        .iter()
        .flat_map(|(id, phased)| {
            phased.iter().map(move |(phasing, occs)| {
                let adj_type = occs[0].adjacency_type;
                (*id, *phasing, adj_type, occs.copy_number())
            })
        })
        .collect();
    adjacency_lines.sort_by_key(|&(id, phasing, _, _)| (id, phasing));
    for (id, phasing, adj_type, cn) in adjacency_lines {
        writeln!(wtr, "ADJ\t{id}\t{phasing:?}\t{adj_type:?}\t{cn}")?;
    }
    let mut segment_lines: Vec<_> = segments
        .iter()
        .flat_map(|(id, haps)| haps.iter().map(move |(hap, occs)| (*id, *hap, occs.len())))
        .collect();
    segment_lines.sort();
    for (id, hap, cn) in segment_lines {
        writeln!(wtr, "SEG\t{id}\t{hap:?}\t{cn}")?;
    }
    for telomere in telomeres {
        writeln!(wtr, "TEL\t{telomere}")?;
    }
    wtr.flush()
}

/// An inferred copy number of an adjacency with a phasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InferredCopyNumber {
    adjacency: AdjacencyId,
    phasing: Phasing,
    copy_number: usize,
}

/// Inferred adjacency copy numbers, given either directly or as a genome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Inferred {
    CopyNumbers(Vec<InferredCopyNumber>),
    Genome(GenomeOrHistory),
}

impl Inferred {
    fn into_copy_numbers(
        self,
        ref_adjacencies: &mut HashSet<AdjacencyId>,
    ) -> AdjacencyCopyNumbers {
        match self {
            Inferred::CopyNumbers(records) => {
                let mut profile: AdjacencyCopyNumbers = HashMap::new();
                for record in records {
                    *profile
                        .entry(record.adjacency)
                        .or_default()
                        .entry(record.phasing)
                        .or_default() += record.copy_number;
                }
                profile
            }
            Inferred::Genome(genome) => {
                let genome = genome.into_genome();
                to_copy_numbers(&get_adjacencies_from_genome(&genome, false, ref_adjacencies))
            }
        }
    }
}

fn compare(matches: &clap::ArgMatches) -> std::io::Result<()> {
    debug!("START\tCompare");
    let reference: &String = matches.get_one("reference").unwrap();
    let truth: &String = matches.get_one("truth").unwrap();
    let inferred: &String = matches.get_one("inferred").unwrap();
    let reference = parse_genome(reference)?;
    let truth = parse_genome(truth)?;
    let inferred: Inferred = parse_json(inferred)?;
    let mut ref_adjacencies = HashSet::new();
    get_adjacencies_from_genome(&reference, true, &mut ref_adjacencies);
    let truth = get_adjacencies_from_genome(&truth, false, &mut ref_adjacencies);
    let inferred_cn = inferred.into_copy_numbers(&mut ref_adjacencies);
    let present = get_correctly_inferred_present_unphased_adjacencies(&truth, &inferred_cn);
    let absent = get_correctly_inferred_absent_unphased_adjacencies(&truth, &inferred_cn);
    let present_absent =
        get_correctly_inferred_present_absent_unphased_adjacencies(&truth, &inferred_cn);
    let exact = get_correctly_inferred_unphased_adjacencies(&truth, &inferred_cn);
    let total: HashSet<_> = truth.keys().chain(inferred_cn.keys()).collect();
    let stdout = std::io::stdout();
    let mut wtr = BufWriter::new(stdout.lock());
    writeln!(wtr, "TOTAL\t{}", total.len())?;
    writeln!(wtr, "PRESENT\t{}", present.len())?;
    writeln!(wtr, "ABSENT\t{}", absent.len())?;
    writeln!(wtr, "PRESENT_ABSENT\t{}", present_absent.len())?;
    writeln!(wtr, "EXACT\t{}", exact.len())?;
    wtr.flush()
}
