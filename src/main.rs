use std::{env, fs, path::{Path, PathBuf}, process::ExitCode, time::Instant};

use doc_compare::{CompareError, DocCompare, Hits};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: doc-compare <options>
\tOptions:
\t-k <number of results to print greater than 0>  (10)
\t-s <stopwords document>                         (stopwords.txt)
\t-f <query document> or -q <query document>      (query.txt)
\t-d <data directory>                             (set)";

/// Command line configuration
#[derive(Debug, Clone, PartialEq)]
struct Options {
    /// number of results, validated before any file is read
    k: i64,
    stopwords: PathBuf,
    query: PathBuf,
    docs_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            k: 10,
            stopwords: PathBuf::from("stopwords.txt"),
            query: PathBuf::from("query.txt"),
            docs_dir: PathBuf::from("set"),
        }
    }
}

/// Parse `-x value` pairs
/// `Ok(None)` means help was requested.
fn parse_args<I>(args: I) -> Result<Option<Options>, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();
    while let Some(flag) = args.next() {
        if flag == "-h" || flag == "--help" {
            return Ok(None);
        }
        let Some(value) = args.next() else {
            return Err(format!("{flag} requires a value"));
        };
        match flag.as_str() {
            "-k" => {
                options.k = value.parse().map_err(|_| format!("-k needs an integer, got `{value}`"))?;
            }
            "-s" => options.stopwords = PathBuf::from(value),
            "-f" | "-q" => options.query = PathBuf::from(value),
            "-d" => options.docs_dir = PathBuf::from(value),
            other => return Err(format!("unknown option `{other}`")),
        }
    }
    Ok(Some(options))
}

fn read_source(path: &Path) -> doc_compare::Result<String> {
    fs::read_to_string(path).map_err(|source| CompareError::UnreadableSource {
        name: path.display().to_string(),
        source,
    })
}

/// Regular files directly under `dir`, sorted by path
fn list_documents(dir: &Path) -> doc_compare::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CompareError::NotADirectory(dir.to_path_buf()));
    }
    let entries = fs::read_dir(dir).map_err(|source| CompareError::UnreadableSource {
        name: dir.display().to_string(),
        source,
    })?;
    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => tracing::warn!(target: "doc_compare", error = %e, "Skipping unreadable directory entry"),
        }
    }
    files.sort();
    Ok(files)
}

fn run(options: &Options) -> doc_compare::Result<Hits> {
    // global inputs first, nothing is scored when one of them is bad
    let k = usize::try_from(options.k)
        .ok()
        .filter(|k| *k > 0)
        .ok_or_else(|| CompareError::InvalidArgument("k must be greater than 0.".to_string()))?;
    let stopwords = read_source(&options.stopwords)?;
    let query = read_source(&options.query)?;
    let paths = list_documents(&options.docs_dir)?;

    let load_start = Instant::now();
    let mut compare: DocCompare = DocCompare::new(&query, Some(&stopwords));
    for path in &paths {
        compare.add_source(path.display().to_string(), fs::read_to_string(path));
    }
    tracing::info!(
        target: "doc_compare",
        documents = compare.documents().len(),
        skipped = compare.skipped().len(),
        elapsed_ms = load_start.elapsed().as_secs_f64() * 1000.0,
        "Documents loaded"
    );
    compare.rank(k)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{msg}\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };
    match run(&options) {
        Ok(hits) => {
            print!("{hits}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            ExitCode::FAILURE
        }
    }
}
