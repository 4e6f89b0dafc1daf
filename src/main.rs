use std::{
    env,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    process::ExitCode,
    time::Instant,
};

use tf_idf_retriever::{
    read_postings_cbor, Error, PostingsIndex, Result, Retriever, RetrieverConfig, WeightingScheme,
};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

struct Args {
    index: String,
    queries: String,
    scheme: WeightingScheme,
    prf: bool,
    verbose: bool,
}

fn print_usage() {
    eprintln!(
        "Usage: tf-idf-retriever --index <postings.cbor> --queries <file> \
         [--scheme binary|tf|tfidf] [--prf] [-v]"
    );
    eprintln!("Query lines: <query id> <term> <term> ...  Output: <query id> <doc id>");
}

/// `None` when help was requested.
fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Args>> {
    let mut index = None;
    let mut queries = None;
    let mut scheme = WeightingScheme::default();
    let mut prf = false;
    let mut verbose = false;

    while let Some(a) = args.next() {
        match a.as_str() {
            "--index" => {
                let path = args.next().ok_or(Error::InvalidConfig("--index requires a path"))?;
                index = Some(path);
            }
            "--queries" => {
                let path = args.next().ok_or(Error::InvalidConfig("--queries requires a path"))?;
                queries = Some(path);
            }
            "--scheme" => {
                scheme = args
                    .next()
                    .ok_or(Error::InvalidConfig("--scheme requires a name"))?
                    .parse()?;
            }
            "--prf" => prf = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Ok(None),
            _ => return Err(Error::InvalidConfig("unexpected argument")),
        }
    }

    Ok(Some(Args {
        index: index.ok_or(Error::InvalidConfig("--index is required"))?,
        queries: queries.ok_or(Error::InvalidConfig("--queries is required"))?,
        scheme,
        prf,
        verbose,
    }))
}

/// `<query id> <term> ...`; blank lines are skipped
fn parse_queries(text: &str) -> Vec<(&str, Vec<&str>)> {
    text.lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let qid = fields.next()?;
            Some((qid, fields.collect()))
        })
        .collect()
}

fn run(args: Args) -> Result<()> {
    let load_start = Instant::now();
    let index: PostingsIndex<String> =
        read_postings_cbor(BufReader::new(File::open(&args.index)?))?;
    let config = RetrieverConfig::new(args.scheme).with_prf(args.prf);
    let retriever = Retriever::new(&index, config)?;
    drop(index);
    info!("index loaded in {:.2}ms", load_start.elapsed().as_secs_f64() * 1000.0);

    let text = fs::read_to_string(&args.queries)?;
    let queries = parse_queries(&text);

    let query_start = Instant::now();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (qid, terms) in &queries {
        for doc in retriever.for_query(terms) {
            writeln!(out, "{} {}", qid, doc)?;
        }
    }
    out.flush()?;
    info!(
        "{} queries answered in {:.2}ms",
        queries.len(),
        query_start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args(env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("[error] {}", e);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("[warn] tracing subscriber already set");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
