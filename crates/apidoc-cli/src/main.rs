use apidoc::render::{DocError, DocSite, PageOutcome};
use apidoc::{Catalog, IntegrityReport, MethodFilter, SearchQuery, SiteConfig};
use serde_json::json;
use std::path::{Path, PathBuf};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Catalog(apidoc::Error),
    Render(DocError),
    Json(serde_json::Error),
    Integrity(usize),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Catalog(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Integrity(n) => write!(f, "catalog has {n} integrity finding(s)"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<apidoc::Error> for CliError {
    fn from(value: apidoc::Error) -> Self {
        Self::Catalog(value)
    }
}

impl From<DocError> for CliError {
    fn from(value: DocError) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Validate,
    Render,
    Page,
    Search,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    catalog: Option<String>,
    token: Option<String>,
    text: Option<String>,
    method: MethodFilter,
    config: Option<String>,
    out: Option<String>,
    json: bool,
    strict: bool,
}

fn usage() -> &'static str {
    "apidoc-cli\n\
\n\
USAGE:\n\
  apidoc-cli validate [--json] [--strict] <catalog>\n\
  apidoc-cli render [--config <file>] --out <dir> <catalog>\n\
  apidoc-cli page [--config <file>] [--out <path>] <catalog> <ep-id>\n\
  apidoc-cli search [--method <METHOD>] [--json] <catalog> [<text>]\n\
\n\
NOTES:\n\
  - <catalog> is a .json, .yaml or .yml catalog file.\n\
  - --config merges a .json/.yaml site config over the defaults.\n\
  - validate exits with status 3 under --strict when the catalog has integrity findings.\n\
  - page prints the HTML document to stdout unless --out is given; unknown ids render the\n\
    not-found page.\n\
  - Set APIDOC_LOG (e.g. APIDOC_LOG=debug) to control log output on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut command: Option<Command> = None;
    let mut positional: Vec<String> = Vec::new();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--json" => args.json = true,
            "--strict" => args.strict = true,
            "--method" => {
                let Some(m) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let Ok(filter) = m.parse::<MethodFilter>();
                args.method = filter;
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            word if command.is_none() => {
                command = Some(match word {
                    "validate" => Command::Validate,
                    "render" => Command::Render,
                    "page" => Command::Page,
                    "search" => Command::Search,
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            value => positional.push(value.to_string()),
        }
    }

    let Some(command) = command else {
        return Err(CliError::Usage(usage()));
    };
    args.command = command;

    let mut positional = positional.into_iter();
    args.catalog = positional.next();
    if args.catalog.is_none() {
        return Err(CliError::Usage(usage()));
    }
    match command {
        Command::Page => {
            args.token = positional.next();
            if args.token.is_none() {
                return Err(CliError::Usage(usage()));
            }
        }
        Command::Search => args.text = positional.next(),
        Command::Validate => {}
        Command::Render => {
            if args.out.is_none() {
                return Err(CliError::Usage(usage()));
            }
        }
    }
    if positional.next().is_some() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("APIDOC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn load_config(path: Option<&str>) -> Result<SiteConfig, CliError> {
    match path {
        None => Ok(SiteConfig::default()),
        Some(path) => Ok(SiteConfig::load(path)?),
    }
}

fn print_report(catalog: &Catalog, report: &IntegrityReport) {
    println!("{} endpoint(s)", catalog.len());
    if report.is_clean() {
        println!("ok");
        return;
    }
    for d in &report.dangling {
        println!("dangling: {} -> {}", d.owner, d.id);
    }
    for name in &report.unknown_popup_sources {
        println!("unknown popup source: {name}");
    }
    for (id, placeholder) in &report.undocumented_path_params {
        println!("undocumented path parameter: {id} {{{placeholder}}}");
    }
}

fn finding_count(report: &IntegrityReport) -> usize {
    report.dangling.len()
        + report.unknown_popup_sources.len()
        + report.undocumented_path_params.len()
}

fn write_site(site: &DocSite, out_dir: &Path) -> Result<usize, CliError> {
    let files = site.site_files()?;
    std::fs::create_dir_all(out_dir)?;
    for file in &files {
        let path = out_dir.join(&file.path);
        std::fs::write(&path, &file.contents)?;
        tracing::debug!(path = %path.display(), "wrote page");
    }
    Ok(files.len())
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(catalog_path) = args.catalog.as_deref() else {
        return Err(CliError::Usage(usage()));
    };

    match args.command {
        Command::Validate => {
            let catalog = Catalog::load(catalog_path)?;
            let report = catalog.integrity_report();
            if args.json {
                let out = json!({ "records": catalog.len(), "report": report });
                serde_json::to_writer_pretty(std::io::stdout().lock(), &out)?;
                println!();
            } else {
                print_report(&catalog, &report);
            }
            if args.strict && !report.is_clean() {
                return Err(CliError::Integrity(finding_count(&report)));
            }
            Ok(())
        }
        Command::Render => {
            let site = DocSite::load(catalog_path, load_config(args.config.as_deref())?)?;
            let out_dir = PathBuf::from(args.out.as_deref().unwrap_or("site"));
            let written = write_site(&site, &out_dir)?;
            println!("wrote {written} file(s) to {}", out_dir.display());
            Ok(())
        }
        Command::Page => {
            let site = DocSite::load(catalog_path, load_config(args.config.as_deref())?)?;
            let token = args.token.as_deref().unwrap_or_default();
            if let PageOutcome::NotFound { id } = site.outcome(token)? {
                tracing::warn!(%id, "no endpoint with this id");
            }
            let html = site.page_html(token)?;
            match args.out.as_deref() {
                None => print!("{html}"),
                Some(path) => std::fs::write(path, html)?,
            }
            Ok(())
        }
        Command::Search => {
            let catalog = Catalog::load(catalog_path)?;
            let query = SearchQuery::new(args.text.as_deref().unwrap_or_default(), args.method);
            let hits = query.filter(&catalog);
            if args.json {
                serde_json::to_writer_pretty(std::io::stdout().lock(), &hits)?;
                println!();
            } else {
                for record in &hits {
                    println!(
                        "{:<7} {}  ({})",
                        record.method.as_str(),
                        record.path,
                        record.route_token()
                    );
                }
            }
            Ok(())
        }
    }
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Integrity(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
