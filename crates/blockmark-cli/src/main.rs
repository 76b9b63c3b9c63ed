use anyhow::{Context, Result, bail};
use blockmark_config::Config;
use blockmark_engine::{Dialect, Options, parse_bytes, snapshot};
use std::{
    env,
    io::{self, Read, Write},
    process,
};

const USAGE: &str = "Usage: blockmark-cli [--json] [--dialect normal|gfm|tables|pedantic] <file|->";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    json: bool,
    dialect: Option<Dialect>,
    input: String,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut json = false;
    let mut dialect = None;
    let mut input = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--dialect" => {
                let name = args.next().context("--dialect needs a value")?;
                dialect = Some(name.parse::<Dialect>()?);
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ if input.is_some() => bail!("more than one input given"),
            _ => input = Some(arg),
        }
    }

    Ok(Args {
        json,
        dialect,
        input: input.context("no input given")?,
    })
}

fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read standard input")?;
        return Ok(bytes);
    }
    std::fs::read(input).with_context(|| format!("Failed to read {input}"))
}

fn options(dialect: Option<Dialect>) -> Result<Options> {
    let config_path = Config::config_path();
    let mut options = match Config::load()? {
        Some(config) => {
            log::info!("Using options from {}", config_path.display());
            config.options
        }
        None => Options::default(),
    };
    if let Some(dialect) = dialect {
        options.set_dialect(dialect);
    }
    Ok(options)
}

fn run(args: Args) -> Result<()> {
    let options = options(args.dialect)?;
    log::info!("Tokenizing {} as {}", args.input, options.dialect());

    let bytes = read_input(&args.input)?;
    let doc = parse_bytes(&bytes, &options)
        .with_context(|| format!("Failed to tokenize {}", args.input))?;

    let mut stdout = io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &doc)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{}", snapshot::outline(&doc.tokens))?;
        for (label, def) in doc.links.iter() {
            match &def.title {
                Some(title) => writeln!(stdout, "[{label}]: {} {title:?}", def.destination)?,
                None => writeln!(stdout, "[{label}]: {}", def.destination)?,
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    run(args)
}
