use clap::{Arg, Command};
use std::env;
use std::path::PathBuf;
use term_annotator::{DEFAULT_TARGET_LOCALE, Enricher, TermDictionary};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DICTIONARY_ENV: &str = "TERM_DICTIONARY";
const BUNDLED_DICTIONARY: &str = include_str!("../../../dictionaries/android_kotlin_tr.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("term-annotate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Annotate dictionary terms in a translation with their source-language form")
        .arg(
            Arg::new("source")
                .help("Original (source-language) text")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("translated")
                .help("Translated (target-language) text")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("dictionary")
                .long("dictionary")
                .short('d')
                .help("Path to a JSON term dictionary (default: $TERM_DICTIONARY, then the bundled one)"),
        )
        .arg(
            Arg::new("locale")
                .long("locale")
                .short('l')
                .help("Target locale used for case mapping")
                .default_value(DEFAULT_TARGET_LOCALE),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print both outputs as a JSON object")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log dictionary loading and matching decisions")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    init_tracing(verbose);

    let source_text = matches
        .get_one::<String>("source")
        .map(String::as_str)
        .unwrap_or_default();
    let translated_text = matches
        .get_one::<String>("translated")
        .map(String::as_str)
        .unwrap_or_default();
    let locale = matches
        .get_one::<String>("locale")
        .map(String::as_str)
        .unwrap_or(DEFAULT_TARGET_LOCALE);

    let dictionary_path = matches
        .get_one::<String>("dictionary")
        .map(PathBuf::from)
        .or_else(|| env::var(DICTIONARY_ENV).ok().map(PathBuf::from));

    let dictionary = match &dictionary_path {
        Some(path) => {
            info!("Loading dictionary from {}", path.display());
            TermDictionary::from_file(path)
        }
        None => {
            info!("Using bundled dictionary");
            TermDictionary::from_json_str(BUNDLED_DICTIONARY)
        }
    };
    let dictionary = match dictionary {
        Ok(dictionary) => dictionary,
        Err(e) => {
            eprintln!("❌ Failed to load dictionary: {}", e);
            return Err(e.into());
        }
    };
    info!("{} terms loaded", dictionary.len());

    let mut enricher = Enricher::new(dictionary);
    enricher.with_locale(locale)?;

    let result = enricher.enrich(source_text, translated_text);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.enriched_translation);
        println!("{}", result.enriched_source);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
