use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_i18n::{ArrayStore, LangSpec, SqlStore, SqlStoreConfig, Store, Token, Translator};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "token-i18n", version, about = "Look up multilingual message tokens")]
struct Cli {
    /// JSON token file: {"tag": {"lang": "message"}}
    #[arg(long, conflicts_with = "sqlite", required_unless_present = "sqlite")]
    json: Option<PathBuf>,

    /// SQLite database holding the tokens table
    #[arg(long)]
    sqlite: Option<PathBuf>,

    /// Tokens table (default: $I18N_TOKENS_TABLE or "tokens")
    #[arg(long)]
    table: Option<String>,

    /// Tag column (default: $I18N_TAG_COLUMN or "tag")
    #[arg(long)]
    tag_column: Option<String>,

    /// Primary key column (default: $I18N_ID_COLUMN or "id")
    #[arg(long)]
    id_column: Option<String>,

    /// Preferred output language
    #[arg(long, short)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a token by tag
    Token {
        tag: String,
        /// Placeholder values as key=value
        #[arg(long = "context", short = 'c')]
        context: Vec<String>,
    },
    /// Find a message by its text and print its translations
    Translate {
        message: String,
        /// Language the message is written in
        #[arg(long)]
        from: String,
        /// Target languages (default: the preferred language)
        #[arg(long)]
        to: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("token_i18n=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let store: Box<dyn Store> = match (&cli.json, &cli.sqlite) {
        (Some(path), _) => {
            info!("Loading tokens from {}", path.display());
            Box::new(ArrayStore::from_file(path)?)
        }
        (None, Some(path)) => {
            info!("Reading tokens from SQLite database {}", path.display());
            let mut config = SqlStoreConfig::from_env();
            if let Some(table) = &cli.table {
                config.with_table(table);
            }
            if let Some(column) = &cli.tag_column {
                config.with_tag_column(column);
            }
            if let Some(column) = &cli.id_column {
                config.with_id_column(column);
            }
            let conn = rusqlite::Connection::open(path)?;
            Box::new(SqlStore::with_config(conn, config)?)
        }
        (None, None) => return Err("either --json or --sqlite is required".into()),
    };

    let mut translator = Translator::new(store);
    translator.set_preferred_language(cli.lang.clone());

    let token = match cli.command {
        Command::Token { tag, context } => {
            let token = translator.token(&tag)?;
            let pairs = context
                .iter()
                .map(|pair| {
                    pair.split_once('=')
                        .ok_or_else(|| format!("Invalid context '{}', expected key=value", pair))
                })
                .collect::<Result<Vec<_>, _>>()?;
            token.interpolate(pairs)
        }
        Command::Translate { message, from, to } => {
            if to.is_empty() {
                translator.translate(&message, from)?
            } else {
                translator.translate(&message, LangSpec::mapping([(from, to)]))?
            }
        }
    };

    print_token(&token);
    Ok(())
}

/// The preferred variant when there is one, otherwise every variant
fn print_token(token: &Token) {
    match token.stringify() {
        Ok(message) => println!("{}", message),
        Err(_) => {
            for (lang, message) in token.translations() {
                println!("{}: {}", lang, message);
            }
        }
    }
}
