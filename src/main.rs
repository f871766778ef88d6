//! proceedings - compile articles into a proceedings volume

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use proceedings::article::{ArticleBuilder, ArticleConfig, PreambleSkip};
use proceedings::author::{IdPolicy, ParserConfig};
use proceedings::compose::roster_line;
use proceedings::export::{DocxConfig, JsonConfig, TextConfig};
use proceedings::{
    ComposeOptions, CompileConfig, CompileRequest, EditorialSource, SourceList, compile,
};

#[derive(Parser)]
#[command(name = "proceedings")]
#[command(version, about = "Compile articles into a proceedings volume", long_about = None)]
#[command(after_help = "EXAMPLES:
    proceedings -o volume.docx -e editorial.docx a.docx b.docx   Merged package
    proceedings -o volume.txt a.docx notes.txt                    Plain text
    proceedings -o data.json a.docx b.docx                        Author data dump
    proceedings -i a.docx                                         Show detected title and authors")]
struct Cli {
    /// Source files (.docx or plain text), in output order
    #[arg(value_name = "FILES", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (.docx, .txt or .json)
    #[arg(short, long, value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<PathBuf>,

    /// Editorial file placed before the articles
    #[arg(short, long, value_name = "FILE", conflicts_with = "editorial_text")]
    editorial: Option<PathBuf>,

    /// Editorial text placed before the articles
    #[arg(long, value_name = "TEXT")]
    editorial_text: Option<String>,

    /// Minimum digits for an author identifier (0 = any digit run)
    #[arg(long, value_name = "N", default_value_t = 5)]
    id_digits: usize,

    /// Start each article body at the abstract heading
    #[arg(long)]
    skip_to_abstract: bool,

    /// Omit the FILE: header before each article in text output
    #[arg(long)]
    no_file_headers: bool,

    /// Heading of the author roster
    #[arg(long, value_name = "TEXT")]
    roster_heading: Option<String>,

    /// Heading of the table of contents
    #[arg(long, value_name = "TEXT")]
    toc_heading: Option<String>,

    /// Write JSON on a single line
    #[arg(long)]
    compact_json: bool,

    /// Show detected title and authors without compiling
    #[arg(short, long)]
    info: bool,

    /// Suppress output messages
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> CompileConfig {
        let mut compose = ComposeOptions::default();
        if let Some(heading) = &self.roster_heading {
            compose.roster_heading = heading.clone();
        }
        if let Some(heading) = &self.toc_heading {
            compose.toc_heading = heading.clone();
        }

        CompileConfig {
            article: ArticleConfig {
                parser: ParserConfig {
                    id_policy: IdPolicy::from_min_digits(self.id_digits),
                },
                preamble_skip: if self.skip_to_abstract {
                    PreambleSkip::AbstractBoundary
                } else {
                    PreambleSkip::AuthorCount
                },
            },
            docx: DocxConfig {
                compose,
                ..Default::default()
            },
            text: TextConfig {
                file_headers: !self.no_file_headers,
            },
            json: JsonConfig {
                pretty: !self.compact_json,
            },
        }
    }

    fn editorial(&self) -> Option<EditorialSource> {
        match (&self.editorial, &self.editorial_text) {
            (Some(path), _) => Some(EditorialSource::File(path.clone())),
            (None, Some(text)) => Some(EditorialSource::Text(text.clone())),
            (None, None) => None,
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let result = if cli.info {
        show_info(&cli)
    } else {
        run(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn show_info(cli: &Cli) -> Result<(), String> {
    let builder = ArticleBuilder::with_config(cli.config().article);

    for path in &cli.inputs {
        let article = builder.build(path).map_err(|e| e.to_string())?;
        println!("File: {}", path.display());
        println!("Title: {}", article.title);
        if article.authors.is_empty() {
            println!("Authors: none detected");
        } else {
            println!("Authors:");
            for author in &article.authors {
                match &author.id {
                    Some(id) => println!("  {} [{id}]", roster_line(author)),
                    None => println!("  {}", roster_line(author)),
                }
            }
        }
        println!("Body blocks: {}", article.content_blocks.len());
        println!();
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<(), String> {
    let Some(output) = &cli.output else {
        return Err("an output file is required".to_string());
    };

    let sources: SourceList = cli.inputs.iter().cloned().collect();
    let mut request = CompileRequest::new(sources);
    request.editorial = cli.editorial();

    let report = compile(&request, output, &cli.config()).map_err(|e| e.to_string())?;

    if !cli.quiet {
        for (path, reason) in &report.skipped {
            eprintln!("skipped {}: {reason}", path.display());
        }
        println!("{}", report.summary());
        println!("Output: {}", report.output.display());
    }

    Ok(())
}
