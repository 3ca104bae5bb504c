use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use clap::Parser;
use unic_langid::LanguageIdentifier;

use msgtrans::{
    EchoTranslator, Error, ModuleSpec, Translator, batch::run_module,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file listing the modules to process
    #[arg(short, long)]
    config: PathBuf,

    /// Translator command, invoked once per string: gets the target language
    /// as its last argument and the source text on stdin, prints the
    /// translation on stdout. Split on whitespace, so individual arguments
    /// cannot contain spaces; wrap anything fancier in a script
    #[arg(short, long)]
    translator: Option<String>,

    /// Run the pipeline with the identity translator instead of a service
    #[arg(long)]
    dry_run: bool,

    /// Stop translating after this many strings (0 = no cap)
    #[arg(long, default_value_t = 0)]
    limit: usize,
}

/// Shells out to an external program for each string. The program is the
/// whole translator capability; this adapter only moves text across the
/// process boundary.
struct CommandTranslator {
    program: String,
    args: Vec<String>,
}

impl CommandTranslator {
    /// Splits the command on whitespace: first word is the program, the rest
    /// are arguments. No quoting support.
    fn new(command: &str) -> Result<Self, Error> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| Error::translation("empty translator command"))?;
        Ok(CommandTranslator {
            program,
            args: parts.collect(),
        })
    }
}

impl Translator for CommandTranslator {
    fn translate(&self, text: &str, target: &LanguageIdentifier) -> Result<String, Error> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(target.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        // Feed stdin from a separate thread while the main thread drains
        // stdout. Writing everything up front deadlocks once the text and
        // the translation both exceed the pipe buffer.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::translation("translator stdin unavailable"))?;
        let payload = text.as_bytes().to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            // A translator that ignores its input closes the pipe early.
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(Error::translation("translator stdin writer panicked")),
        }
        if !output.status.success() {
            return Err(Error::translation(format!(
                "translator command failed with {} for text: {}",
                output.status, text
            )));
        }

        let translated = String::from_utf8(output.stdout)
            .map_err(|_| Error::translation("translator produced non-UTF-8 output"))?;
        Ok(translated.trim_end_matches(['\r', '\n']).to_string())
    }
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Error> {
    let modules = ModuleSpec::load_all(&args.config)?;
    let cap = match args.limit {
        0 => None,
        n => Some(n),
    };

    let total = if args.dry_run {
        process(&modules, &EchoTranslator, cap)?
    } else if let Some(command) = &args.translator {
        process(&modules, &CommandTranslator::new(command)?, cap)?
    } else {
        return Err(Error::translation(
            "no translator configured; pass --translator <command> or --dry-run",
        ));
    };

    println!("Processed messages {}", total);
    Ok(())
}

fn process<T: Translator>(
    modules: &[ModuleSpec],
    translator: &T,
    cap: Option<usize>,
) -> Result<usize, Error> {
    let mut total = 0usize;
    for module in modules {
        println!("Processing module {}", module.input_dir.display());
        let remaining = cap.map(|cap| cap.saturating_sub(total));
        for report in run_module(module, translator, remaining)? {
            println!(
                "  {} -> {} ({} strings)",
                report.input.display(),
                report.output.display(),
                report.translated
            );
            total += report.translated;
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dutch() -> LanguageIdentifier {
        "nl".parse().unwrap()
    }

    #[test]
    fn test_command_translator_splits_on_whitespace() {
        let translator = CommandTranslator::new("tr a-z A-Z").unwrap();
        assert_eq!(translator.program, "tr");
        assert_eq!(translator.args, vec!["a-z", "A-Z"]);
    }

    #[test]
    fn test_command_translator_rejects_empty_command() {
        assert!(CommandTranslator::new("   ").is_err());
    }

    #[test]
    fn test_command_translator_round_trips_stdin() {
        // `sh -c cat` makes the target-language argument the script's $0 and
        // echoes stdin back.
        let translator = CommandTranslator::new("sh -c cat").unwrap();
        let out = translator.translate("hello __name__", &dutch()).unwrap();
        assert_eq!(out, "hello __name__");
    }

    #[test]
    fn test_command_translator_streams_large_payloads() {
        // Well past a pipe buffer in each direction; hangs if stdin is
        // written to completion before stdout is drained.
        let text = "x".repeat(1 << 20);
        let translator = CommandTranslator::new("sh -c cat").unwrap();
        let out = translator.translate(&text, &dutch()).unwrap();
        assert_eq!(out, text);
    }

    #[test]
    fn test_command_translator_tolerates_input_ignoring_command() {
        let translator = CommandTranslator::new("echo hallo").unwrap();
        let out = translator.translate("hello", &dutch()).unwrap();
        assert_eq!(out, "hallo nl");
    }

    #[test]
    fn test_command_translator_reports_failure() {
        let translator = CommandTranslator::new("false").unwrap();
        let err = translator.translate("hello", &dutch()).unwrap_err();
        assert!(matches!(err, Error::Translation(_)));
    }
}
