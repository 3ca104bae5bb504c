//! Batch processing of message-catalog files.
//!
//! A [`ModuleSpec`] names where a module's source catalogs live, where the
//! translated ones go, and which target language to produce. Processing is
//! strictly sequential: each file is read, parsed, translated, and written
//! before the next one starts, and the first error ends the whole run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    error::Error,
    pipeline::translate_document,
    traits::Parser,
    translator::Translator,
    types::Document,
};

/// One module to process: a set of catalog files sharing an input directory,
/// an output directory, and a target language.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleSpec {
    /// Directory holding the source catalogs.
    pub input_dir: PathBuf,
    /// Directory the translated catalogs are written to. Created on demand.
    pub output_dir: PathBuf,
    /// File names, relative to both directories.
    pub files: Vec<String>,
    /// Target language tag, e.g. `"nl"` or `"pt-BR"`.
    pub lang: String,
}

impl ModuleSpec {
    /// Loads a list of module specs from a JSON config file.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<ModuleSpec>, Error> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Io(e).in_file(path))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::malformed(format!("config: {}", e)).in_file(path))
    }
}

/// Outcome of one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Number of strings translated in this file.
    pub translated: usize,
}

/// Processes every file of one module. Fails on the first error, wrapped
/// with the path of the file being processed.
///
/// `cap` is a run-wide budget of translated strings (`None` = unlimited):
/// each file consumes part of it, and once it is spent the remaining files
/// are still parsed and written, just with their translatable leaves
/// skipped.
pub fn run_module<T: Translator>(
    module: &ModuleSpec,
    translator: &T,
    cap: Option<usize>,
) -> Result<Vec<FileReport>, Error> {
    let mut reports = Vec::with_capacity(module.files.len());
    let mut spent = 0usize;
    for file in &module.files {
        let input = module.input_dir.join(file);
        let output = module.output_dir.join(file);
        let remaining = cap.map(|cap| cap.saturating_sub(spent));

        let source = Document::read_from(&input).map_err(|e| e.in_file(&input))?;
        let (target, translated) = translate_document(&source, &module.lang, translator, remaining)
            .map_err(|e| e.in_file(&input))?;
        spent += translated;

        fs::create_dir_all(&module.output_dir)
            .map_err(|e| Error::Io(e).in_file(&module.output_dir))?;
        target.write_to(&output).map_err(|e| e.in_file(&output))?;

        reports.push(FileReport {
            input,
            output,
            translated,
        });
    }
    Ok(reports)
}

/// Processes a whole batch of modules sequentially. Returns the total number
/// of strings translated across the run. The `cap` budget spans all modules.
pub fn run_modules<T: Translator>(
    modules: &[ModuleSpec],
    translator: &T,
    cap: Option<usize>,
) -> Result<usize, Error> {
    let mut total = 0usize;
    for module in modules {
        let remaining = cap.map(|cap| cap.saturating_sub(total));
        for report in run_module(module, translator, remaining)? {
            total += report.translated;
        }
    }
    Ok(total)
}
