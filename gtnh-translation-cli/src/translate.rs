use std::{fs, path::Path};

use gtnh_translation::{
    Converter, FiletypeKind, ParatranzFile, TranslationFile, filetypes::read_to_string,
};
use tracing::info;

use crate::modpack::input_relpath;

#[derive(Debug, Clone)]
pub struct TranslateOptions<'a> {
    pub input: &'a Path,
    pub strings: &'a Path,
    pub kind: Option<FiletypeKind>,
    pub relpath: Option<&'a str>,
    pub output: Option<&'a Path>,
}

/// Run the translate command: apply a ParaTranz string export to a local
/// source file without talking to the service.
pub fn run_translate_command(
    converter: &Converter,
    options: &TranslateOptions<'_>,
) -> Result<(), String> {
    let translated = translate_file(converter, options)?;

    match options.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating {}: {}", parent.display(), e))?;
            }
            fs::write(path, &translated.content)
                .map_err(|e| format!("Error writing to {}: {}", path.display(), e))?;
            info!(path = %path.display(), relpath = %translated.relpath, "translation written");
        }
        None => print!("{}", translated.content),
    }
    Ok(())
}

pub fn translate_file(
    converter: &Converter,
    options: &TranslateOptions<'_>,
) -> Result<TranslationFile, String> {
    let source = read_to_string(options.input)
        .map_err(|e| format!("Error reading {}: {}", options.input.display(), e))?;
    let strings = read_to_string(options.strings)
        .map_err(|e| format!("Error reading {}: {}", options.strings.display(), e))?;

    let relpath = input_relpath(
        converter.config(),
        options.input,
        options.kind,
        options.relpath,
    );
    let record = ParatranzFile::from_json(ParatranzFile::name_for(&relpath), &strings)
        .map_err(|e| format!("Error parsing {}: {}", options.strings.display(), e))?;

    match options.kind {
        Some(kind) => converter.to_translation_file_as(kind, &record, &source),
        None => converter.to_translation_file(&record, &source),
    }
    .map_err(|e| e.to_string())
}
