use std::path::Path;

use gtnh_translation::{Converter, Filetype, FiletypeKind, Language, filetypes::read_to_string};
use serde_json::json;

use crate::modpack::input_relpath;

/// Run the debug command: parse a file and print its properties as JSON.
pub fn run_debug_command(
    converter: &Converter,
    input: &Path,
    kind: Option<FiletypeKind>,
    relpath: Option<&str>,
) -> Result<(), String> {
    let json = debug_json(converter, input, kind, relpath)?;
    println!("{}", json);
    Ok(())
}

pub fn debug_json(
    converter: &Converter,
    input: &Path,
    kind: Option<FiletypeKind>,
    relpath: Option<&str>,
) -> Result<String, String> {
    let content = read_to_string(input)
        .map_err(|e| format!("Error reading {}: {}", input.display(), e))?;
    let relpath = input_relpath(converter.config(), input, kind, relpath);
    let kind = match kind {
        Some(kind) => kind,
        None => converter.kind_of(&relpath).map_err(|e| e.to_string())?,
    };

    let file = converter.filetype(kind, relpath, content, Language::Source);
    let value = json!({
        "relpath": file.relpath(),
        "kind": kind.to_string(),
        "source_relpath": file.source_relpath(),
        "target_relpath": file.target_relpath(),
        "properties": file.properties(),
    });
    serde_json::to_string_pretty(&value).map_err(|e| format!("Error serializing to JSON: {}", e))
}
