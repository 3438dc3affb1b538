//! Discovery of translatable files in a modpack or source tree.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use gtnh_translation::{
    AnyFiletype, Config, Converter, Filetype, FiletypeKind, Language, PullTarget,
    filetypes::read_to_string,
};
use ignore::WalkBuilder;
use tracing::debug;

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pat, e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))
}

/// Relpaths under `root` (with `/` separators) matching any of `patterns`, sorted.
pub fn find_relpaths(root: &Path, patterns: &[String]) -> Result<Vec<String>, String> {
    let set = build_glob_set(patterns)?;
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .ignore(false)
        .parents(false)
        .build();

    let mut relpaths = Vec::new();
    for dent in walker {
        let dent = match dent {
            Ok(d) => d,
            Err(_) => continue,
        };
        if !dent.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let Ok(rel) = dent.path().strip_prefix(root) else {
            continue;
        };
        let rel = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if set.is_match(&rel) {
            relpaths.push(rel);
        }
    }
    relpaths.sort();
    Ok(relpaths)
}

/// Relpath patterns selecting the source files of one target group.
pub fn patterns_for(converter: &Converter, target: PullTarget) -> Vec<String> {
    let config = converter.config();
    match target {
        PullTarget::QuestBook => vec![config.quest_book_relpath.clone()],
        PullTarget::GtLang => vec![config.gt_lang_relpath.clone()],
        PullTarget::Lang => vec![format!("**/{}.lang", config.locales.source)],
    }
}

/// Loads every source-language file of `target` found under `root`.
pub fn load_target(
    converter: &Converter,
    root: &Path,
    target: PullTarget,
) -> Result<Vec<AnyFiletype>, String> {
    let config = converter.config();
    let relpaths = find_relpaths(root, &patterns_for(converter, target))?;

    let mut files = Vec::with_capacity(relpaths.len());
    for relpath in relpaths {
        if target == PullTarget::Lang
            && (relpath == config.quest_book_relpath || relpath == config.gt_lang_relpath)
        {
            continue;
        }
        let content = read_to_string(root.join(&relpath))
            .map_err(|e| format!("Error reading {}: {}", relpath, e))?;
        let file = converter
            .filetype_for(relpath.as_str(), content, Language::Source)
            .map_err(|e| e.to_string())?;
        debug!(relpath = %relpath, properties = file.properties().len(), "loaded");
        files.push(file);
    }
    Ok(files)
}

/// Loads all source-language files of a modpack: mod lang files, the quest
/// book and the GregTech lang file.
pub fn load_all(converter: &Converter, root: &Path) -> Result<Vec<AnyFiletype>, String> {
    let mut files = Vec::new();
    for target in [PullTarget::Lang, PullTarget::QuestBook, PullTarget::GtLang] {
        files.extend(load_target(converter, root, target)?);
    }
    Ok(files)
}

/// The relpath a single file given on the command line is handled as.
///
/// An explicit `relpath` wins. Otherwise GregTech lang files take the
/// configured GregTech relpath, so the converter recognizes them, and other
/// files use the input path itself.
pub fn input_relpath(
    config: &Config,
    input: &Path,
    kind: Option<FiletypeKind>,
    relpath: Option<&str>,
) -> String {
    if let Some(relpath) = relpath {
        return relpath.to_string();
    }
    let is_gt_name = input
        .file_name()
        .is_some_and(|name| Path::new(&config.gt_lang_relpath).file_name() == Some(name));
    match kind {
        Some(FiletypeKind::GtLang) => config.gt_lang_relpath.clone(),
        None if is_gt_name => config.gt_lang_relpath.clone(),
        _ => input.to_string_lossy().replace('\\', "/"),
    }
}
