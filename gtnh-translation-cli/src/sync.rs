use std::path::Path;

use gtnh_translation::{
    Converter, PullTarget, TranslationFile, pull, push, snapshot, write_translation_files,
};
use tracing::info;

use crate::{modpack, paratranz_http::ParatranzClient, settings::Settings};

const BANNER_WIDTH: usize = 80;

fn connect(settings: &Settings) -> Result<ParatranzClient, String> {
    let p = &settings.paratranz;
    let project_id = p
        .project_id
        .ok_or("Missing ParaTranz project id (--project-id or PARATRANZ_PROJECT_ID)")?;
    let token = p
        .token
        .as_deref()
        .ok_or("Missing ParaTranz token (--token or PARATRANZ_TOKEN)")?;
    ParatranzClient::new(&p.base_url, project_id, token).map_err(|e| e.to_string())
}

/// Run the pull command: download translations and apply them to the source tree.
///
/// Without an output directory the files are printed, each under a banner
/// naming its relpath.
pub fn run_pull_command(
    settings: &Settings,
    converter: &Converter,
    target: PullTarget,
    source_root: &Path,
    output: Option<&Path>,
) -> Result<(), String> {
    let client = connect(settings)?;
    let cache = settings.cache();
    let files = pull(&client, converter, cache.as_ref(), target, source_root)
        .map_err(|e| e.to_string())?;

    match output {
        Some(root) => {
            let written = write_translation_files(converter.config(), &files, root)
                .map_err(|e| format!("Error writing output: {}", e))?;
            info!(count = written.len(), root = %root.display(), "translations written");
        }
        None => print!("{}", render_banners(&files)),
    }
    Ok(())
}

pub fn render_banners(files: &[TranslationFile]) -> String {
    let rule = "#".repeat(BANNER_WIDTH);
    files
        .iter()
        .map(|file| format!("{rule}\n# {}\n{rule}\n{}\n\n", file.relpath, file.content))
        .collect()
}

/// Run the push command: upload the source files of one group.
pub fn run_push_command(
    settings: &Settings,
    converter: &Converter,
    target: PullTarget,
    path: &Path,
) -> Result<(), String> {
    let files = modpack::load_target(converter, path, target)?;
    if files.is_empty() {
        return Err(format!("No {} file found under {}", target, path.display()));
    }

    let client = connect(settings)?;
    let cache = settings.cache();
    let report = push(&client, converter, cache.as_ref(), &files).map_err(|e| e.to_string())?;
    println!(
        "Uploaded {} file(s), {} unchanged",
        report.uploaded, report.unchanged
    );
    Ok(())
}

/// Run the snapshot command: copy a modpack's source-language files into a
/// history tree.
pub fn run_snapshot_command(
    converter: &Converter,
    modpack_root: &Path,
    output: &Path,
) -> Result<(), String> {
    let files = modpack::load_all(converter, modpack_root)?;
    let written = snapshot(&files, output).map_err(|e| format!("Error writing output: {}", e))?;
    println!("Saved {} file(s) to {}", written.len(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtnh_translation::{FiletypeKind, Language};

    #[test]
    fn test_render_banners() {
        let files = vec![TranslationFile {
            kind: FiletypeKind::Lang,
            relpath: "resources/a/lang/ja_JP.lang".to_string(),
            content: "a=b\n".to_string(),
            language: Language::Target,
        }];
        let rule = "#".repeat(80);
        assert_eq!(
            render_banners(&files),
            format!("{rule}\n# resources/a/lang/ja_JP.lang\n{rule}\na=b\n\n\n")
        );
    }

    #[test]
    fn test_connect_requires_project_id() {
        let err = connect(&Settings::default()).err().unwrap();
        assert!(err.contains("project id"));
    }
}
