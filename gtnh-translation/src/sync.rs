//! Mirroring operations between ParaTranz and a local tree, reusable by the
//! CLI and library users.
//!
//! Service calls run on a dedicated rayon pool sized by
//! [`Config::concurrency`](crate::config::Config). Each file is converted in
//! full before anything is uploaded, cached or returned for it.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::Error,
    filetypes::{AnyFiletype, read_to_string},
    paratranz::{
        cache::{Cache, fingerprint},
        client::Client,
        converter::Converter,
        types::{ParatranzFile, ParatranzItem, RemoteFile, TranslationFile},
    },
    traits::Filetype,
};

const STRINGS_NAMESPACE: &str = "strings";
const UPLOADS_NAMESPACE: &str = "uploads";

/// Which group of service files a pull selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PullTarget {
    /// The quest book lang file.
    QuestBook,
    /// All mod lang files except the quest book and GregTech lang file.
    Lang,
    /// The GregTech lang file.
    GtLang,
}

impl PullTarget {
    /// Whether a service file name belongs to this group.
    pub fn matches(&self, config: &Config, name: &str) -> bool {
        let quest_book = ParatranzFile::name_for(&config.quest_book_relpath);
        let gt_lang = ParatranzFile::name_for(&config.gt_lang_relpath);
        match self {
            PullTarget::QuestBook => name == quest_book,
            PullTarget::GtLang => name == gt_lang,
            PullTarget::Lang => {
                name.ends_with(".lang.json") && name != quest_book && name != gt_lang
            }
        }
    }

    fn description(&self) -> &'static str {
        match self {
            PullTarget::QuestBook => "quest book",
            PullTarget::Lang => "lang",
            PullTarget::GtLang => "gt lang",
        }
    }
}

impl Display for PullTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PullTarget::QuestBook => write!(f, "quest-book"),
            PullTarget::Lang => write!(f, "lang"),
            PullTarget::GtLang => write!(f, "gt-lang"),
        }
    }
}

impl FromStr for PullTarget {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quest-book" | "questbook" | "qb" => Ok(PullTarget::QuestBook),
            "lang" => Ok(PullTarget::Lang),
            "gt-lang" | "gtlang" => Ok(PullTarget::GtLang),
            other => Err(Error::UnknownFiletype(other.to_string())),
        }
    }
}

/// Counters from a push.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushReport {
    pub uploaded: usize,
    pub unchanged: usize,
}

fn build_pool(config: &Config) -> Result<rayon::ThreadPool, Error> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.concurrency)
        .build()
        .map_err(|e| Error::Config(format!("cannot start worker pool: {}", e)))
}

/// Downloads translations and applies them to the source files under `source_root`.
///
/// Strings are memoized in `cache` by the file's modification time on the
/// service. Returns [`Error::NoFiles`] when nothing on the service matches
/// `target`.
pub fn pull<C: Client + ?Sized>(
    client: &C,
    converter: &Converter,
    cache: Option<&Cache>,
    target: PullTarget,
    source_root: &Path,
) -> Result<Vec<TranslationFile>, Error> {
    let config = converter.config();
    let selected: Vec<RemoteFile> = client
        .files()?
        .into_iter()
        .filter(|file| target.matches(config, &file.name))
        .collect();

    if selected.is_empty() {
        return Err(Error::NoFiles(target.description().to_string()));
    }
    info!(count = selected.len(), %target, "pulling files");

    build_pool(config)?.install(|| {
        selected
            .par_iter()
            .map(|remote| pull_one(client, converter, cache, remote, source_root))
            .collect()
    })
}

fn pull_one<C: Client + ?Sized>(
    client: &C,
    converter: &Converter,
    cache: Option<&Cache>,
    remote: &RemoteFile,
    source_root: &Path,
) -> Result<TranslationFile, Error> {
    let items = fetch_strings(client, cache, remote)?;
    let record = ParatranzFile {
        name: remote.name.clone(),
        items,
    };

    let relpath = record.relpath()?;
    let source = read_to_string(source_root.join(relpath))?;
    let translated = converter.to_translation_file(&record, &source)?;
    debug!(from = relpath, to = %translated.relpath, "converted");
    Ok(translated)
}

fn fetch_strings<C: Client + ?Sized>(
    client: &C,
    cache: Option<&Cache>,
    remote: &RemoteFile,
) -> Result<Vec<ParatranzItem>, Error> {
    // Without a modification time there is nothing to validate a cached copy against.
    let cache = cache.filter(|_| !remote.modified_at.is_empty());

    if let Some(items) = cache.and_then(|c| {
        c.get::<Vec<ParatranzItem>>(STRINGS_NAMESPACE, &remote.name, &remote.modified_at)
    }) {
        debug!(name = %remote.name, "strings served from cache");
        return Ok(items);
    }

    let items = client.strings(remote)?;
    if let Some(cache) = cache
        && let Err(e) = cache.put(STRINGS_NAMESPACE, &remote.name, &remote.modified_at, &items)
    {
        warn!(name = %remote.name, error = %e, "failed to cache strings");
    }
    Ok(items)
}

/// Converts and uploads local files.
///
/// A file whose content fingerprint already maps to an identical record in
/// `cache` is not uploaded again.
pub fn push<C: Client + ?Sized>(
    client: &C,
    converter: &Converter,
    cache: Option<&Cache>,
    files: &[AnyFiletype],
) -> Result<PushReport, Error> {
    let remote: HashMap<String, RemoteFile> = client
        .files()?
        .into_iter()
        .map(|file| (file.name.clone(), file))
        .collect();
    info!(count = files.len(), "pushing files");

    let uploaded: Vec<bool> = build_pool(converter.config())?.install(|| {
        files
            .par_iter()
            .map(|file| push_one(client, converter, cache, &remote, file))
            .collect::<Result<_, Error>>()
    })?;

    let report = PushReport {
        uploaded: uploaded.iter().filter(|&&u| u).count(),
        unchanged: uploaded.iter().filter(|&&u| !u).count(),
    };
    info!(uploaded = report.uploaded, unchanged = report.unchanged, "push finished");
    Ok(report)
}

fn push_one<C: Client + ?Sized>(
    client: &C,
    converter: &Converter,
    cache: Option<&Cache>,
    remote: &HashMap<String, RemoteFile>,
    file: &AnyFiletype,
) -> Result<bool, Error> {
    let record = converter.to_paratranz_file(file)?;
    let relpath = file.source_relpath();
    let fp = fingerprint(file.content());
    let existing = remote.get(&record.name);

    if existing.is_some()
        && let Some(cache) = cache
        && cache.get::<ParatranzFile>(UPLOADS_NAMESPACE, &relpath, &fp).as_ref() == Some(&record)
    {
        debug!(relpath = %relpath, "unchanged since last upload");
        return Ok(false);
    }

    client.upload(&record, existing)?;
    info!(name = %record.name, items = record.items.len(), "uploaded");

    if let Some(cache) = cache
        && let Err(e) = cache.put(UPLOADS_NAMESPACE, &relpath, &fp, &record)
    {
        warn!(relpath = %relpath, error = %e, "failed to cache upload");
    }
    Ok(true)
}

/// Writes translated files under `root`, at their local-layout relpath.
pub fn write_translation_files(
    config: &Config,
    files: &[TranslationFile],
    root: &Path,
) -> Result<Vec<PathBuf>, Error> {
    files
        .iter()
        .map(|file| {
            let path = root.join(config.local_relpath(file.kind, &file.relpath));
            write_file(&path, &file.content)?;
            Ok(path)
        })
        .collect()
}

/// Copies source-language files into a history tree at their source relpath.
pub fn snapshot(files: &[AnyFiletype], root: &Path) -> Result<Vec<PathBuf>, Error> {
    files
        .iter()
        .map(|file| {
            let path = root.join(file.source_relpath());
            write_file(&path, file.content())?;
            Ok(path)
        })
        .collect()
}

fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_target_matches() {
        let config = Config::default();
        let qb = "config/txloader/load/betterquesting/lang/en_US.lang.json";
        let gt = "GregTech_US.lang.json";
        let mod_lang = "resources/IC2/lang/en_US.lang.json";

        assert!(PullTarget::QuestBook.matches(&config, qb));
        assert!(!PullTarget::QuestBook.matches(&config, mod_lang));
        assert!(PullTarget::GtLang.matches(&config, gt));
        assert!(PullTarget::Lang.matches(&config, mod_lang));
        assert!(!PullTarget::Lang.matches(&config, qb));
        assert!(!PullTarget::Lang.matches(&config, gt));
        assert!(!PullTarget::Lang.matches(&config, "scripts/foo.zs.json"));
    }

    #[test]
    fn test_pull_target_from_str() {
        assert_eq!(
            PullTarget::from_str("quest-book").unwrap(),
            PullTarget::QuestBook
        );
        assert_eq!(PullTarget::from_str("GT-LANG").unwrap(), PullTarget::GtLang);
        assert!(PullTarget::from_str("zs").is_err());
        assert_eq!(PullTarget::GtLang.to_string(), "gt-lang");
    }

    #[test]
    fn test_write_translation_files_uses_local_layout() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![TranslationFile {
            kind: crate::filetypes::FiletypeKind::Lang,
            relpath: "resources/IC2/lang/ja_JP.lang".to_string(),
            content: "a=b\n".to_string(),
            language: crate::filetypes::Language::Target,
        }];
        let written = write_translation_files(&Config::default(), &files, dir.path()).unwrap();
        assert_eq!(
            written[0],
            dir.path()
                .join("config/txloader/forceload/IC2/lang/ja_JP.lang")
        );
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "a=b\n");
    }
}
