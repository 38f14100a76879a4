//! Font scanning: turn a file or directory into font records

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use read_fonts::{FileRef, FontRef, TableProvider};
use serde::{Deserialize, Serialize};
use skrifa::string::StringId;
use skrifa::{FontRef as SkrifaFontRef, MetadataProvider};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::generic::{classify, FontTraits, GenericFamily};

/// One face found while scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRecord {
    pub path: PathBuf,
    #[serde(default)]
    pub ttc_index: Option<u32>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub generic_family: GenericFamily,
}

impl FontRecord {
    pub fn new(path: impl Into<PathBuf>, family: impl Into<String>, generic: GenericFamily) -> Self {
        Self {
            path: path.into(),
            ttc_index: None,
            family: Some(family.into()),
            generic_family: generic,
        }
    }

    /// Render the path, appending `#<index>` for TTC/OTC collections.
    pub fn path_with_index(&self) -> String {
        if let Some(idx) = self.ttc_index {
            format!("{}#{idx}", self.path.display())
        } else {
            self.path.display().to_string()
        }
    }
}

/// Source of font records for a target path.
///
/// Implementations must return records in a stable order so that repeated
/// generations over unchanged input are byte-identical.
pub trait FontScanner {
    fn scan(&self, target: &Path) -> Result<Vec<FontRecord>>;
}

/// Reads fonts from disk, breadth-first for directories.
#[derive(Debug, Clone, Default)]
pub struct FilesystemScanner {
    follow_symlinks: bool,
}

impl FilesystemScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sorted font files and subdirectories directly inside `dir`.
    ///
    /// Only a failure to read `dir` itself is an error; bad entries inside it
    /// are logged and skipped.
    fn list_dir(&self, dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut files = Vec::new();
        let mut dirs = Vec::new();

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 || err.path() == Some(dir) => {
                    return Err(err)
                        .with_context(|| format!("reading directory {}", dir.display()));
                }
                Err(err) => {
                    warn!("skipping entry in {}: {err}", dir.display());
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() {
                dirs.push(entry.into_path());
            } else if file_type.is_file() {
                if is_font(entry.path()) {
                    files.push(entry.into_path());
                }
            } else if file_type.is_symlink() && is_font(entry.path()) {
                // Links are not followed here; file links still count.
                match fs::metadata(entry.path()) {
                    Ok(meta) if meta.is_file() => files.push(entry.into_path()),
                    Ok(_) => debug!("ignoring non-file link {}", entry.path().display()),
                    Err(err) => warn!("skipping broken link {}: {err}", entry.path().display()),
                }
            } else if file_type.is_symlink() {
                debug!("not following link {}", entry.path().display());
            }
        }

        Ok((files, dirs))
    }
}

impl FontScanner for FilesystemScanner {
    fn scan(&self, target: &Path) -> Result<Vec<FontRecord>> {
        let meta = fs::metadata(target)
            .with_context(|| format!("target path {}", target.display()))?;

        if !meta.is_dir() {
            let data =
                fs::read(target).with_context(|| format!("reading font {}", target.display()))?;
            return Ok(parse_records(target, &data).unwrap_or_else(|err| {
                warn!("skipping {}: {err:#}", target.display());
                Vec::new()
            }));
        }

        let (files, dirs) = self.list_dir(target)?;
        let mut found: Vec<FontRecord> = files.iter().flat_map(|f| load_records_or_warn(f)).collect();
        let mut pending: VecDeque<PathBuf> = dirs.into();
        let mut visited: HashSet<PathBuf> = HashSet::from([canonical(target)]);

        while let Some(dir) = pending.pop_front() {
            if !visited.insert(canonical(&dir)) {
                debug!("already scanned {}", dir.display());
                continue;
            }

            match self.list_dir(&dir) {
                Ok((files, dirs)) => {
                    found.extend(files.iter().flat_map(|f| load_records_or_warn(f)));
                    pending.extend(dirs);
                }
                Err(err) => warn!("skipping unreadable directory {}: {err:#}", dir.display()),
            }
        }

        debug!("scanned {} faces under {}", found.len(), target.display());
        Ok(found)
    }
}

fn canonical(dir: &Path) -> PathBuf {
    fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}

fn is_font(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "ttc" | "otc")
}

fn load_records_or_warn(path: &Path) -> Vec<FontRecord> {
    load_records(path).unwrap_or_else(|err| {
        warn!("skipping {}: {err:#}", path.display());
        Vec::new()
    })
}

/// Read every face of a font file or collection.
pub fn load_records(path: &Path) -> Result<Vec<FontRecord>> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    parse_records(path, &data)
}

fn parse_records(path: &Path, data: &[u8]) -> Result<Vec<FontRecord>> {
    let file = FileRef::new(data).map_err(|err| anyhow!("not a font file: {err}"))?;

    let faces: Vec<(FontRef, Option<u32>)> = match file {
        FileRef::Font(font) => vec![(font, None)],
        FileRef::Collection(collection) => (0..collection.len())
            .map(|idx| collection.get(idx).map(|font| (font, Some(idx))))
            .collect::<Result<_, _>>()
            .map_err(|err| anyhow!("reading collection face: {err}"))?,
    };

    let mut records = Vec::with_capacity(faces.len());
    for (font, ttc_index) in faces {
        let sfont = match ttc_index {
            Some(idx) => SkrifaFontRef::from_index(data, idx)?,
            None => SkrifaFontRef::new(data)?,
        };

        records.push(FontRecord {
            path: path.to_path_buf(),
            ttc_index,
            family: family_name(&sfont),
            generic_family: classify(&collect_traits(&font)),
        });
    }

    Ok(records)
}

/// Typographic family first, then the legacy family name; English preferred.
fn family_name(font: &SkrifaFontRef) -> Option<String> {
    [StringId::TYPOGRAPHIC_FAMILY_NAME, StringId::FAMILY_NAME]
        .into_iter()
        .filter_map(|id| font.localized_strings(id).english_or_first())
        .map(|s| s.to_string().trim().to_string())
        .find(|s| !s.is_empty())
}

fn collect_traits(font: &FontRef) -> FontTraits {
    let (family_class, panose) = match font.os2() {
        Ok(table) => {
            let raw_family = table.s_family_class() as u16;
            let class = (raw_family >> 8) as u8;
            let subclass = (raw_family & 0x00FF) as u8;
            let panose = <[u8; 10]>::try_from(table.panose_10()).ok();
            (Some((class, subclass)), panose)
        }
        Err(_) => (None, None),
    };

    let fixed_pitch = font
        .post()
        .map(|post| post.is_fixed_pitch() != 0)
        .unwrap_or(false);

    FontTraits {
        family_class,
        panose,
        fixed_pitch,
    }
}
