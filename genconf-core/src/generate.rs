//! Generation pipeline: scan, dedup, resolve, synthesize, assemble

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::discovery::{FontRecord, FontScanner};
use crate::document::OutputDocument;
use crate::error::{GenconfError, SkipReason, SkippedFont};
use crate::family::FamilyMap;
use crate::generic::{resolve, GenericFamily, ResolvedGeneric};
use crate::lang::LanguageSet;
use crate::rules::synthesize;

/// Caller-supplied parameters for one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    family: Option<String>,
    generic_family: Option<GenericFamily>,
    languages: LanguageSet,
    target: PathBuf,
}

impl GenerationRequest {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Family name the caller associates with the fonts. Recorded for
    /// diagnostics only; rules always use the scanned family names.
    pub fn with_family(mut self, family: Option<String>) -> Self {
        self.family = family;
        self
    }

    /// Fallback for fonts whose own metadata does not name a generic family.
    pub fn with_generic_family(mut self, generic: Option<GenericFamily>) -> Self {
        self.generic_family = generic;
        self
    }

    pub fn with_languages(mut self, languages: LanguageSet) -> Self {
        self.languages = languages;
        self
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn generic_family(&self) -> Option<GenericFamily> {
        self.generic_family
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Result of a generation run that did not abort.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub document: OutputDocument,
    /// Faces returned by the scanner.
    pub fonts_scanned: usize,
    /// Families that produced a rule group.
    pub families: usize,
    /// Records dropped along the way, in scan order.
    pub skipped: Vec<SkippedFont>,
}

impl Generation {
    pub fn render(&self) -> String {
        self.document.render()
    }
}

/// Run the whole pipeline for `request` using `scanner`.
///
/// Per-record problems are logged and collected in
/// [`Generation::skipped`]; only a failed scan aborts.
pub fn generate<S>(request: &GenerationRequest, scanner: &S) -> Result<Generation, GenconfError>
where
    S: FontScanner + ?Sized,
{
    let target = request.target();
    if let Some(family) = request.family() {
        debug!("requested family {family:?}");
    }

    let records = scanner
        .scan(target)
        .map_err(|source| GenconfError::Scan {
            path: target.to_path_buf(),
            source,
        })?;

    let mut generation = Generation {
        fonts_scanned: records.len(),
        ..Generation::default()
    };

    if records.is_empty() {
        info!("no fonts found under {}", target.display());
        return Ok(generation);
    }

    let mut document = OutputDocument::with_blocks(Vec::new());
    let mut seen: FamilyMap<()> = FamilyMap::new();

    for record in &records {
        let family = match usable_family(record) {
            Ok(family) => family,
            Err(reason) => {
                skip(&mut generation, record, reason);
                continue;
            }
        };

        if !seen.insert_first(family, ()) {
            debug!("{}: family {family:?} already emitted", record.path_with_index());
            continue;
        }

        let ResolvedGeneric { name, .. } = match resolve(
            record.generic_family,
            request.generic_family(),
            family,
            &record.path,
        ) {
            Ok(resolved) => resolved,
            Err(reason) => {
                skip(&mut generation, record, reason);
                continue;
            }
        };

        debug!("{family:?} -> {name}");
        document.extend(synthesize(family, name, request.languages()));
        generation.families += 1;
    }

    info!(
        "{} families from {} fonts ({} skipped)",
        generation.families,
        generation.fonts_scanned,
        generation.skipped.len()
    );

    generation.document = document;
    Ok(generation)
}

fn usable_family(record: &FontRecord) -> Result<&str, SkipReason> {
    if record.path.as_os_str().is_empty() {
        return Err(SkipReason::MissingPath);
    }

    match record.family.as_deref().map(str::trim) {
        Some(family) if !family.is_empty() => Ok(family),
        _ => Err(SkipReason::MissingFamily {
            path: record.path.clone(),
        }),
    }
}

fn skip(generation: &mut Generation, record: &FontRecord, reason: SkipReason) {
    warn!("{reason}");
    generation.skipped.push(SkippedFont {
        path: record.path.clone(),
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    struct Fixed(Vec<FontRecord>);

    impl FontScanner for Fixed {
        fn scan(&self, _target: &Path) -> Result<Vec<FontRecord>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl FontScanner for Failing {
        fn scan(&self, target: &Path) -> Result<Vec<FontRecord>> {
            Err(anyhow!("cannot open {}", target.display()))
        }
    }

    #[test]
    fn scan_failure_aborts() {
        let err = generate(&GenerationRequest::new("/nowhere"), &Failing).unwrap_err();
        assert!(matches!(err, GenconfError::Scan { .. }));
    }

    #[test]
    fn empty_scan_is_not_an_error() {
        let generation = generate(&GenerationRequest::new("/fonts"), &Fixed(Vec::new())).unwrap();
        assert!(generation.document.is_empty());
        assert_eq!(generation.render(), "");
    }

    #[test]
    fn missing_family_is_skipped() {
        let mut nameless = FontRecord::new("/fonts/x.ttf", "", GenericFamily::Serif);
        nameless.family = None;
        let named = FontRecord::new("/fonts/y.ttf", "Y", GenericFamily::Serif);

        let generation = generate(
            &GenerationRequest::new("/fonts"),
            &Fixed(vec![nameless, named]),
        )
        .unwrap();

        assert_eq!(generation.families, 1);
        assert_eq!(
            generation.skipped[0].reason,
            SkipReason::MissingFamily {
                path: PathBuf::from("/fonts/x.ttf")
            }
        );
    }

    #[test]
    fn first_record_wins_even_when_it_is_rejected() {
        let records = vec![
            FontRecord::new("/fonts/a.ttf", "Foo", GenericFamily::Unknown),
            FontRecord::new("/fonts/b.ttf", "foo", GenericFamily::Serif),
        ];
        let generation = generate(&GenerationRequest::new("/fonts"), &Fixed(records)).unwrap();

        assert_eq!(generation.families, 0);
        assert_eq!(generation.skipped.len(), 1);
        assert!(generation.document.blocks().is_empty());
    }
}
