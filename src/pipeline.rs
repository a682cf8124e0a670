//! Batch orchestration.
//!
//! A run has three strictly ordered stages:
//!
//! 1. **Compose**: every record (and glyph) is turned into its output files
//!    on a bounded worker pool. Results keep input order regardless of
//!    completion order.
//! 2. **Write**: once every task has joined, files are handed to the sink and
//!    recorded in their library group.
//! 3. **Package**: each group is packaged from exactly the bytes that were
//!    written, then its library document is written.
//!
//! A bad asset is skipped and a bad group is left without a library; neither
//! stops the rest of the batch. Everything is summarized in a [`BatchReport`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use log::{debug, info, warn};
use rayon::ThreadPool;
use rayon::prelude::*;

use crate::compose::{Embedding, compose};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result, SkipReason};
use crate::glyph::GlyphDefinition;
use crate::library::{GroupKey, GroupKind, LibraryFile, LibraryGroup};
use crate::record::{AssetRecord, UniqueStems};
use crate::sink::AssetSink;
use crate::stencil::StencilDocument;

// ============================================================================
// Report
// ============================================================================

/// An asset left out of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAsset {
    pub name: String,
    pub reason: SkipReason,
}

/// A file the sink refused.
#[derive(Debug)]
pub struct FailedWrite {
    pub path: PathBuf,
    pub error: Error,
}

/// A group whose library could not be produced.
#[derive(Debug)]
pub struct FailedGroup {
    pub group: String,
    pub error: Error,
}

/// Summary of a run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Asset files written, in write order.
    pub written: Vec<PathBuf>,
    /// Library documents written.
    pub libraries: Vec<PathBuf>,
    pub skipped: Vec<SkippedAsset>,
    pub failed_writes: Vec<FailedWrite>,
    pub failed_groups: Vec<FailedGroup>,
}

impl BatchReport {
    /// True when nothing was skipped or failed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed_writes.is_empty() && self.failed_groups.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} files, {} libraries",
            self.written.len(),
            self.libraries.len()
        )?;
        for skipped in &self.skipped {
            writeln!(f, "skipped {}: {}", skipped.name, skipped.reason)?;
        }
        for failed in &self.failed_writes {
            writeln!(f, "failed to write {}: {}", failed.path.display(), failed.error)?;
        }
        for failed in &self.failed_groups {
            writeln!(f, "library {} not produced: {}", failed.group, failed.error)?;
        }
        Ok(())
    }
}

// ============================================================================
// Generator
// ============================================================================

/// A file produced by the compose stage, not yet written.
#[derive(Debug, Clone)]
struct Produced {
    key: GroupKey,
    file_name: String,
    bytes: Vec<u8>,
}

/// Runs the compose, write and package stages for one configuration.
pub struct Generator {
    config: GeneratorConfig,
    pool: ThreadPool,
}

impl Generator {
    /// Creates a generator with a worker pool sized from the configuration.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.effective_workers())
            .thread_name(|i| format!("icon-stencil-{i}"))
            .build()?;
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produces all variants for `records` (and `glyphs` when enabled),
    /// writes them to `sink` and packages one library per group.
    ///
    /// Skipped assets, refused writes and unpackageable groups are collected
    /// in the report instead of aborting the run.
    pub fn run<S: AssetSink + ?Sized>(
        &self,
        records: &[AssetRecord],
        glyphs: &[GlyphDefinition],
        sink: &mut S,
    ) -> BatchReport {
        let glyphs: &[GlyphDefinition] = if self.config.include_flat_glyphs {
            glyphs
        } else {
            &[]
        };
        info!(
            "composing {} assets and {} glyphs on {} workers",
            records.len(),
            glyphs.len(),
            self.pool.current_num_threads()
        );

        // Stems are settled per output folder before any task starts, so no
        // two files can land on the same path.
        let asset_stems = self.asset_stems(records);
        let glyph_slots = glyph_slots(glyphs);

        let (asset_outcomes, glyph_files) = self.pool.install(|| {
            rayon::join(
                || {
                    records
                        .par_iter()
                        .zip(&asset_stems)
                        .map(|(record, stem)| self.produce_asset(record, stem))
                        .collect::<Vec<_>>()
                },
                || {
                    glyphs
                        .par_iter()
                        .zip(&glyph_slots)
                        .map(|(glyph, (kind, stem))| produce_glyph(glyph, kind, stem))
                        .collect::<Vec<_>>()
                },
            )
        });

        // Every compose task has joined; nothing below runs concurrently
        // with production.
        let mut report = BatchReport::default();
        let mut produced = Vec::new();
        for (outcome, record) in asset_outcomes.into_iter().zip(records) {
            match outcome {
                Ok(files) => produced.extend(files),
                Err(reason) => {
                    warn!("skipping {}: {reason}", record.name);
                    report.skipped.push(SkippedAsset {
                        name: record.name.clone(),
                        reason,
                    });
                }
            }
        }
        produced.extend(glyph_files);

        let mut groups: BTreeMap<GroupKey, LibraryGroup> = BTreeMap::new();
        for file in produced {
            let path = file.key.file_path(&file.file_name);
            match sink.write(&path, &file.bytes) {
                Ok(()) => {
                    report.written.push(path);
                    groups
                        .entry(file.key.clone())
                        .or_insert_with(|| LibraryGroup::new(file.key.library_name()))
                        .push(LibraryFile::new(file.file_name, file.bytes));
                }
                Err(error) => {
                    warn!("failed to write {}: {error}", path.display());
                    report.failed_writes.push(FailedWrite { path, error });
                }
            }
        }

        let packaged: Vec<(GroupKey, Result<StencilDocument>)> = self.pool.install(|| {
            groups
                .into_par_iter()
                .map(|(key, group)| {
                    let document = group.package();
                    (key, document)
                })
                .collect()
        });

        for (key, document) in packaged {
            let outcome = document
                .and_then(|doc| doc.to_xml())
                .and_then(|xml| {
                    let path = key.library_path();
                    sink.write(&path, xml.as_bytes()).map(|()| path)
                });
            match outcome {
                Ok(path) => {
                    debug!("packaged library {key}");
                    report.libraries.push(path);
                }
                Err(error) => {
                    warn!("library {key} not produced: {error}");
                    report.failed_groups.push(FailedGroup {
                        group: key.library_name(),
                        error,
                    });
                }
            }
        }

        info!(
            "wrote {} files and {} libraries ({} skipped, {} failed groups)",
            report.written.len(),
            report.libraries.len(),
            report.skipped.len(),
            report.failed_groups.len()
        );
        report
    }

    /// One stem per record, unique within the folder the record is written
    /// to. Without category grouping every record shares one folder.
    fn asset_stems(&self, records: &[AssetRecord]) -> Vec<String> {
        let mut stems = UniqueStems::new();
        records
            .iter()
            .map(|record| {
                let scope = if self.config.group_by_category {
                    record.category.as_str()
                } else {
                    ""
                };
                let stem = stems.claim(scope, &record.filename);
                if stem != record.filename {
                    debug!("{} is written as {stem} to keep its path unique", record.name);
                }
                stem
            })
            .collect()
    }

    /// Regular file plus, when enabled, the circled composite.
    fn produce_asset(
        &self,
        record: &AssetRecord,
        stem: &str,
    ) -> std::result::Result<Vec<Produced>, SkipReason> {
        let payload = record.payload.as_ref().map_err(|reason| *reason)?;
        let by_category = self.config.group_by_category;

        let mut files = vec![Produced {
            key: GroupKey::for_asset(GroupKind::Regular, &record.category, by_category),
            file_name: format!("{stem}.{}", record.extension),
            bytes: payload.to_bytes(),
        }];

        if self.config.circled {
            match compose(record, &self.config.frame, true) {
                Embedding::Composed(icon) => files.push(Produced {
                    key: GroupKey::for_asset(GroupKind::Circled, &record.category, by_category),
                    file_name: format!("{stem}.svg"),
                    bytes: icon.into_bytes(),
                }),
                Embedding::Skipped(reason) => return Err(reason),
            }
        }

        Ok(files)
    }
}

/// Folder kind and unique stem for each glyph.
fn glyph_slots(glyphs: &[GlyphDefinition]) -> Vec<(GroupKind, String)> {
    let mut stems = UniqueStems::new();
    glyphs
        .iter()
        .map(|glyph| {
            let kind = GroupKind::glyphs(&glyph.collection);
            let stem = stems.claim(&kind.dir_name(), &glyph.stem());
            (kind, stem)
        })
        .collect()
}

fn produce_glyph(glyph: &GlyphDefinition, kind: &GroupKind, stem: &str) -> Produced {
    Produced {
        key: GroupKey::new(kind.clone(), None),
        file_name: format!("{stem}.svg"),
        bytes: glyph.to_svg().into_bytes(),
    }
}
