//! Row renderer and output writer.
//!
//! For each data row, in order: render every cached cell into the template,
//! render the output filename, replace any existing file at that path and
//! save the template as a new workbook. The template is overwritten in place
//! row after row; every cached cell is rewritten each time, so no value from
//! an earlier row survives into a later artifact.

use crate::engine::ExpressionEngine;
use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::excel::TemplateWorkbook;
use crate::template::TemplateCache;
use crate::value::RowBindings;
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

/// Location label used in errors about the filename expression.
pub const OUTPUT_FILENAME: &str = "output filename";

/// What a render pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    /// One entry per data row, in row order. Repeats when rows collide.
    pub artifacts: Vec<PathBuf>,
    /// Paths that already held a file and were replaced.
    pub replaced: usize,
    /// Rows whose path was already written earlier in this pass.
    pub collisions: usize,
}

impl RenderSummary {
    /// Distinct files left on disk (or that would be, on a dry run).
    pub fn distinct_artifacts(&self) -> usize {
        self.artifacts.iter().collect::<HashSet<_>>().len()
    }
}

/// Renders rows into the template and writes one workbook per row.
pub struct OutputWriter<'a, E: ExpressionEngine> {
    engine: &'a E,
    cache: &'a TemplateCache<E::Renderer>,
    filename: &'a E::Renderer,
    output_dir: &'a Path,
    dry_run: bool,
}

impl<'a, E: ExpressionEngine> OutputWriter<'a, E> {
    pub fn new(
        engine: &'a E,
        cache: &'a TemplateCache<E::Renderer>,
        filename: &'a E::Renderer,
        output_dir: &'a Path,
    ) -> Self {
        Self {
            engine,
            cache,
            filename,
            output_dir,
            dry_run: false,
        }
    }

    /// Render everything but write nothing.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Process every row in order. The first failure aborts the pass.
    pub fn render_all(
        &self,
        template: &mut TemplateWorkbook,
        rows: &[RowBindings],
    ) -> TemplatinatorResult<RenderSummary> {
        let mut summary = RenderSummary::default();
        let mut written = HashSet::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 1;
            let path = self.render_row(template, row, row_number)?;

            if !written.insert(path.clone()) {
                warn!(
                    path = %path.display(),
                    row = row_number,
                    "output filename already used by an earlier row; overwriting"
                );
                summary.collisions += 1;
            }

            if !self.dry_run && self.persist(template, &path)? {
                summary.replaced += 1;
            }
            summary.artifacts.push(path);
        }

        Ok(summary)
    }

    /// Render one row's cells into the template and resolve its output path.
    pub fn render_row(
        &self,
        template: &mut TemplateWorkbook,
        row: &RowBindings,
        row_number: usize,
    ) -> TemplatinatorResult<PathBuf> {
        for entry in self.cache.iter() {
            let text = self.engine.render(&entry.renderer, row).map_err(|message| {
                TemplatinatorError::Render {
                    location: entry.cell.address(),
                    row: row_number,
                    message,
                }
            })?;
            template.write_text(entry.cell, &text)?;
        }

        let filename = self
            .engine
            .render(self.filename, row)
            .map_err(|message| TemplatinatorError::Render {
                location: OUTPUT_FILENAME.to_string(),
                row: row_number,
                message,
            })?;

        if filename.trim().is_empty() {
            return Err(TemplatinatorError::Render {
                location: OUTPUT_FILENAME.to_string(),
                row: row_number,
                message: "rendered to an empty name".to_string(),
            });
        }

        // Sub-directories are fine; anything that leaves output_dir is not
        let escapes = Path::new(&filename).components().any(|c| {
            matches!(
                c,
                Component::RootDir | Component::Prefix(_) | Component::ParentDir
            )
        });
        if escapes {
            return Err(TemplatinatorError::Render {
                location: OUTPUT_FILENAME.to_string(),
                row: row_number,
                message: format!("'{}' points outside the output directory", filename),
            });
        }

        Ok(self.output_dir.join(filename))
    }

    /// Save the template at `path`, replacing any existing file.
    /// Returns whether a file was replaced.
    fn persist(&self, template: &TemplateWorkbook, path: &Path) -> TemplatinatorResult<bool> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let replaced = path.exists();
        if replaced {
            fs::remove_file(path)?;
        }

        template.save_as(path)?;
        info!(path = %path.display(), replaced, "artifact written");
        Ok(replaced)
    }
}
