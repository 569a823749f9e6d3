//! End-to-end generation: config settings in, one workbook per data row out.

use crate::config::Settings;
use crate::data::DataSet;
use crate::engine::{ExpressionEngine, HandlebarsEngine};
use crate::error::TemplatinatorResult;
use crate::excel::TemplateWorkbook;
use crate::render::{OutputWriter, RenderSummary, OUTPUT_FILENAME};
use crate::template::TemplateCache;
use tracing::info;

/// Everything compiled and loaded, ready to render.
///
/// Built in a fixed order so every compile error surfaces before the data
/// workbook is opened and before any file is written.
pub struct Prepared {
    pub engine: HandlebarsEngine,
    pub template: TemplateWorkbook,
    pub cache: TemplateCache<String>,
    pub filename: String,
    pub data: DataSet,
}

impl Prepared {
    pub fn load(settings: &Settings) -> TemplatinatorResult<Self> {
        let template = TemplateWorkbook::open(&settings.input)?;

        let mut engine = HandlebarsEngine::new();
        let cache = TemplateCache::build(&mut engine, &template, &settings.areas)?;
        let filename = engine.compile(OUTPUT_FILENAME, &settings.output_template)?;
        info!(
            cells = cache.len(),
            placeholders = cache.placeholders().count(),
            "template compiled"
        );

        let data = DataSet::load(
            &settings.data_file,
            &settings.data_range,
            settings.strict_columns,
        )?;
        info!(
            rows = data.len(),
            columns = data.columns.len(),
            "data loaded"
        );

        Ok(Self {
            engine,
            template,
            cache,
            filename,
            data,
        })
    }

    /// Render every data row; with `dry_run` nothing is written.
    pub fn render(&mut self, settings: &Settings, dry_run: bool) -> TemplatinatorResult<RenderSummary> {
        let writer = OutputWriter::new(&self.engine, &self.cache, &self.filename, &settings.output_dir)
            .dry_run(dry_run);
        writer.render_all(&mut self.template, &self.data.rows)
    }
}

/// Run the whole pipeline.
pub fn generate(settings: &Settings, dry_run: bool) -> TemplatinatorResult<RenderSummary> {
    Prepared::load(settings)?.render(settings, dry_run)
}
