//! Compiled template cache.
//!
//! Every cell of every configured area is compiled once, in area order and
//! row-major order within an area. A cell reached again through an
//! overlapping area keeps its first entry and is not recompiled.

use crate::engine::ExpressionEngine;
use crate::error::TemplatinatorResult;
use crate::excel::TemplateWorkbook;
use crate::range::{CellRange, CellRef};
use std::collections::HashMap;
use tracing::debug;

/// One template cell and its compiled expression.
#[derive(Debug, Clone)]
pub struct CompiledCell<R> {
    pub cell: CellRef,
    /// Placeholder text as it was in the template.
    pub source: String,
    pub renderer: R,
}

/// Position → renderer lookup, in first-seen order.
#[derive(Debug, Clone)]
pub struct TemplateCache<R> {
    cells: Vec<CompiledCell<R>>,
    positions: HashMap<CellRef, usize>,
}

impl<R> Default for TemplateCache<R> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<R> TemplateCache<R> {
    /// Compile every cell of `areas` on the template sheet.
    ///
    /// A compile error aborts the build; no partial cache is returned.
    pub fn build<E>(
        engine: &mut E,
        template: &TemplateWorkbook,
        areas: &[CellRange],
    ) -> TemplatinatorResult<Self>
    where
        E: ExpressionEngine<Renderer = R>,
    {
        let mut cache = Self::default();

        for area in areas {
            for cell in area.cells() {
                if cache.contains(cell) {
                    debug!(cell = %cell, area = %area, "already compiled, skipping");
                    continue;
                }

                let source = template.read_text(cell)?;
                let renderer = engine.compile(&cell.address(), &source)?;
                debug!(cell = %cell, area = %area, "compiled");
                cache.insert(CompiledCell {
                    cell,
                    source,
                    renderer,
                });
            }
        }

        Ok(cache)
    }

    fn insert(&mut self, entry: CompiledCell<R>) {
        self.positions.insert(entry.cell, self.cells.len());
        self.cells.push(entry);
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        self.positions.contains_key(&cell)
    }

    pub fn get(&self, cell: CellRef) -> Option<&CompiledCell<R>> {
        self.positions.get(&cell).map(|&idx| &self.cells[idx])
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledCell<R>> {
        self.cells.iter()
    }

    /// Cells whose template text contains a placeholder.
    pub fn placeholders(&self) -> impl Iterator<Item = &CompiledCell<R>> {
        self.cells.iter().filter(|entry| entry.source.contains("{{"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::HandlebarsEngine;
    use crate::error::TemplatinatorError;
    use crate::value::RowBindings;
    use pretty_assertions::assert_eq;

    /// Engine that records how often each location was compiled.
    #[derive(Default)]
    struct CountingEngine {
        calls: HashMap<String, usize>,
    }

    impl ExpressionEngine for CountingEngine {
        type Renderer = String;

        fn compile(&mut self, location: &str, source: &str) -> TemplatinatorResult<String> {
            *self.calls.entry(location.to_string()).or_default() += 1;
            Ok(source.to_string())
        }

        fn render(&self, renderer: &String, _bindings: &RowBindings) -> Result<String, String> {
            Ok(renderer.clone())
        }
    }

    fn template(cells: &[(&str, &str)]) -> TemplateWorkbook {
        let mut book =
            TemplateWorkbook::from_spreadsheet("template.xlsx", umya_spreadsheet::new_file());
        for (address, text) in cells {
            book.write_text(address.parse().unwrap(), text).unwrap();
        }
        book
    }

    fn areas(ranges: &[&str]) -> Vec<CellRange> {
        ranges.iter().map(|r| CellRange::parse(r).unwrap()).collect()
    }

    #[test]
    fn test_overlapping_areas_compile_each_cell_once() {
        let book = template(&[("A1", "{{a}}"), ("B2", "{{b}}")]);
        let mut engine = CountingEngine::default();

        let cache =
            TemplateCache::build(&mut engine, &book, &areas(&["A1:B2", "B2:C3", "A1"])).unwrap();

        // A1:B2 (4) + C2, B3, C3 from the second area
        assert_eq!(cache.len(), 7);
        assert_eq!(engine.calls.len(), 7);
        assert!(engine.calls.values().all(|&n| n == 1));
        assert_eq!(engine.calls["B2"], 1);
    }

    #[test]
    fn test_first_seen_order() {
        let book = template(&[]);
        let mut engine = CountingEngine::default();
        let cache = TemplateCache::build(&mut engine, &book, &areas(&["B1:B2", "A1:B1"])).unwrap();

        let order: Vec<String> = cache.iter().map(|c| c.cell.address()).collect();
        assert_eq!(order, vec!["B1", "B2", "A1"]);
    }

    #[test]
    fn test_blank_cells_compile_and_render_blank() {
        let book = template(&[("A1", "{{name}}")]);
        let mut engine = HandlebarsEngine::new();
        let cache = TemplateCache::build(&mut engine, &book, &areas(&["A1:A2"])).unwrap();

        let a2 = cache.get("A2".parse().unwrap()).unwrap();
        assert_eq!(a2.source, "");
        let bindings: RowBindings = [("name", "Ada")].into_iter().collect();
        assert_eq!(engine.render(&a2.renderer, &bindings).unwrap(), "");
    }

    #[test]
    fn test_placeholders_filter() {
        let book = template(&[("A1", "Title"), ("A2", "{{name}}")]);
        let mut engine = HandlebarsEngine::new();
        let cache = TemplateCache::build(&mut engine, &book, &areas(&["A1:A3"])).unwrap();

        let cells: Vec<String> = cache.placeholders().map(|c| c.cell.address()).collect();
        assert_eq!(cells, vec!["A2"]);
    }

    #[test]
    fn test_compile_error_aborts_build() {
        let book = template(&[("A1", "{{ok}}"), ("A2", "{{#each items}}")]);
        let mut engine = HandlebarsEngine::new();
        let result = TemplateCache::build(&mut engine, &book, &areas(&["A1:A2"]));
        match result {
            Err(TemplatinatorError::Compile { location, .. }) => assert_eq!(location, "A2"),
            other => panic!("Expected Compile error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_does_not_touch_template() {
        let book = template(&[("A1", "{{a}}")]);
        let mut engine = HandlebarsEngine::new();
        TemplateCache::build(&mut engine, &book, &areas(&["A1"])).unwrap();
        assert_eq!(book.read_text("A1".parse().unwrap()).unwrap(), "{{a}}");
    }
}
