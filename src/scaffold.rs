//! Sample project generator for `templatinator init`.

use crate::config::DEFAULT_CONFIG_FILE;
use crate::error::{TemplatinatorError, TemplatinatorResult};
use crate::excel::SheetExporter;
use crate::value::CellValue;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMPLATE_FILE: &str = "template.xlsx";
pub const DATA_FILE: &str = "data.xlsx";

const SAMPLE_CONFIG: &str = r#"{
  "Input": "template.xlsx",
  "OutputTemplate": "{{Name}} - {{Unit__}}.xlsx",
  "OutputDir": "output",
  "Data": {
    "File": "data.xlsx",
    "Range": "A1:C4"
  },
  "Areas": [
    { "Range": "A1:B4" }
  ]
}
"#;

fn template_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec!["Rental statement".into()],
        vec!["Tenant".into(), "{{Name}}".into()],
        vec!["Unit".into(), "{{Unit__}}".into()],
        vec!["Monthly rent".into(), "{{Monthly_Rent}}".into()],
    ]
}

fn data_rows() -> Vec<Vec<CellValue>> {
    vec![
        vec!["Name".into(), "Unit #".into(), "Monthly Rent".into()],
        vec!["Ada Lovelace".into(), "1A".into(), 1200.0.into()],
        vec!["Grace Hopper".into(), "2B".into(), 1350.5.into()],
        vec!["Alan Turing".into(), "3C".into(), 990.0.into()],
    ]
}

/// Write a runnable sample project into `dir` and return the files created.
///
/// Existing files are never overwritten.
pub fn init_project(dir: &Path) -> TemplatinatorResult<Vec<PathBuf>> {
    let template = dir.join(TEMPLATE_FILE);
    let data = dir.join(DATA_FILE);
    let config = dir.join(DEFAULT_CONFIG_FILE);

    for path in [&template, &data, &config] {
        if path.exists() {
            return Err(TemplatinatorError::Scaffold(format!(
                "'{}' already exists",
                path.display()
            )));
        }
    }

    fs::create_dir_all(dir)?;
    SheetExporter::new(template_rows())
        .with_column_width(20.0)
        .export(&template)?;
    SheetExporter::new(data_rows()).with_header().export(&data)?;
    fs::write(&config, SAMPLE_CONFIG)?;

    Ok(vec![template, data, config])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigCheck, TemplateDataConfig};
    use crate::pipeline::generate;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_is_valid() {
        let config = TemplateDataConfig::from_json(SAMPLE_CONFIG).unwrap();
        assert!(matches!(
            config.check(Path::new(".")).unwrap(),
            ConfigCheck::Ready(_)
        ));
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        init_project(dir.path()).unwrap();
        assert!(matches!(
            init_project(dir.path()),
            Err(TemplatinatorError::Scaffold(_))
        ));
    }

    #[test]
    fn test_sample_project_generates() {
        let dir = TempDir::new().unwrap();
        let files = init_project(dir.path()).unwrap();
        assert_eq!(files.len(), 3);

        let config = TemplateDataConfig::load(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        let settings = match config.check(dir.path()).unwrap() {
            ConfigCheck::Ready(settings) => settings,
            other => panic!("Expected Ready, got {other:?}"),
        };

        let summary = generate(&settings, false).unwrap();
        assert_eq!(summary.artifacts.len(), 3);
        assert!(dir
            .path()
            .join("output")
            .join("Ada Lovelace - 1A.xlsx")
            .exists());
    }
}
