use crate::export::error::ExportError;
use crate::types::observation::Observation;
use bon::Builder;
use log::info;
use std::fs;
use std::path::PathBuf;

/// Writes a named set of observations somewhere and reports where.
pub trait Exporter {
    fn export(&self, records: &[&Observation], name: &str) -> Result<PathBuf, ExportError>;
}

/// Exports observations as a pretty-printed JSON array to `<out_dir>/<name>.json`.
///
/// Field names are camelCase, dates `yyyy-MM-dd`, times `HH:mm:ss` and ids UUID strings.
/// An existing file with the same name is overwritten. The file always lands directly in
/// `out_dir`: see [`file_stem`] for how names such as `Araba/Álava` are written.
///
/// # Examples
///
/// ```no_run
/// use aemet_stats::{Exporter, JsonExporter};
///
/// let exporter = JsonExporter::builder().out_dir("reports").build();
/// let path = exporter.export(&[], "empty").unwrap();
/// assert!(path.ends_with("reports/empty.json"));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct JsonExporter {
    /// Created on first export if it does not exist.
    #[builder(default = PathBuf::from("out"), into)]
    out_dir: PathBuf,
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl JsonExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &PathBuf {
        &self.out_dir
    }
}

impl Exporter for JsonExporter {
    fn export(&self, records: &[&Observation], name: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.out_dir)
            .map_err(|e| ExportError::CreateFolder(self.out_dir.clone(), e))?;

        let path = self.out_dir.join(format!("{}.json", file_stem(name)));
        let json = serde_json::to_vec_pretty(records)
            .map_err(|e| ExportError::Serialize(path.clone(), e))?;
        fs::write(&path, json).map_err(|e| ExportError::Write(path.clone(), e))?;

        info!("Exported {} observations to {}", records.len(), path.display());
        Ok(path)
    }
}

/// Turns `name` into a single file-name component.
///
/// Path separators become `_`, as do leading dots, so `Araba/Álava` is written as
/// `Araba_Álava` and `../x` as `___x`. An empty name becomes `_`.
pub fn file_stem(name: &str) -> String {
    let mut leading = true;
    let stem: String = name
        .chars()
        .map(|c| {
            leading &= c == '.';
            match c {
                '/' | '\\' | '\0' => '_',
                '.' if leading => '_',
                c => c,
            }
        })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}
