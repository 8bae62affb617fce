//! The application facade: ingestion into a repository, lookups, and province exports.

use crate::aggregation::dataset::Dataset;
use crate::aggregation::grouping::filter_by_province;
use crate::error::MeteoError;
use crate::export::json::Exporter;
use crate::ingest::ingestor::Ingestor;
use crate::storage::repository::Repository;
use crate::types::observation::Observation;
use bon::bon;
use log::{info, warn};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Ties an [`Ingestor`] to a [`Repository`].
///
/// Statistics are computed on a [`Dataset`] loaded from the repository, never against
/// the repository itself.
///
/// # Examples
///
/// ```no_run
/// use aemet_stats::{InMemoryRepository, MeteoError, MeteoService};
/// use std::path::Path;
///
/// # fn run() -> Result<(), MeteoError> {
/// let service = MeteoService::builder()
///     .repository(InMemoryRepository::new())
///     .build();
///
/// let imported = service.import_folder(Path::new("data"))?;
/// let dataset = service.load_dataset()?;
/// assert_eq!(dataset.len(), imported);
/// # Ok(())
/// # }
/// ```
pub struct MeteoService<R: Repository> {
    repository: R,
    ingestor: Ingestor,
}

#[bon]
impl<R: Repository> MeteoService<R> {
    /// Creates a service over `repository`.
    ///
    /// # Arguments
    ///
    /// * `.repository(R)`: **Required.** Where observations are stored.
    /// * `.ingestor(Ingestor)`: Optional. Defaults to [`Ingestor::new`], which assigns random ids.
    #[builder]
    pub fn new(repository: R, ingestor: Option<Ingestor>) -> Self {
        Self {
            repository,
            ingestor: ingestor.unwrap_or_default(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Ingests every file in `folder` and saves the records one call at a time.
    ///
    /// Returns the number of records saved. Nothing is saved when ingestion fails.
    ///
    /// # Errors
    ///
    /// [`MeteoError::Ingest`] for any read or parse failure, [`MeteoError::Storage`] if a
    /// save is rejected. Records saved before a rejected save stay stored.
    pub fn import_folder(&self, folder: &Path) -> Result<usize, MeteoError> {
        let records = self.ingestor.ingest_folder(folder)?;
        let count = records.len();
        for record in records {
            self.repository.save(record)?;
        }
        info!("Imported {} observations from {}", count, folder.display());
        Ok(count)
    }

    pub fn find_all(&self) -> Result<Vec<Observation>, MeteoError> {
        Ok(self.repository.find_all()?)
    }

    /// # Errors
    ///
    /// [`MeteoError::NotFound`] if no observation has `id`.
    pub fn find_by_id(&self, id: Uuid) -> Result<Observation, MeteoError> {
        self.repository
            .find_by_id(id)?
            .ok_or(MeteoError::NotFound(id))
    }

    pub fn save(&self, observation: Observation) -> Result<Observation, MeteoError> {
        Ok(self.repository.save(observation)?)
    }

    /// Replaces the observation stored under `id`; the result keeps `id`.
    ///
    /// # Errors
    ///
    /// [`MeteoError::NotFound`] if no observation has `id`.
    pub fn update(&self, id: Uuid, observation: Observation) -> Result<Observation, MeteoError> {
        self.find_by_id(id)?;
        Ok(self.repository.update(id, observation)?)
    }

    /// Returns whether an observation was removed.
    pub fn delete(&self, id: Uuid) -> Result<bool, MeteoError> {
        let deleted = self.repository.delete(id)?;
        if !deleted {
            warn!("Nothing to delete for id {}", id);
        }
        Ok(deleted)
    }

    /// Reads every stored observation into memory for aggregation.
    pub fn load_dataset(&self) -> Result<Dataset, MeteoError> {
        Ok(Dataset::from(self.repository.find_all()?))
    }

    /// Exports the stored observations of `province` (matched ignoring case) under the
    /// province's name.
    ///
    /// # Returns
    ///
    /// The path written by `exporter`, e.g. `out/Zaragoza.json`, or `out/Araba_Álava.json`
    /// for `Araba/Álava` with a [`crate::JsonExporter`].
    pub fn export_province<E: Exporter>(
        &self,
        province: &str,
        exporter: &E,
    ) -> Result<PathBuf, MeteoError> {
        let dataset = self.load_dataset()?;
        let records = filter_by_province(dataset.records(), province);
        if records.is_empty() {
            warn!("No observations found for province {}", province);
        }
        Ok(exporter.export(&records, province)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::JsonExporter;
    use crate::storage::repository::InMemoryRepository;
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn nil_id() -> Uuid {
        Uuid::nil()
    }

    fn obs(location: &str, province: &str) -> Observation {
        Observation::builder()
            .date(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap())
            .location(location)
            .province(province)
            .max_temperature(10.0)
            .min_temperature(1.0)
            .precipitation(0.0)
            .build()
    }

    fn service() -> MeteoService<InMemoryRepository> {
        MeteoService::builder()
            .repository(InMemoryRepository::new())
            .build()
    }

    fn write_day(dir: &Path, name: &str) -> std::io::Result<()> {
        fs::write(
            dir.join(name),
            b"Leci\xf1ena;Zaragoza;14.2;15:40;-1.3;7:10;0.0\n\
              Caspe;Zaragoza;16.8;14:50;2.1;6:40;1.4\n\
              Ayerbe;Huesca;13.0;15:10;-4.0;7:30;0.2\n",
        )
    }

    #[test]
    fn test_import_then_group_by_date_and_province() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        write_day(temp.path(), "20170101.csv")?;
        write_day(temp.path(), "20170102.csv")?;

        let service = service();
        assert_eq!(service.import_folder(temp.path())?, 6);

        let dataset = service.load_dataset()?;
        let mut groups: Vec<(NaiveDate, String, usize)> = dataset
            .group_by_date_then_province()
            .iter()
            .map(|g| (g.date, g.province.to_string(), g.records.len()))
            .collect();
        groups.sort();

        let jan = |d| NaiveDate::from_ymd_opt(2017, 1, d).unwrap();
        assert_eq!(
            groups,
            vec![
                (jan(1), "Huesca".to_string(), 1),
                (jan(1), "Zaragoza".to_string(), 2),
                (jan(2), "Huesca".to_string(), 1),
                (jan(2), "Zaragoza".to_string(), 2),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_failed_import_saves_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        write_day(temp.path(), "20170101.csv")?;
        fs::write(temp.path().join("20170102.csv"), "Ayerbe;Huesca;13.0;15:10;-4.0;7:30\n")?;

        let service = service();
        let err = service.import_folder(temp.path()).unwrap_err();
        assert!(matches!(err, MeteoError::Ingest(_)));
        assert!(service.find_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_import_with_fixed_ids_reports_duplicates() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        write_day(temp.path(), "20170101.csv")?;

        let service = MeteoService::builder()
            .repository(InMemoryRepository::new())
            .ingestor(Ingestor::with_id_generator(nil_id))
            .build();
        let err = service.import_folder(temp.path()).unwrap_err();
        assert!(matches!(err, MeteoError::Storage(_)));
        Ok(())
    }

    #[test]
    fn test_lookups_require_existence() -> Result<(), MeteoError> {
        let service = service();
        let missing = Uuid::from_u128(99);

        assert!(matches!(service.find_by_id(missing), Err(MeteoError::NotFound(id)) if id == missing));
        assert!(matches!(
            service.update(missing, obs("Jaca", "Huesca")),
            Err(MeteoError::NotFound(id)) if id == missing
        ));
        assert!(!service.delete(missing)?);
        Ok(())
    }

    #[test]
    fn test_save_find_update_delete() -> Result<(), MeteoError> {
        let service = service();
        let saved = service.save(obs("Jaca", "Huesca"))?;
        assert_eq!(service.find_by_id(saved.id)?, saved);

        let updated = service.update(saved.id, obs("Fraga", "Huesca"))?;
        assert_eq!(updated.id, saved.id);
        assert_eq!(service.find_by_id(saved.id)?.location, "Fraga");

        assert!(service.delete(saved.id)?);
        assert!(service.find_all()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_export_province_ignores_case() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let service = service();
        service.save(obs("Leciñena", "Zaragoza"))?;
        service.save(obs("Ayerbe", "Huesca"))?;
        service.save(obs("Caspe", "ZARAGOZA"))?;

        let exporter = JsonExporter::new(temp.path().join("out"));
        let path = service.export_province("zaragoza", &exporter)?;
        assert_eq!(path, temp.path().join("out").join("zaragoza.json"));

        let exported: Vec<Observation> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        let locations: Vec<&str> = exported.iter().map(|r| r.location.as_str()).collect();
        assert_eq!(locations, ["Leciñena", "Caspe"]);
        Ok(())
    }

    #[test]
    fn test_export_province_with_slash_in_name() -> Result<(), Box<dyn std::error::Error>> {
        let temp = TempDir::new()?;
        let out_dir = temp.path().join("out");
        let service = service();
        service.save(obs("Vitoria-Gasteiz", "Araba/Álava"))?;
        service.save(obs("Alicante", "Alicante/Alacant"))?;

        let path = service.export_province("Araba/Álava", &JsonExporter::new(&out_dir))?;

        assert_eq!(path, out_dir.join("Araba_Álava.json"));
        let exported: Vec<Observation> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].province, "Araba/Álava");
        Ok(())
    }
}
