mod aggregation;
mod config;
mod error;
mod export;
mod ingest;
mod report;
mod service;
mod storage;
mod types;

pub use config::{AppConfig, DATA_DIR_VAR, OUT_DIR_VAR};
pub use error::MeteoError;
pub use report::format_overview;
pub use service::MeteoService;

pub use types::aggregates::{DayAggregate, ProvinceDayAggregate, ProvinceGroup};
pub use types::observation::Observation;

pub use ingest::encoding::{decode_legacy_line, recode_field};
pub use ingest::ingestor::{date_from_file_name, IdGenerator, Ingestor};
pub use ingest::record_parser::{parse_record, parse_time_of_day, FIELD_COUNT};

pub use aggregation::dataset::Dataset;
pub use aggregation::extrema::{average, max_by, min_by};
pub use aggregation::grouping::{
    filter_by_province, group_by_date, group_by_date_then_province, group_by_province,
};
pub use aggregation::statistics::{
    average_precipitation, daily_aggregates, day_aggregate, max_precipitation_record,
    max_temperature_value, min_temperature_value, province_daily_aggregates,
    province_day_aggregate, with_precipitation,
};

pub use export::json::{file_stem, Exporter, JsonExporter};
pub use storage::repository::{InMemoryRepository, Repository};

pub use export::error::ExportError;
pub use ingest::error::{IngestError, MalformedReason, MalformedRecordError, RecordField};
pub use storage::error::StorageError;
