//! Runtime settings for the command line tool.

use bon::Builder;
use std::path::PathBuf;

/// Environment variable naming the folder of daily data files.
pub const DATA_DIR_VAR: &str = "AEMET_DATA_DIR";
/// Environment variable naming the folder exports are written to.
pub const OUT_DIR_VAR: &str = "AEMET_OUT_DIR";

/// Where to read from, where to write to, and which province to report on.
///
/// # Examples
///
/// ```
/// use aemet_stats::AppConfig;
/// use std::path::PathBuf;
///
/// let config = AppConfig::builder().province("Zaragoza".to_string()).build();
/// assert_eq!(config.data_dir, PathBuf::from("data"));
/// assert_eq!(config.out_dir, PathBuf::from("out"));
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct AppConfig {
    #[builder(default = PathBuf::from("data"), into)]
    pub data_dir: PathBuf,
    #[builder(default = PathBuf::from("out"), into)]
    pub out_dir: PathBuf,
    /// When set, a daily report and a JSON export are produced for this province.
    pub province: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AppConfig {
    /// Reads `[DATA_DIR] [PROVINCE]` from `args` (program name already skipped).
    ///
    /// A positional argument beats the matching environment variable
    /// ([`DATA_DIR_VAR`], [`OUT_DIR_VAR`]), which beats the default.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    fn resolve<I, E>(args: I, env: E) -> Self
    where
        I: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let data_dir = args
            .next()
            .or_else(|| env(DATA_DIR_VAR))
            .map(PathBuf::from);
        let province = args.next().filter(|p| !p.trim().is_empty());
        let out_dir = env(OUT_DIR_VAR).map(PathBuf::from);

        AppConfig::builder()
            .maybe_data_dir(data_dir)
            .maybe_out_dir(out_dir)
            .maybe_province(province)
            .build()
    }
}
