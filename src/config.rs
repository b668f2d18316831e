use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::date_format::{DEFAULT_DATE_FORMAT, DEFAULT_LOCALE};

#[derive(Deserialize)]
pub struct Paths {
    pub template_dir: Option<PathBuf>,
    pub public_dir: PathBuf,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LoadMode {
    /// First page fetched once when the server starts
    Startup,
    /// First page fetched on every request
    Request,
}

fn default_document_type() -> String { "posts".to_string() }
fn default_page_size() -> u32 { 2 }
fn default_order_field() -> String { "last_publication_date".to_string() }
fn default_order_direction() -> OrderDirection { OrderDirection::Desc }
fn default_load_mode() -> LoadMode { LoadMode::Startup }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Deserialize)]
pub struct ContentApi {
    pub endpoint: String,
    pub access_token: Option<String>,
    #[serde(default = "default_document_type")]
    pub document_type: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_order_field")]
    pub order_field: String,
    #[serde(default = "default_order_direction")]
    pub order_direction: OrderDirection,
    #[serde(default = "default_load_mode")]
    pub load_mode: LoadMode,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_date_format() -> String { DEFAULT_DATE_FORMAT.to_string() }
fn default_locale() -> String { DEFAULT_LOCALE.to_string() }
fn default_load_more_label() -> String { "Carregar mais posts".to_string() }
fn default_max_batches() -> u32 { 50 }

#[derive(Deserialize)]
pub struct View {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_load_more_label")]
    pub load_more_label: String,
    #[serde(default = "default_max_batches")]
    pub max_batches: u32,
}

impl Default for View {
    fn default() -> Self {
        View {
            date_format: default_date_format(),
            locale: default_locale(),
            load_more_label: default_load_more_label(),
            max_batches: default_max_batches(),
        }
    }
}

#[derive(Deserialize)]
pub struct Server {
    pub address: String,
    pub port: u16,
}

fn default_max_log_files() -> usize { 60 }
fn default_flush_period_secs() -> u64 { 2 }

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
    #[serde(default = "default_flush_period_secs")]
    pub flush_period_secs: u64,
}

#[derive(Deserialize, Copy, Clone, Debug, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub content_api: ContentApi,
    #[serde(default)]
    pub view: View,
    pub paths: Paths,
    pub server: Server,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> PathBuf {
    let Some(str_path) = path.to_str() else {
        return path;
    };
    if !str_path.starts_with("${exe_dir}") {
        return path;
    }

    let exe_dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    match exe_dir {
        Some(exe_dir) => PathBuf::from(str_path.replace("${exe_dir}", &exe_dir.to_string_lossy())),
        None => path,
    }
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    if cfg.content_api.page_size == 0 {
        return Err(io::Error::new(ErrorKind::InvalidData, "content_api.page_size has to be greater than 0"));
    }

    cfg.paths = Paths {
        template_dir: cfg.paths.template_dir.map(parse_path),
        public_dir: parse_path(cfg.paths.public_dir),
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
