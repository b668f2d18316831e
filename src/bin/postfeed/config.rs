use std::env;
use std::path::PathBuf;

use postfeed::config::{read_config, Config};

use crate::config_data::write_sample_cfg;
use crate::CFG_FILE_NAME;

const ENV_API_ENDPOINT: &str = "POSTFEED_API_ENDPOINT";
const ENV_ACCESS_TOKEN: &str = "POSTFEED_ACCESS_TOKEN";

fn candidate_dirs() -> Vec<PathBuf> {
    let mut candidates = vec![];
    if let Some(exe_dir) = env::current_exe().ok().and_then(|p| p.parent().map(|d| d.to_path_buf())) {
        candidates.push(exe_dir);
    }
    if let Ok(cur_dir) = env::current_dir() {
        candidates.push(cur_dir);
    }
    if let Some(cfg_dir) = dirs::config_dir() {
        candidates.push(cfg_dir);
    }
    candidates
}

fn get_config_path() -> Option<PathBuf> {
    candidate_dirs()
        .into_iter()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(get_config_path) {
        None => return Err("Could not find postfeed configuration".to_string()),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path).map_err(|e| e.to_string())?;

    if let Ok(endpoint) = env::var(ENV_API_ENDPOINT) {
        println!("Using content API endpoint from {}", ENV_API_ENDPOINT);
        config.content_api.endpoint = endpoint;
    }
    if let Ok(token) = env::var(ENV_ACCESS_TOKEN) {
        config.content_api.access_token = Some(token);
    }

    if let Some(mut log) = config.log {
        if log.location.is_none() {
            log.location = dirs::cache_dir().map(|d| d.join("postfeed").join("log").join("server.log"));
        }
        match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. Using console only"),
        }
        config.log = Some(log);
    } else {
        println!("Log disabled. Using stdout");
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<PathBuf>) -> Result<PathBuf, String> {
    let path = match config_path {
        Some(path) => path,
        None => match dirs::config_dir() {
            Some(cfg_dir) => cfg_dir.join(CFG_FILE_NAME),
            None => return Err("Could not find user config dir".to_string()),
        },
    };

    println!("Writing sample config to {}", path.display());
    write_sample_cfg(&path).map_err(|e| format!("Error writing {}: {}", path.display(), e))?;

    Ok(path)
}
