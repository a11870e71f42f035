//! Application paths
//!
//! Data (store, preview, logs):
//! - macOS: ~/Library/Application Support/mocode/
//! - Linux: $XDG_DATA_HOME/mocode/ or ~/.local/share/mocode/
//! - Windows: %APPDATA%\mocode\
//!
//! Settings live under the cache root: `<cache>/.mocode/setting.json`.

use std::path::PathBuf;

const APP_NAME: &str = "mocode";
const STORE_DIR: &str = "store";
const PREVIEW_DIR: &str = "preview";
const LOG_DIR: &str = "logs";
const SETTINGS_DIR: &str = ".mocode";
const SETTINGS_FILE: &str = "setting.json";

#[derive(Debug, Clone, Copy)]
enum Root {
    Data,
    Cache,
}

#[cfg(any(target_os = "macos", target_os = "linux", target_os = "windows"))]
fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn platform_root(root: Root) -> Option<PathBuf> {
    let sub = match root {
        Root::Data => "Library/Application Support",
        Root::Cache => "Library/Caches",
    };
    env_dir("HOME").map(|home| home.join(sub))
}

#[cfg(target_os = "linux")]
fn platform_root(root: Root) -> Option<PathBuf> {
    let (xdg, fallback) = match root {
        Root::Data => ("XDG_DATA_HOME", ".local/share"),
        Root::Cache => ("XDG_CACHE_HOME", ".cache"),
    };
    env_dir(xdg).or_else(|| env_dir("HOME").map(|home| home.join(fallback)))
}

#[cfg(target_os = "windows")]
fn platform_root(root: Root) -> Option<PathBuf> {
    match root {
        Root::Data => env_dir("APPDATA"),
        Root::Cache => env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA")),
    }
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn platform_root(_root: Root) -> Option<PathBuf> {
    None
}

fn get_app_data_dir() -> Option<PathBuf> {
    platform_root(Root::Data).map(|dir| dir.join(APP_NAME))
}

pub fn get_settings_path() -> Option<PathBuf> {
    platform_root(Root::Cache).map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn get_store_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STORE_DIR))
}

pub fn get_preview_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(PREVIEW_DIR))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {} directory", what),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn ensure_store_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_store_dir(), "store")
}

pub fn ensure_preview_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_preview_dir(), "preview")
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}
