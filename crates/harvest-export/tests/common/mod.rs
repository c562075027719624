#![allow(dead_code)]

use std::path::{Path, PathBuf};

use harvest_export::ReportAssets;
use harvest_export::fonts::FontStyle;
use tempfile::TempDir;

const SYSTEM_FONT_DIR: &str = "/usr/share/fonts/truetype/dejavu";

/// Directory holding all four DejaVu Sans faces, if this machine has one.
pub fn font_dir() -> Option<PathBuf> {
    let dir = std::env::var_os("HARVEST_TEST_FONT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SYSTEM_FONT_DIR));
    let complete = FontStyle::ALL
        .iter()
        .all(|style| dir.join(style.file_name()).is_file());
    complete.then_some(dir)
}

/// A resource directory with `fonts/` populated and no logo, or `None`
/// when no font source is available.
pub fn resource_dir() -> Option<TempDir> {
    let source = font_dir()?;
    let dir = TempDir::new().ok()?;
    copy_fonts(&source, &dir.path().join("fonts")).ok()?;
    Some(dir)
}

pub fn load_assets() -> Option<(TempDir, ReportAssets)> {
    let dir = resource_dir()?;
    let assets = ReportAssets::load(dir.path()).ok()?;
    Some((dir, assets))
}

fn copy_fonts(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(to)?;
    for style in FontStyle::ALL {
        std::fs::copy(from.join(style.file_name()), to.join(style.file_name()))?;
    }
    Ok(())
}
