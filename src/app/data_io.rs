fn temp_output_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "categories.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}

// Written beside the target and renamed over it; readers never see a partial file.
fn write_categories(path: &Path, records: &[CategoryRecord]) -> Result<(), ScrapeError> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');

    let tmp = temp_output_path(path);
    fs::write(&tmp, json).map_err(|source| ScrapeError::Io {
        path: tmp.display().to_string(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| {
        let _ = fs::remove_file(&tmp);
        ScrapeError::Io {
            path: path.display().to_string(),
            source,
        }
    })
}

fn categories_without_image(records: &[CategoryRecord]) -> Vec<&str> {
    records
        .iter()
        .filter(|r| r.image_url.is_none())
        .map(|r| r.name.as_str())
        .collect()
}
