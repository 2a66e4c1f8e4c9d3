use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub(crate) fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

pub(crate) fn read_document<T, E>(path: &Path) -> Result<T, E>
where
    T: DeserializeOwned,
    E: From<std::io::Error> + From<serde_json::Error> + From<serde_yaml::Error>,
{
    let raw = fs::read_to_string(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str::<T>(&raw)?)
    } else {
        Ok(serde_json::from_str::<T>(&raw)?)
    }
}

pub(crate) fn write_document<T, E>(path: &Path, value: &T) -> Result<(), E>
where
    T: Serialize + ?Sized,
    E: From<std::io::Error> + From<serde_json::Error> + From<serde_yaml::Error>,
{
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    fs::write(path, serialized)?;
    Ok(())
}
