use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn slurp_file<I: AsRef<str>>(path: I) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs_err::read(path).with_context(|| format!("reading {}", path))
}

pub fn read_json<T: DeserializeOwned, I: AsRef<str>>(path: I) -> Result<T> {
    let path = path.as_ref();
    let bytes = slurp_file(path)?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {} as JSON", path))
}

pub fn to_json<T: Serialize>(obj: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(obj)?)
}
