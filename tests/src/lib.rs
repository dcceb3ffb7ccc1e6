//! Helpers shared by the integration tests of every crate in the workspace.

use std::path::Path;

use anyhow::{bail, Result};

use intersection::{DecodeOptions, DecodedIntersection};

/// Resolves a path relative to the `tests` crate, so tests behave the same no matter which crate
/// they run from. Fails if the file doesn't exist.
pub fn get_test_file_path(path: String) -> Result<String> {
    let full = Path::new(env!("CARGO_MANIFEST_DIR")).join(&path);
    if !full.exists() {
        bail!("Test file {} doesn't exist at {}", path, full.display());
    }
    Ok(full.to_string_lossy().into_owned())
}

/// Decodes one of the MAP messages in `tests/input`, named by its file stem.
pub fn decode_input(name: &str, opts: &DecodeOptions) -> Result<DecodedIntersection> {
    let path = get_test_file_path(format!("input/{}.json", name))?;
    let bytes = util::slurp_file(&path)?;
    intersection::decode_bytes(&bytes, &util::file_name(&path), opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_test_file_path_tests_crate() {
        for f in [
            "input/simple_direct.json",
            "input/computed_lanes.json",
            "input/broken_lanes.json",
            "input/no_ref_point.json",
            "input/not_map_data.json",
        ] {
            assert!(get_test_file_path(f.to_string()).is_ok(), "{} missing", f);
        }

        for f in ["does_not_exist", "/really/should/not/exist"] {
            assert!(get_test_file_path(f.to_string()).is_err());
        }
    }
}
