use anyhow::Result;

use intersection::DecodedIntersection;

pub fn default_output(input: &str) -> String {
    format!("{}.geojson", util::basename(input))
}

pub fn run(decoded: &DecodedIntersection, output: String) -> Result<()> {
    fs_err::write(&output, decoded.to_geojson_string())?;
    info!(
        "Wrote {} with {} lanes and {} points",
        output,
        decoded.lane_features.len(),
        util::prettyprint_usize(decoded.point_features.len())
    );
    Ok(())
}
