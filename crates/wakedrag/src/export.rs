use std::fs::File;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::io::parquet::write::{ParquetCompression, ParquetWriter};
use polars::prelude::*;

/// Writes `df` as CSV or Parquet depending on the extension of `path`.
pub fn write_frame(path: &Path, df: &DataFrame) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);

    let parquet = match extension.as_deref() {
        Some("parquet") => true,
        Some("csv") => false,
        Some(other) => bail!("unsupported export format '.{other}'; use .csv or .parquet"),
        None => bail!("cannot infer export format of {}; use .csv or .parquet", path.display()),
    };

    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut frame = df.clone();

    if parquet {
        ParquetWriter::new(&mut file)
            .with_compression(ParquetCompression::Zstd(None))
            .finish(&mut frame)
            .with_context(|| format!("failed to write parquet to {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame)
            .with_context(|| format!("failed to write csv to {}", path.display()))?;
    }

    Ok(())
}
