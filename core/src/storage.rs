use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{CalorieError, Result};
use crate::pipeline::FittedPipeline;

/// Lagrer trent pipeline til disk som JSON. Mapper opprettes ved behov,
/// eksisterende fil overskrives.
pub fn save_pipeline<P: AsRef<Path>>(pipeline: &FittedPipeline, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut out, pipeline)?;
    out.flush()?;
    log::info!("✅ Modell lagret til {} ({})", path.display(), pipeline.kind());
    Ok(())
}

/// Leser trent pipeline fra disk. Manglende fil er en feil: uten modell
/// kan ingenting predikeres.
pub fn load_pipeline<P: AsRef<Path>>(path: P) -> Result<FittedPipeline> {
    let path = path.as_ref();
    if !path.exists() {
        log::warn!("⚠️ Fant ikke modell på {}", path.display());
        return Err(CalorieError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("model file {} not found", path.display()),
        )));
    }
    let reader = BufReader::new(File::open(path)?);
    let pipeline: FittedPipeline = serde_json::from_reader(reader)?;
    log::info!("📂 Modell lastet fra {} ({})", path.display(), pipeline.kind());
    Ok(pipeline)
}
