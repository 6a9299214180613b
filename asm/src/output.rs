use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{band, Config};
use crate::emit;
use crate::error::Error;
use crate::image::Image;
use crate::listing::{Alias, La};

/// Fresh `<prefix>_<unix seconds><band>` directory under `base`.
pub fn run_dir(base: &Path, config: &Config, input: &str) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let name = format!("{}_{}{}", config.prefix, secs, band(input));
    let mut dir = base.join(&name);
    let mut n = 1;
    while dir.exists() {
        dir = base.join(format!("{}_{}", name, n));
        n += 1;
    }
    dir
}

fn write(path: &Path, data: &[u8]) -> Result<(), Error> {
    fs::write(path, data).map_err(|err| Error::FileWrite(path.display().to_string(), err))
}

/// Writes every artifact of `image`, the debug listings and a copy of the
/// source into `dir`, which is created.
pub fn write_all(dir: &Path, image: &Image, source: &Path, config: &Config) -> Result<(), Error> {
    fs::create_dir_all(dir).map_err(|err| Error::FileCreate(dir.display().to_string(), err))?;

    for artifact in emit::artifacts(image) {
        let path = dir.join(&artifact.name);
        log::debug!("write {}", path.display());
        write(&path, &artifact.data)?;
    }

    if config.listing {
        let mut la = La::new();
        let mut alias = Alias::new();
        image.for_each_state(&mut la);
        image.for_each_state(&mut alias);
        write(&dir.join("agc.la"), la.text().as_bytes())?;
        write(&dir.join("agc.alias"), alias.text().as_bytes())?;
    }

    if let Some(file_name) = source.file_name() {
        let copy = dir.join(file_name);
        fs::copy(source, &copy)
            .map_err(|err| Error::FileWrite(copy.display().to_string(), err))?;
    }
    Ok(())
}
