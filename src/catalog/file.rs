use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::{
    Catalog,
    po::{read_po, write_po},
};

/// A catalog loaded from disk, written back on [`CatalogFile::save`].
pub struct CatalogFile {
    path: PathBuf,
    catalog: Catalog,
}

impl CatalogFile {
    /// Open an existing catalog file. A missing file is an error; catalogs
    /// are created by the extraction tool, never implicitly.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Catalog not found: {}", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
            catalog: read_po(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn save(&self) -> Result<()> {
        write_po(&self.path, &self.catalog)
    }
}

/// Open the catalog at `path`, hand it to `edit`, and write it back if
/// `edit` succeeds. On error the file is left untouched.
pub fn edit_catalog<T>(path: &Path, edit: impl FnOnce(&mut Catalog) -> Result<T>) -> Result<T> {
    let mut file = CatalogFile::open(path)?;
    let value = edit(file.catalog_mut())?;
    file.save()?;
    Ok(value)
}
