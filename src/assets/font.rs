use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{HandwriteError, HandwriteResult};

/// Font resource loaded from TTF/OTF bytes.
///
/// Construction registers the bytes with a scratch Parley font collection, so a value of this
/// type is known to contain at least one usable family.
#[derive(Clone, Debug)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl FontAsset {
    /// Read and validate a font file.
    pub fn from_path(path: &Path) -> HandwriteResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| HandwriteError::resource(format!("{e:#}")))?;
        Self::from_bytes(bytes)
    }

    /// Validate font bytes and resolve their family name.
    pub fn from_bytes(bytes: Vec<u8>) -> HandwriteResult<Self> {
        let bytes = Arc::new(bytes);
        let mut collection =
            parley::fontique::Collection::new(parley::fontique::CollectionOptions {
                shared: false,
                system_fonts: false,
            });
        let family = register_family(&mut collection, &bytes)?;
        Ok(Self { bytes, family })
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Shared handle to the raw font bytes.
    pub(crate) fn shared_bytes(&self) -> Arc<Vec<u8>> {
        self.bytes.clone()
    }

    /// Family name of the first face in the font.
    pub fn family(&self) -> &str {
        &self.family
    }
}

/// Register font bytes into `collection` and return the first family name.
pub(crate) fn register_family(
    collection: &mut parley::fontique::Collection,
    bytes: &Arc<Vec<u8>>,
) -> HandwriteResult<String> {
    let blob = parley::fontique::Blob::new(bytes.clone());
    let families = collection.register_fonts(blob, None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| HandwriteError::resource("no font families registered from font bytes"))?;

    Ok(collection
        .family_name(family_id)
        .ok_or_else(|| HandwriteError::resource("registered font family has no name"))?
        .to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
