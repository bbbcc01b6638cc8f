mod admin;
mod grid;
mod read;
mod write;

pub use admin::{AdminLayer, AdminUnit};
pub use grid::{GridCell, GridLayer};

use ahash::AHashMap;
use anyhow::{bail, Result};

/// Map ids to contiguous indices, rejecting duplicates.
fn build_index<'a>(layer: &str, ids: impl Iterator<Item = &'a str>) -> Result<AHashMap<String, u32>> {
    let mut index = AHashMap::new();
    for (i, id) in ids.enumerate() {
        if index.insert(id.to_string(), i as u32).is_some() {
            bail!("duplicate id {id:?} in {layer} layer");
        }
    }
    Ok(index)
}
