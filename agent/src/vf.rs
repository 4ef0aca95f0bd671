// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Virtual function index lookup.
//!
//! The flow service addresses a VF by its index on the physical function of the port. The PF
//! lists its VFs in sysfs as `virtfn<N>` links to the VF device directories.

use std::path::{Path, PathBuf};

use rte::pci::{InvalidPciAddress, PciAddress};
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub(crate) enum VfError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{vf} is not a VF of {pf}")]
    NotFound { pf: PciAddress, vf: PciAddress },
    #[error(transparent)]
    Pci(#[from] InvalidPciAddress),
}

/// Maps the PCI address of a VF to its index on a PF.
pub(crate) trait VfLookup {
    fn vf_index(&self, pf: &PciAddress, vf: &PciAddress) -> Result<u32, VfError>;
}

/// [`VfLookup`] reading sysfs.
#[derive(Debug, Clone)]
pub(crate) struct SysfsVfLookup {
    root: PathBuf,
}

impl SysfsVfLookup {
    /// `root` is the sysfs mount point, normally `/sys`.
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn device_dir(&self, pci: &PciAddress) -> PathBuf {
        self.root.join("bus/pci/devices").join(pci.to_string())
    }
}

fn virtfn_index(name: &str) -> Option<u32> {
    name.strip_prefix("virtfn")?.parse().ok()
}

fn link_target(path: &Path) -> Result<Option<PciAddress>, VfError> {
    let target = std::fs::read_link(path).map_err(|source| VfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(name) = target.file_name().and_then(|n| n.to_str()) else {
        return Ok(None);
    };
    Ok(Some(PciAddress::try_from(name)?))
}

impl VfLookup for SysfsVfLookup {
    fn vf_index(&self, pf: &PciAddress, vf: &PciAddress) -> Result<u32, VfError> {
        let dir = self.device_dir(pf);
        let entries = std::fs::read_dir(&dir).map_err(|source| VfError::Io {
            path: dir.clone(),
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| VfError::Io {
                path: dir.clone(),
                source,
            })?;
            let Some(index) = entry.file_name().to_str().and_then(virtfn_index) else {
                continue;
            };
            if link_target(&entry.path())?.as_ref() == Some(vf) {
                trace!("{vf} is VF {index} of {pf}");
                return Ok(index);
            }
        }
        Err(VfError::NotFound { pf: *pf, vf: *vf })
    }
}
