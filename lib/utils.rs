//! Helpers for writing sampled pulses to disk.

use std::{ fs, path::Path };
use crate::error::PulseResult;

/// Create all missing parent directories of `path`.
pub fn create_parent_dirs<P>(path: P) -> PulseResult<()>
where P: AsRef<Path>
{
    if let Some(parent) = path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write a collection of arrays to a single `.npz` file, creating parent
/// directories as needed.
///
/// Evaluates to a [`PulseResult<()>`][crate::error::PulseResult].
///
/// ```ignore
/// write_npz!(
///     outdir.join("envelope.npz"),
///     arrays: {
///         "time" => &time,
///         "envelope" => &omega_p,
///     }
/// )?;
/// ```
#[macro_export]
macro_rules! write_npz {
    (
        $filename:expr,
        arrays: { $( $name:expr => $array:expr ),+ $(,)? } $(,)?
    ) => {
        (|| -> $crate::error::PulseResult<()> {
            let path = $filename;
            $crate::utils::create_parent_dirs(&path)?;
            let mut npz
                = $crate::ndarray_npy::NpzWriter::new(::std::fs::File::create(&path)?);
            $(
                npz.add_array($name, $array)?;
            )+
            npz.finish()?;
            Ok(())
        })()
    }
}
