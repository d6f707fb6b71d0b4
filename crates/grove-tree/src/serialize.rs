//! Model serialization and deserialization via bincode.

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, info, instrument};

use crate::error::TreeError;
use crate::forest::Ensemble;

/// Current binary format version.
const FORMAT_VERSION: u32 = 1;

/// Versioned envelope written to disk.
#[derive(serde::Serialize)]
struct EnvelopeRef<'a, P, D> {
    /// Format version for compatibility checking.
    format_version: u32,
    /// Number of members in the ensemble.
    n_members: usize,
    /// Size of the label domain.
    n_labels: usize,
    /// The serialized ensemble.
    ensemble: &'a Ensemble<P, D>,
}

/// Owned counterpart of [`EnvelopeRef`]; the field order must match.
#[derive(serde::Deserialize)]
struct Envelope<P, D> {
    format_version: u32,
    n_members: usize,
    n_labels: usize,
    ensemble: Ensemble<P, D>,
}

impl<P, D> Ensemble<P, D> {
    /// Save the ensemble to a binary file.
    ///
    /// Uses bincode encoding wrapped in a versioned envelope for
    /// forward-compatibility checking.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::SerializeModel`] | bincode encoding failed |
    /// | [`TreeError::WriteModel`] | file write failed |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TreeError>
    where
        P: Serialize,
        D: Serialize,
    {
        let path = path.as_ref();

        let envelope = EnvelopeRef {
            format_version: FORMAT_VERSION,
            n_members: self.members.len(),
            n_labels: self.n_labels,
            ensemble: self,
        };

        let bytes = bincode::serialize(&envelope)
            .map_err(|source| TreeError::SerializeModel { source })?;

        std::fs::write(path, &bytes).map_err(|source| TreeError::WriteModel {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            size_bytes = bytes.len(),
            n_members = self.members.len(),
            "ensemble saved"
        );

        Ok(())
    }

    /// Load an ensemble from a binary file.
    ///
    /// Checks the format version and returns an error on mismatch.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TreeError::ReadModel`] | file read failed |
    /// | [`TreeError::DeserializeModel`] | bincode decoding failed |
    /// | [`TreeError::IncompatibleModelVersion`] | format version mismatch |
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TreeError>
    where
        P: DeserializeOwned,
        D: DeserializeOwned,
    {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|source| TreeError::ReadModel {
            path: path.to_path_buf(),
            source,
        })?;

        // The version is the leading field, so it can be checked before the
        // payload is decoded.
        let format_version: u32 =
            bincode::deserialize(&bytes).map_err(|source| TreeError::DeserializeModel {
                path: path.to_path_buf(),
                source,
            })?;
        if format_version != FORMAT_VERSION {
            return Err(TreeError::IncompatibleModelVersion {
                expected: FORMAT_VERSION,
                found: format_version,
                path: path.to_path_buf(),
            });
        }

        let envelope: Envelope<P, D> =
            bincode::deserialize(&bytes).map_err(|source| TreeError::DeserializeModel {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            format_version = envelope.format_version,
            n_members = envelope.n_members,
            n_labels = envelope.n_labels,
            "ensemble loaded"
        );

        Ok(envelope.ensemble)
    }
}
