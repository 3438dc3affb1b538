//! The contract the sync operations need from a translation service.

use crate::{
    error::Error,
    paratranz::types::{ParatranzFile, ParatranzItem, RemoteFile},
};

/// Access to a ParaTranz project.
///
/// Implementations do the network (or disk) work; the core never retries a
/// failed call and hands the error back to the caller untouched.
pub trait Client: Sync {
    /// Lists every file of the project.
    fn files(&self) -> Result<Vec<RemoteFile>, Error>;

    /// Fetches the strings, with their current translations, of one file.
    fn strings(&self, file: &RemoteFile) -> Result<Vec<ParatranzItem>, Error>;

    /// Uploads a record, replacing `existing` when the file is already known.
    fn upload(&self, file: &ParatranzFile, existing: Option<&RemoteFile>) -> Result<(), Error>;
}
