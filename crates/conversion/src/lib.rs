//! Conversion Engine
//!
//! Lossless hub-and-spoke conversion for versioned Kubernetes custom resources.
//!
//! A spoke version converts to the hub structurally, then patches back fields the
//! structural mapping cannot carry using a snapshot of the other version stored
//! in the `cluster.x-k8s.io/conversion-data` annotation:
//!
//! 1. read the previous snapshot from the source object's annotation
//! 2. run the structural forward conversion
//! 3. run the destination version's restorers against the snapshot
//! 4. store the source object as the new snapshot on the result
//!
//! Hash-gated restorers only fire when the field is unchanged since the snapshot
//! was written, so edits made directly in the destination version are kept.
//!
//! # Modules
//!
//! - [`tags`]: comma-joined tag string ↔ tag list
//! - [`optional`]: zero-value optionality ↔ `Option<T>`
//! - [`restorer`]: restorers and the ordered restorer registry
//! - [`snapshot`]: the annotation store and [`convert_and_restore`]

pub mod convertible;
pub mod error;
pub mod hash;
pub mod optional;
pub mod restorer;
pub mod snapshot;
pub mod tags;

pub use convertible::{Convertible, Hub};
pub use error::ConversionError;
pub use hash::content_hash;
pub use optional::{from_optional, to_optional};
pub use restorer::{Field, HashedFieldRestorer, Restorer, RestorerFor, UnconditionalFieldRestorer};
pub use snapshot::{
    CONVERSION_DATA_ANNOTATION, RestoreData, convert_and_restore, read_restore_data, snapshot_of,
    write_restore_data,
};
pub use tags::{join_tags, split_tags};
