pub mod snapshot_loader;

pub use snapshot_loader::{
    load_all_snapshots, load_test_snapshot, parse_snapshot, LoadedSnapshot, SnapshotFormat,
};
