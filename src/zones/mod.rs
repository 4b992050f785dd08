//! Region connectivity: areas and the partitions that group them.
//!
//! ## Key Types
//!
//! - `Area<Z>`: a connected region of zones of one kind, with its occupants
//!   and its count of open connections
//! - `ZonePartition<Z>`: disjoint areas covering every zone of one kind
//! - `ZonePartitions`: the forest, meadow, river and river-system partitions
//!   of a board, updated together
//!
//! Every type here is an immutable value. Updates go through the matching
//! builder, which is created, used and dropped within a single board update.

pub mod area;
pub mod partition;
pub mod partitions;

pub use area::{animal_counts, Area};
pub use partition::{ZonePartition, ZonePartitionBuilder};
pub use partitions::{ZonePartitions, ZonePartitionsBuilder};
