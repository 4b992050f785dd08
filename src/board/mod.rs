//! The board: where tiles are placed and areas grow.
//!
//! `Board` owns the placed tiles and the four zone partitions. It decides
//! which placements are legal, keeps the partitions in step with every
//! placement, and answers the closure and adjacency queries used for scoring.
//! Nothing outside the game state mutates a board; every change yields a new
//! value.

pub mod grid;

pub use grid::Board;
