//! Player Module - per-frame driver
//!
//! - player_traits.rs: weight source and mesh sink seams
//! - player_data.rs: PlayerData, NO methods
//! - player_operations.rs: create, update, shutdown

pub mod player_data;
pub mod player_operations;
pub mod player_traits;

pub use player_data::PlayerData;
pub use player_operations::{create_player, is_active, shutdown_player, update_player};
pub use player_traits::{MeshSink, WeightSource};
