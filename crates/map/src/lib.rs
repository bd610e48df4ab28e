//! Compact per-tile world storage with typed accessors.
//!
//! The map is two parallel arrays of small fixed-size records
//! ([`storage::WorldMap`]); what the record bytes mean depends on the tile
//! type discriminant stored with them. One module per tile-kind family
//! interprets the shared bytes under that family's layout (bridges,
//! tunnels, depots, void), guarded by the precondition policy in
//! [`contract`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod ascii_map;
pub mod bits;
pub mod bridge;
pub mod config;
pub mod contract;
pub mod coords;
pub mod depot;
pub mod storage;
pub mod tunnel;
pub mod tunnel_bridge;
pub mod void;


use config::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH};
use storage::WorldMap;

/// Dimensions for the next map allocation. World-creation code overrides
/// this before startup; both values must be powers of two.
#[derive(Resource, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MapSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
        }
    }
}

/// Owns the [`WorldMap`] lifecycle: allocates the record arrays at
/// startup from [`MapSettings`]. Everything else in this crate is pure
/// functions over the resource.
pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapSettings>()
            .add_systems(Startup, init_world_map);
    }
}

fn init_world_map(mut commands: Commands, settings: Res<MapSettings>) {
    info!(
        "allocating {}x{} world map",
        settings.width, settings.height
    );
    commands.insert_resource(WorldMap::new(settings.width, settings.height));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_allocates_map() {
        let mut app = App::new();
        app.insert_resource(MapSettings {
            width: 64,
            height: 128,
        });
        app.add_plugins(MapPlugin);
        app.update();

        let map = app.world().resource::<WorldMap>();
        assert_eq!(map.width(), 64);
        assert_eq!(map.height(), 128);
    }

    #[test]
    fn test_default_settings() {
        let settings = MapSettings::default();
        assert!(settings.width.is_power_of_two());
        assert!(settings.height.is_power_of_two());
    }
}
