use crate::imagery::{ImageryError, ImagerySource};
use crate::map::{HeadlessMap, MapError};
use crate::model::{Basemap, ImageParams};
use crate::testing::FakeImageryService;

use super::{LayerError, LayerId, LayerManager};

fn source() -> ImagerySource {
    ImagerySource::sentinel2(ImageParams::default()).expect("source")
}

fn populated(count: usize) -> (LayerManager, HeadlessMap, FakeImageryService, Vec<LayerId>) {
    let mut layers = LayerManager::new();
    let mut map = HeadlessMap::new(Basemap::OsmHot);
    let service = FakeImageryService::new();
    let ids = (0..count)
        .map(|index| {
            layers
                .add(&mut map, &service, &format!("layer {index}"), source())
                .expect("add")
        })
        .collect();
    (layers, map, service, ids)
}

#[test]
fn added_layer_is_visible_and_the_only_selection() {
    let (layers, map, _, ids) = populated(2);

    assert_eq!(layers.len(), 2);
    assert_eq!(layers.selected_id(), Some(ids[1]));
    assert!(!layers.get(ids[0]).expect("layer").is_selected());
    let newest = layers.get(ids[1]).expect("layer");
    assert!(newest.is_visible());
    let handle = newest.render_handle().expect("handle");
    assert_eq!(
        map.tile_layer(handle).map(|(name, _)| name.to_string()),
        Some("layer 1".to_string())
    );
    assert_eq!(map.tile_layer_count(), 2);
}

#[test]
fn each_layer_owns_an_independent_source() {
    let (mut layers, _, _, ids) = populated(2);

    layers
        .get_mut(ids[0])
        .expect("layer")
        .source_mut()
        .set_band_range("B4", 1000.0, 2000.0)
        .expect("range");

    let untouched = layers.get(ids[1]).expect("layer").source();
    assert_eq!(untouched.bands().get("B4").expect("band").range(), (500.0, 3500.0));
}

#[test]
fn ids_are_never_reused() {
    let (mut layers, mut map, service, ids) = populated(2);
    layers.remove(&mut map, ids[1]).expect("remove");

    let next = layers
        .add(&mut map, &service, "again", source())
        .expect("add");

    assert!(next > ids[1]);
    assert_eq!(layers.ids(), [ids[0], next]);
}

#[test]
fn removing_selected_layer_selects_most_recent_remaining() {
    let (mut layers, mut map, _, ids) = populated(3);

    let removed = layers.remove(&mut map, ids[2]).expect("remove");
    assert_eq!(removed.id(), ids[2]);
    assert!(removed.render_handle().is_none());
    assert_eq!(layers.selected_id(), Some(ids[1]));
    assert_eq!(map.tile_layer_count(), 2);

    layers.select(ids[0]).expect("select");
    layers.remove(&mut map, ids[1]).expect("remove");
    assert_eq!(layers.selected_id(), Some(ids[0]));

    layers.remove(&mut map, ids[0]).expect("remove");
    assert!(matches!(layers.get_selected(), Err(LayerError::NoSelection)));
    assert_eq!(map.tile_layer_count(), 0);
}

#[test]
fn unknown_layer_is_reported() {
    let (mut layers, mut map, _, _) = populated(1);
    let missing = LayerId::new(99);
    assert!(matches!(
        layers.remove(&mut map, missing),
        Err(LayerError::UnknownLayer(id)) if id == missing
    ));
    assert!(matches!(
        layers.select(missing),
        Err(LayerError::UnknownLayer(_))
    ));
}

#[test]
fn visibility_changes_are_idempotent() {
    let (mut layers, mut map, _, ids) = populated(1);
    let id = ids[0];

    layers.set_visible(&mut map, id, false).expect("hide");
    layers.set_visible(&mut map, id, false).expect("hide again");
    assert_eq!(map.tile_layer_count(), 0);
    assert!(layers.get(id).expect("layer").render_handle().is_none());

    layers.set_visible(&mut map, id, true).expect("show");
    layers.set_visible(&mut map, id, true).expect("show again");
    assert_eq!(map.tile_layer_count(), 1);
    assert!(layers.get(id).expect("layer").render_handle().is_some());

    layers.set_visible(&mut map, id, false).expect("hide");
    layers.remove(&mut map, id).expect("remove hidden layer");
}

#[test]
fn failed_add_leaves_manager_untouched() {
    let (mut layers, mut map, service, ids) = populated(1);
    service.set_offline(true);

    let error = layers
        .add(&mut map, &service, "offline", source())
        .expect_err("offline");

    assert!(matches!(error, LayerError::Imagery(ImageryError::Service(_))));
    assert_eq!(layers.len(), 1);
    assert_eq!(layers.selected_id(), Some(ids[0]));
    assert_eq!(map.tile_layer_count(), 1);
}

#[test]
fn empty_names_are_rejected() {
    let (mut layers, mut map, service, ids) = populated(1);
    assert!(matches!(
        layers.add(&mut map, &service, "   ", source()),
        Err(LayerError::EmptyName)
    ));
    assert!(matches!(
        layers.rename(ids[0], ""),
        Err(LayerError::EmptyName)
    ));
    layers.rename(ids[0], " fields ").expect("rename");
    assert_eq!(layers.get(ids[0]).expect("layer").name(), "fields");
}

#[test]
fn redraw_restyles_without_rebuilding() {
    let (mut layers, mut map, service, ids) = populated(1);
    let id = ids[0];
    let handle = layers.get(id).expect("layer").render_handle().expect("handle");

    layers
        .get_mut(id)
        .expect("layer")
        .source_mut()
        .set_band_range("B2", 0.0, 1500.0)
        .expect("range");
    let url = layers.redraw(&mut map, &service, id).expect("redraw");

    assert_eq!(map.tile_layer(handle).map(|(_, current)| current), Some(&url));
    assert_eq!(layers.get(id).expect("layer").source().composite_revision(), 1);
    assert_eq!(service.recipes().len(), 1);
}

#[test]
fn failed_refresh_keeps_last_tiles() {
    let (mut layers, mut map, service, ids) = populated(1);
    let id = ids[0];
    let handle = layers.get(id).expect("layer").render_handle().expect("handle");
    let before = layers.get(id).expect("layer").tile_url().cloned();

    service.set_scene_count(0);
    let error = layers.refresh(&mut map, &service, id).expect_err("no scenes");

    assert!(matches!(error, LayerError::Imagery(ImageryError::NoScenes)));
    assert_eq!(layers.get(id).expect("layer").tile_url().cloned(), before);
    assert_eq!(
        map.tile_layer(handle).map(|(_, current)| current.clone()),
        before
    );

    service.set_scene_count(5);
    layers.refresh(&mut map, &service, id).expect("refresh");
    assert_eq!(layers.get(id).expect("layer").source().composite_revision(), 2);
}

#[test]
fn releasing_a_foreign_handle_surfaces_map_error() {
    let (mut layers, _, _, ids) = populated(1);
    let mut other_map = HeadlessMap::new(Basemap::OsmHot);
    let error = layers
        .set_visible(&mut other_map, ids[0], false)
        .expect_err("handle unknown to this map");
    assert!(matches!(error, LayerError::Map(MapError::UnknownTileLayer(_))));
    assert!(layers.get(ids[0]).expect("layer").is_visible());
}
