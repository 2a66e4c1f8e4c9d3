use chrono::NaiveDate;

use super::{
    Basemap, BandRegistry, Bounds, Geometry, ImageParams, ModelError, TemporalOp, VizMode,
    VizParams, zoom_to_scale,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn reflectance_registry() -> BandRegistry {
    let mut registry = BandRegistry::new();
    for name in ["B2", "B3", "B4"] {
        registry.register(name, 0.0, 10000.0).expect("register");
    }
    registry.register("probability", 0.0, 100.0).expect("register");
    registry.alias("red", "B4").expect("alias");
    registry
}

#[test]
fn registered_band_starts_with_full_display_range() {
    let registry = reflectance_registry();
    let band = registry.get("B3").expect("band");
    assert_eq!(band.range(), (0.0, 10000.0));
    assert_eq!(band.min(), 0.0);
    assert_eq!(band.max(), 10000.0);
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = reflectance_registry();
    let error = registry.register("B2", 0.0, 1.0).expect_err("duplicate");
    assert_eq!(error, ModelError::DuplicateBand("B2".to_string()));
    assert_eq!(registry.get("B2").expect("band").max(), 10000.0);
    assert!(registry.register("red", 0.0, 1.0).is_err());
}

#[test]
fn unknown_band_lookup_fails() {
    let registry = reflectance_registry();
    assert!(matches!(
        registry.get("B99"),
        Err(ModelError::UnknownBand(name)) if name == "B99"
    ));
}

#[test]
fn valid_range_round_trips_exactly() {
    let mut registry = reflectance_registry();
    for (lo, hi) in [(0.0, 10000.0), (500.0, 3500.0), (1234.5, 1234.5)] {
        registry.set_range("B2", lo, hi).expect("valid range");
        assert_eq!(registry.get("B2").expect("band").range(), (lo, hi));
    }
}

#[test]
fn invalid_ranges_leave_prior_range_unchanged() {
    let mut registry = reflectance_registry();
    registry.set_range("B2", 500.0, 3500.0).expect("valid range");
    let revision = registry.revision();
    for (lo, hi) in [(4000.0, 3000.0), (-1.0, 100.0), (0.0, 10000.5), (f64::NAN, 1.0)] {
        assert!(registry.set_range("B2", lo, hi).is_err());
        assert_eq!(registry.get("B2").expect("band").range(), (500.0, 3500.0));
    }
    assert_eq!(registry.revision(), revision);
}

#[test]
fn alias_resolves_to_canonical_band() {
    let mut registry = reflectance_registry();
    registry.set_range("red", 1000.0, 4000.0).expect("alias range");
    assert_eq!(registry.get("B4").expect("band").range(), (1000.0, 4000.0));
    assert_eq!(registry.resolve("red").expect("resolve"), "B4");
    assert!(registry.alias("blue", "B42").is_err());
}

#[test]
fn batch_range_update_is_all_or_nothing() {
    let mut registry = reflectance_registry();
    let updates = vec![
        ("B2".to_string(), 100.0, 200.0),
        ("probability".to_string(), 0.0, 500.0),
    ];
    assert!(registry.set_ranges(&updates).is_err());
    assert_eq!(registry.get("B2").expect("band").range(), (0.0, 10000.0));
}

#[test]
fn batch_update_rejects_two_ranges_for_one_band() {
    let mut registry = reflectance_registry();
    let updates = vec![
        ("B4".to_string(), 800.0, 2000.0),
        ("red".to_string(), 500.0, 3500.0),
    ];
    let error = registry.set_ranges(&updates).expect_err("conflict");
    assert_eq!(
        error,
        ModelError::ConflictingRanges {
            band: "B4".to_string()
        }
    );
    assert_eq!(registry.get("B4").expect("band").range(), (0.0, 10000.0));

    let repeated = vec![
        ("B4".to_string(), 800.0, 2000.0),
        ("B4".to_string(), 800.0, 2000.0),
    ];
    registry.set_ranges(&repeated).expect("same range twice");
    assert_eq!(registry.get("B4").expect("band").range(), (800.0, 2000.0));
}

#[test]
fn image_params_round_trip_dates() {
    let start = date(2021, 3, 1);
    let end = date(2021, 3, 1);
    let mut params = ImageParams::new(date(2020, 1, 1), date(2020, 2, 1), 20, false, TemporalOp::Median)
        .expect("params");
    params
        .set(start, end, 35, true, TemporalOp::Mosaic)
        .expect("set");
    assert_eq!(params.start(), start);
    assert_eq!(params.end(), end);
    assert_eq!(params.max_cloudy_pixel_pct(), 35);
    assert!(params.cloud_mask_enabled());
    assert_eq!(params.temporal_op(), TemporalOp::Mosaic);
}

#[test]
fn image_params_reject_inverted_dates_and_keep_state() {
    let mut params = ImageParams::new(date(2020, 1, 1), date(2020, 2, 1), 20, false, TemporalOp::Mean)
        .expect("params");
    let before = params.clone();
    let error = params
        .set(date(2020, 5, 1), date(2020, 4, 1), 20, false, TemporalOp::Mean)
        .expect_err("inverted");
    assert!(matches!(error, ModelError::InvalidDateRange { .. }));
    assert_eq!(params, before);
    assert!(params.set(date(2020, 1, 1), date(2020, 2, 1), 101, false, TemporalOp::Mean).is_err());
}

#[test]
fn temporal_op_parses_known_names_only() {
    for op in TemporalOp::ALL {
        assert_eq!(op.as_str().parse::<TemporalOp>().expect("parse"), op);
    }
    assert_eq!(" Median ".parse::<TemporalOp>().expect("parse"), TemporalOp::Median);
    assert!(matches!(
        "sum".parse::<TemporalOp>(),
        Err(ModelError::InvalidTemporalOp(_))
    ));
    assert!(!TemporalOp::Mosaic.is_statistical());
}

#[test]
fn viz_params_follow_registry_ranges() {
    let mut registry = reflectance_registry();
    registry.set_range("B4", 500.0, 3500.0).expect("range");
    let active = vec!["red".to_string(), "B3".to_string(), "B2".to_string()];
    let viz = VizParams::from_registry(&active, &registry).expect("viz");
    assert_eq!(viz.mode(), VizMode::Rgb);
    assert_eq!(viz.bands(), ["B4", "B3", "B2"]);
    assert_eq!(viz.range(0), Some((500.0, 3500.0)));
    assert_eq!(viz.registry_revision(), registry.revision());
}

#[test]
fn viz_params_reject_two_bands() {
    let registry = reflectance_registry();
    let active = vec!["B4".to_string(), "B3".to_string()];
    assert_eq!(
        VizParams::from_registry(&active, &registry),
        Err(ModelError::InvalidBandCount(2))
    );
}

#[test]
fn zoom_nine_maps_to_305_metres() {
    assert_eq!(zoom_to_scale(9), 305.0);
    assert_eq!(zoom_to_scale(0), 156412.0);
    assert_eq!(zoom_to_scale(20), 0.1);
    assert_eq!(zoom_to_scale(24), 0.1);
}

#[test]
fn bounds_become_closed_polygon() {
    let bounds = Bounds::from_corners((35.0, -106.5), (36.0, -105.5)).expect("bounds");
    let Geometry::Polygon { coordinates } = bounds.to_geometry();
    let ring = &coordinates[0];
    assert_eq!(ring.len(), 5);
    assert_eq!(ring.first(), ring.last());
    assert_eq!(ring[0], [-106.5, 35.0]);
    assert_eq!(ring[2], [-105.5, 36.0]);
}

#[test]
fn bounds_reject_inverted_latitudes() {
    assert!(Bounds::new(40.0, 0.0, 30.0, 1.0).is_err());
    assert!(Bounds::new(0.0, -190.0, 1.0, 1.0).is_err());
}

#[test]
fn basemaps_resolve_by_display_name() {
    for basemap in Basemap::ALL {
        assert_eq!(basemap.display_name().parse::<Basemap>().expect("parse"), basemap);
        assert!(basemap.tile_url().contains("{z}"));
    }
    assert!("Google Satellite".parse::<Basemap>().is_err());
}
