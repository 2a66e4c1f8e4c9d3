use crate::controls::{ControlError, ImageryForm, LayerInput, VizInput};
use crate::imagery::ImageryError;
use crate::layers::{LayerError, LayerId};
use crate::map::{HeadlessMap, Panel};
use crate::model::{Basemap, ModelError, TemporalOp};
use crate::service::ServiceError;
use crate::testing::FakeImageryService;

use super::{
    AppContext, AppError, ConfigError, ErrorKind, Pane, Session, SessionConfig, SessionInput,
    load_config, save_config,
};

type TestSession = Session<HeadlessMap, FakeImageryService>;

fn start() -> TestSession {
    Session::start(
        HeadlessMap::new(Basemap::OsmMapnik),
        FakeImageryService::new(),
        &SessionConfig::default(),
    )
    .expect("session should start")
}

fn add_layer(session: &mut TestSession) -> LayerId {
    session
        .handle(SessionInput::Layers {
            change: LayerInput::Add { name: None },
        })
        .expect("add layer");
    session.layers().selected_id().expect("new layer selected")
}

#[test]
fn default_config_is_valid() {
    let config = SessionConfig::default();
    config.validate().expect("defaults should validate");
    assert_eq!(config.imagery.preset, "true color");
    assert_eq!(config.map.basemap, Basemap::OsmHot);
    assert_eq!(config.imagery.temporal_op, TemporalOp::Median);
}

#[test]
fn config_round_trips_through_yaml_and_json() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = SessionConfig::default();
    config.map.zoom = 11;
    config.imagery.preset = "geology".to_string();
    config.imagery.max_cloudy_pixel_pct = 35;

    for name in ["session.yaml", "session.json"] {
        let path = dir.path().join(name);
        save_config(&path, &config).expect("save config");
        let loaded = load_config(&path).expect("load config");
        assert_eq!(loaded, config, "{name}");
    }

    let raw = std::fs::read_to_string(dir.path().join("session.json")).expect("read json");
    assert!(raw.contains("\"preset\": \"geology\""));
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("partial.yml");
    std::fs::write(&path, "map:\n  zoom: 5\nlog_level: debug\n").expect("write");

    let config = load_config(&path).expect("load");
    assert_eq!(config.map.zoom, 5);
    assert_eq!(config.map.basemap, Basemap::OsmHot);
    assert_eq!(config.log_level, "debug");
    assert_eq!(config.imagery.layer_name, "Sentinel-2");
}

#[test]
fn invalid_configs_are_rejected() {
    let mut config = SessionConfig::default();
    config.service.endpoint = "ftp://imagery".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = SessionConfig::default();
    config.imagery.preset = "false color".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = SessionConfig::default();
    config.map.zoom = 25;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = SessionConfig::default();
    config.imagery.max_cloudy_pixel_pct = 101;
    assert!(matches!(config.validate(), Err(ConfigError::Model(_))));

    let mut config = SessionConfig::default();
    config.log_level = "loud".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.json");
    assert!(save_config(&path, &config).is_err());
    assert!(!path.exists());
}

#[test]
fn context_builds_sources_from_config() {
    let mut config = SessionConfig::default();
    config.imagery.preset = "clouds".to_string();
    let context = AppContext::new(config).expect("context");

    let source = context.new_source().expect("source");
    assert_eq!(source.active_bands(), ["probability".to_string()]);
    assert_eq!(context.service().endpoint(), "http://localhost:8080");

    let mut config = SessionConfig::default();
    config.service.timeout_secs = 0;
    let error = AppContext::new(config).expect_err("zero timeout");
    assert_eq!(error.kind(), ErrorKind::Configuration);
}

#[test]
fn errors_are_classified() {
    let cases: Vec<(AppError, ErrorKind)> = vec![
        (ImageryError::NoScenes.into(), ErrorKind::NoScenes),
        (
            ServiceError::Unreachable("connection refused".to_string()).into(),
            ErrorKind::RemoteService,
        ),
        (
            LayerError::Imagery(ImageryError::Service(ServiceError::Unreachable(
                "timeout".to_string(),
            )))
            .into(),
            ErrorKind::RemoteService,
        ),
        (
            LayerError::UnknownLayer(LayerId::new(9)).into(),
            ErrorKind::Contract,
        ),
        (
            ModelError::UnknownBand("B99".to_string()).into(),
            ErrorKind::Contract,
        ),
        (
            ControlError::InvalidSlot { slot: 3, count: 1 }.into(),
            ErrorKind::Configuration,
        ),
        (ControlError::HistogramClosed.into(), ErrorKind::Contract),
        (
            ConfigError::Invalid("bad".to_string()).into(),
            ErrorKind::Configuration,
        ),
    ];
    for (error, kind) in cases {
        assert_eq!(error.kind(), kind, "{error}");
    }
    assert_eq!(ErrorKind::NoScenes.to_string(), "no scenes");
}

#[test]
fn session_starts_with_one_bound_layer() {
    let session = start();

    assert_eq!(session.map().basemap(), Basemap::OsmHot);
    assert_eq!(session.layers().len(), 1);
    assert_eq!(session.layers().names(), ["Sentinel-2".to_string()]);
    let id = session.layers().selected_id().expect("selected");
    assert_eq!(session.visualization().target(), Some(id));
    assert_eq!(session.imagery_pane().target(), Some(id));
    assert_eq!(session.histogram().target(), Some(id));
    assert_eq!(session.map().tile_layer_count(), 1);
    assert_eq!(session.service().recipes().len(), 1);
    assert_eq!(session.viewport().zoom(), 9);
}

#[test]
fn adding_and_removing_layers_rebinds_controllers() {
    let mut session = start();
    let first = session.layers().selected_id().expect("first");

    let second = add_layer(&mut session);
    assert_ne!(first, second);
    assert_eq!(session.visualization().target(), Some(second));
    assert_eq!(
        session.layers().names(),
        ["Sentinel-2".to_string(), "Sentinel-2 (2)".to_string()]
    );

    session
        .handle(SessionInput::Layers {
            change: LayerInput::Remove { layer: second },
        })
        .expect("remove");
    assert_eq!(session.visualization().target(), Some(first));
    assert_eq!(session.imagery_pane().target(), Some(first));

    session
        .handle(SessionInput::Layers {
            change: LayerInput::Remove { layer: first },
        })
        .expect("remove last");
    assert!(session.layers().is_empty());
    assert_eq!(session.visualization().target(), None);
    assert!(session.imagery_pane().form().is_none());
    assert_eq!(session.map().tile_layer_count(), 0);
}

#[test]
fn open_panes_follow_changes() {
    let mut session = start();
    assert!(session.toggle_pane(Pane::Visualization).expect("open"));
    assert!(session.is_pane_open(Pane::Visualization));

    session
        .handle(SessionInput::Visualize {
            change: VizInput::Preset {
                name: "clouds".to_string(),
            },
        })
        .expect("clouds preset");

    let shown: Vec<(Vec<String>, Vec<(f64, f64)>)> = session
        .map()
        .panels()
        .filter_map(|panel| match panel {
            Panel::Visualization { bands, limits, .. } => Some((bands.clone(), limits.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        shown,
        vec![(vec!["probability".to_string()], vec![(0.0, 100.0)])]
    );

    session
        .handle(SessionInput::TogglePane {
            pane: Pane::Visualization,
        })
        .expect("close");
    assert!(!session.is_pane_open(Pane::Visualization));
    assert_eq!(session.map().panels().count(), 0);
}

#[test]
fn histogram_closes_when_selection_moves() {
    let mut session = start();
    session
        .handle(SessionInput::ToggleHistogram)
        .expect("open histogram");
    assert!(session.histogram().is_open());
    assert_eq!(session.histogram().links().len(), 3);

    session
        .handle(SessionInput::HistogramInterval {
            slot: 0,
            lo: 800.0,
            hi: 2400.0,
        })
        .expect("interval");
    assert_eq!(session.visualization().slots()[0].lo, 800.0);
    assert_eq!(session.histogram().links()[0].interval, (800.0, 2400.0));

    add_layer(&mut session);
    assert!(!session.histogram().is_open());

    let error = session
        .handle(SessionInput::HistogramInterval {
            slot: 0,
            lo: 100.0,
            hi: 200.0,
        })
        .expect_err("histogram is closed");
    assert_eq!(error.kind(), ErrorKind::Contract);
}

#[test]
fn failed_inputs_keep_state() {
    let mut session = start();
    let before = session.snapshot();

    let mut form = ImageryForm::from_params(session.layer_pane().defaults());
    form.temporal_op = "sum".to_string();
    let error = session
        .handle(SessionInput::Imagery { form })
        .expect_err("unknown operator");
    assert_eq!(error.kind(), ErrorKind::Configuration);

    session.service().set_offline(true);
    let error = session
        .handle(SessionInput::Visualize {
            change: VizInput::Range {
                slot: 0,
                lo: 0.0,
                hi: 9000.0,
            },
        })
        .expect_err("offline");
    assert_eq!(error.kind(), ErrorKind::RemoteService);

    let after = session.snapshot();
    assert_eq!(after.layers[0].tile_url, before.layers[0].tile_url);
    assert_eq!(
        after.layers[0].composite_revision,
        before.layers[0].composite_revision
    );
}

#[test]
fn map_inputs_move_the_viewport() {
    let mut session = start();
    session
        .handle(SessionInput::Zoom { zoom: 12 })
        .expect("zoom");
    assert_eq!(session.viewport().zoom(), 12);

    let bounds = *session.viewport().bounds();
    session.handle(SessionInput::Pan { bounds }).expect("pan");

    let snapshot = session.snapshot();
    let json = serde_json::to_value(&snapshot).expect("serialize");
    assert_eq!(json["viewport"]["zoom"], 12);
    assert_eq!(json["layers"][0]["name"], "Sentinel-2");
}

#[test]
fn inputs_deserialize_from_json() {
    let input: SessionInput = serde_json::from_str(
        r#"{"action":"visualize","change":{"kind":"preset","name":"geology"}}"#,
    )
    .expect("visualize");
    assert_eq!(input.action(), "visualize");

    let input: SessionInput =
        serde_json::from_str(r#"{"action":"toggle_pane","pane":"layers"}"#).expect("pane");
    assert_eq!(
        input,
        SessionInput::TogglePane {
            pane: Pane::Layers
        }
    );
}

#[test]
fn unreachable_service_keeps_imagery_parameters() {
    let mut session = start();
    let defaults = session.layer_pane().defaults().clone();
    let mut form = ImageryForm::from_params(&defaults);
    form.max_cloudy_pixel_pct = 5;

    session.service().set_offline(true);
    let error = session
        .handle(SessionInput::Imagery { form: form.clone() })
        .expect_err("offline");
    assert_eq!(error.kind(), ErrorKind::RemoteService);
    let layer = session.layers().get_selected().expect("layer");
    assert_eq!(layer.source().params(), &defaults);
    assert_eq!(
        session.imagery_pane().form(),
        Some(&ImageryForm::from_params(&defaults))
    );

    session.service().set_offline(false);
    session
        .handle(SessionInput::Imagery { form: form.clone() })
        .expect("retry");
    let layer = session.layers().get_selected().expect("layer");
    assert_eq!(layer.source().params().max_cloudy_pixel_pct(), 5);
    assert_eq!(session.imagery_pane().form(), Some(&form));
}
