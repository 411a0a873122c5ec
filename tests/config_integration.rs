// SPDX-License-Identifier: MPL-2.0
use iced_reel::app::config::{self, Config, DEFAULT_CARD_WIDTH, MAX_ROOT_MARGIN_PX};
use iced_reel::app::manifest::Manifest;
use iced_reel::thumbnail::{AspectVariant, ViewportPolicy};
use std::fs;
use tempfile::tempdir;

#[test]
fn config_round_trips_through_override_dir() {
    let dir = tempdir().expect("Failed to create temporary directory");

    let mut config = Config::default();
    config.visibility.root_margin_px = 250.0;
    config.layout.viewport_policy = ViewportPolicy::Reactive;
    config.gallery.asset_root = Some(dir.path().join("public"));
    config::save_with_override(&config, Some(dir.path().to_path_buf()))
        .expect("Failed to save config");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, config);
    assert_eq!(loaded.asset_root(), dir.path().join("public"));
}

#[test]
fn hand_edited_values_are_clamped() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    fs::write(
        &path,
        "[visibility]\nroot_margin_px = 99999\nthreshold = 3.0\n\n[gallery]\ncard_width = 1\n",
    )
    .expect("write config");

    let config = config::load_from_path(&path).expect("config should parse");
    let options = config.observer_options();
    assert_eq!(options.root_margin, MAX_ROOT_MARGIN_PX);
    assert_eq!(options.threshold, 1.0);
    assert!(config.card_width() > 1.0);
    assert!(config.card_width() < DEFAULT_CARD_WIDTH);
}

#[test]
fn manifest_and_sources_combine() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("gallery.toml");
    fs::write(
        &path,
        "[[video]]\nsrc = \"intro.mp4\"\ntitle = \"Intro\"\nposter_index = 0\n",
    )
    .expect("write manifest");

    let mut manifest = Manifest::load(&path).expect("manifest should load");
    manifest.extend(Manifest::from_sources(
        &["extra/outro.webm".to_string()],
        AspectVariant::Vertical,
        false,
    ));

    let props = manifest.into_props();
    assert_eq!(props.len(), 2);
    assert_eq!(props[0].title, "Intro");
    assert_eq!(
        props[0].poster_file(dir.path()),
        Some(dir.path().join("thumbnails").join("0.jpg"))
    );
    assert_eq!(props[1].title, "outro.webm");
    assert_eq!(props[1].aspect, AspectVariant::Vertical);
}
