// SPDX-License-Identifier: MPL-2.0
use auction_lots::config::{self, Config};
use auction_lots::i18n::I18n;
use auction_lots::lots::{CounterPolicy, LotModel, LotNumber};
use auction_lots::media::ImageHandle;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut initial = Config::default();
    initial.general.language = Some("en-US".to_string());
    config::save_to_path(&initial, &config_path).expect("Failed to write initial config file");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &config_path).expect("Failed to write french config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("button-generate-document"), "Générer le document");
}

#[test]
fn cli_language_beats_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());

    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn every_english_key_has_a_french_translation() {
    let en = I18n::new(Some("en-US".to_string()), &Config::default());
    let fr = I18n::new(Some("fr".to_string()), &Config::default());

    for key in [
        "window-title",
        "button-select-folder",
        "button-assign-next-lot",
        "button-review-lots",
        "button-export-as",
        "sorting-status-unassigned",
        "lots-status-empty",
        "error-no-previous-lot",
        "error-export-busy",
        "notification-config-load-error",
    ] {
        assert!(!en.tr(key).starts_with("MISSING"), "{key} missing in en-US");
        assert!(!fr.tr(key).starts_with("MISSING"), "{key} missing in fr");
    }
}

#[test]
fn lot_status_is_localized() {
    let en = I18n::new(Some("en-US".to_string()), &Config::default());
    let text = en.tr_with_args("lots-status", &[("lot", "4"), ("count", "5")]);
    assert_eq!(text, "Viewing Lot 4 (5 image(s))");
}

#[test]
fn corrupted_settings_fall_back_with_a_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[lots\nbroken").expect("write");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(loaded, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}

#[test]
fn counter_policy_from_settings_reaches_the_model() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(
        dir.path().join("settings.toml"),
        "[lots]\nadvance_counter_on_manual = true\n",
    )
    .expect("write");

    let (loaded, _) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(loaded.counter_policy(), CounterPolicy::AdvancePastManual);

    let mut model = LotModel::with_policy(loaded.counter_policy());
    let handle = ImageHandle::new("/photos/a.jpg");
    model
        .assign_to_manual_lot(&handle, 7)
        .expect("valid lot number");
    assert_eq!(model.current_lot_counter(), LotNumber::new(8).expect("positive"));
}

#[test]
fn hidden_images_can_be_left_out_of_the_export_projection() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[export]\nskip_hidden = true\n")
        .expect("write");
    let (loaded, _) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert!(loaded.export.skip_hidden);

    let mut model = LotModel::new();
    let kept = ImageHandle::new("/photos/a.jpg");
    let hidden = ImageHandle::new("/photos/b.jpg");
    model.assign_to_next_lot(&kept);
    model.assign_to_next_lot(&hidden);
    model.hide(&hidden);

    assert_eq!(model.snapshot_lots().image_count(), 2);
    assert_eq!(model.snapshot_visible_lots().image_count(), 1);
}
