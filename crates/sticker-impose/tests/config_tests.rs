use sticker_impose::store::{ConfigStore, FileStore, LoadError, MemoryStore, StoreToken};
use sticker_impose::*;

fn custom_config() -> DesignConfig {
    DesignConfig {
        quantity: 250,
        input_mode: InputMode::Length,
        run_length_cm: 85.0,
        width_cm: 4.5,
        height_cm: 3.0,
        shape: CutShape::Contour,
        corner_radius_mm: 2.5,
        cut_path: Some("M0,0 L100,0 L50,100 Z".to_string()),
        background_color: Some("#ff00aa".to_string()),
        mode: ProductionMode::DtfUv,
        finish: Finish::Matte,
        spacing_mm: 3.0,
        container: true,
    }
}

#[test]
fn test_json_round_trip() {
    for config in [DesignConfig::default(), custom_config()] {
        let json = config.to_json().unwrap();
        assert_eq!(DesignConfig::from_json(&json).unwrap(), config);
    }
}

#[test]
fn test_record_without_quantity_is_rejected() {
    let result = DesignConfig::from_json(r#"{"width_cm": 5.0, "height_cm": 5.0}"#);
    assert!(matches!(result, Err(ImposeError::Config(_))));
}

#[test]
fn test_non_record_blobs_are_rejected() {
    for blob in ["[1, 2, 3]", "42", "\"quantity\"", "null", "{not json", ""] {
        assert!(DesignConfig::from_json(blob).is_err(), "{blob}");
    }
}

#[test]
fn test_partially_invalid_record_is_rejected_whole() {
    let blob = r#"{"quantity": 50, "width_cm": "wide", "height_cm": 4.0}"#;
    assert!(DesignConfig::from_json(blob).is_err());
}

#[test]
fn test_missing_fields_take_defaults() {
    let config = DesignConfig::from_json(r#"{"quantity": 40, "mode": "Plotter"}"#).unwrap();
    assert_eq!(config.quantity, 40);
    assert_eq!(config.mode, ProductionMode::Plotter);
    assert_eq!(config.width_cm, DesignConfig::default().width_cm);
}

#[test]
fn test_validation() {
    assert!(DesignConfig::default().validate().is_ok());
    assert!(custom_config().validate().is_ok());

    let invalid = [
        DesignConfig {
            width_cm: 0.0,
            ..Default::default()
        },
        DesignConfig {
            height_cm: f64::NAN,
            ..Default::default()
        },
        DesignConfig {
            quantity: 0,
            ..Default::default()
        },
        DesignConfig {
            corner_radius_mm: -1.0,
            ..Default::default()
        },
        DesignConfig {
            spacing_mm: 12.0,
            ..custom_config()
        },
        DesignConfig {
            run_length_cm: 0.0,
            ..custom_config()
        },
    ];
    for config in invalid {
        assert!(matches!(config.validate(), Err(ImposeError::Config(_))), "{config:?}");
    }

    // Order size is bounded so a single job stays producible
    let oversized = [
        DesignConfig {
            quantity: constants::MAX_QUANTITY + 1,
            ..Default::default()
        },
        DesignConfig {
            run_length_cm: 1e11,
            ..custom_config()
        },
        DesignConfig {
            width_cm: 1e-8,
            height_cm: 1e-8,
            ..Default::default()
        },
    ];
    for config in oversized {
        assert!(matches!(config.validate(), Err(ImposeError::Config(_))), "{config:?}");
    }
    let largest = DesignConfig {
        quantity: constants::MAX_QUANTITY,
        width_cm: constants::MIN_ITEM_CM,
        height_cm: constants::MIN_ITEM_CM,
        ..Default::default()
    };
    assert!(largest.validate().is_ok());

    // Spacing is fixed on sheets, so an out-of-range roll value is ignored there
    let sheet = DesignConfig {
        spacing_mm: 12.0,
        ..Default::default()
    };
    assert!(sheet.validate().is_ok());
}

#[tokio::test]
async fn test_memory_store() {
    let mut store = MemoryStore::new();
    let token = store.save(&custom_config()).await.unwrap();
    assert_eq!(store.load(&token).await.unwrap(), custom_config());

    // Equal designs share a token
    assert_eq!(store.save(&custom_config()).await.unwrap(), token);
    assert_eq!(store.len(), 1);

    assert!(matches!(
        store.load(&StoreToken::new("missing")).await,
        Err(LoadError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_memory_store_discards_corrupt_blob() {
    let mut store = MemoryStore::new();
    let token = StoreToken::new("broken");
    store.insert_raw(token.clone(), r#"{"width_cm": 5.0}"#);
    assert!(matches!(store.load(&token).await, Err(LoadError::Corrupt(_))));
}

#[test]
fn test_token_depends_only_on_the_record() {
    let json = custom_config().to_json().unwrap();
    assert_eq!(StoreToken::for_record(&json), StoreToken::for_record(&json));
    assert_ne!(
        StoreToken::for_record(&json),
        StoreToken::for_record(&DesignConfig::default().to_json().unwrap())
    );
}

#[tokio::test]
async fn test_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let token = {
        let mut store = FileStore::open(dir.path()).await.unwrap();
        store.save(&custom_config()).await.unwrap()
    };
    assert!(dir.path().join(format!("{}.json", token)).exists());

    // Saving the same design again reuses its file
    let mut store = FileStore::open(dir.path()).await.unwrap();
    assert_eq!(store.save(&custom_config()).await.unwrap(), token);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);

    assert_eq!(store.load(&token).await.unwrap(), custom_config());
    assert!(matches!(
        store.load(&StoreToken::new("0000")).await,
        Err(LoadError::NotFound(_))
    ));
    assert!(matches!(
        store.load(&StoreToken::new("../escape")).await,
        Err(LoadError::NotFound(_))
    ));

    std::fs::write(dir.path().join("deadbeef.json"), "{\"quantity\": ").unwrap();
    assert!(matches!(
        store.load(&StoreToken::new("deadbeef")).await,
        Err(LoadError::Corrupt(_))
    ));
}

#[tokio::test]
async fn test_file_store_creates_nested_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("designs").join("saved");
    let mut store = FileStore::open(&nested).await.unwrap();
    let token = store.save(&DesignConfig::default()).await.unwrap();
    assert!(nested.join(format!("{}.json", token)).exists());
}

#[tokio::test]
async fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.json");

    custom_config().save(&path).await.unwrap();
    let loaded = DesignConfig::load(&path).await.unwrap();
    assert_eq!(loaded, custom_config());
}

#[test]
fn test_estimate_summary() {
    use chrono::NaiveDate;

    let now = NaiveDate::from_ymd_opt(2025, 3, 3)
        .unwrap()
        .and_hms_opt(17, 30, 0)
        .unwrap();
    let estimate = estimate(
        &DesignConfig::default(),
        &WorkCalendar::default(),
        &FixedClock(now),
    )
    .unwrap();

    assert!(estimate.is_feasible());
    assert_eq!(estimate.cost.total, 245.0);
    assert_eq!(estimate.production_minutes, Some(120));
    assert_eq!(
        estimate.delivery,
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap().and_hms_opt(10, 30, 0)
    );

    let message = estimate.quote_message();
    assert!(message.contains("Quantity: 100"));
    assert!(message.contains("15 per sheet, 7 sheets"));
    assert!(message.contains("Total: 245.00"));
    assert!(message.contains("Tuesday 2025-03-04 10:30"));
}

#[test]
fn test_roll_estimate_message() {
    use chrono::NaiveDate;

    let now = NaiveDate::from_ymd_opt(2025, 3, 3)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let config = DesignConfig {
        quantity: 195,
        width_cm: 4.0,
        height_cm: 4.0,
        mode: ProductionMode::DtfUv,
        ..Default::default()
    };
    let estimate = estimate(&config, &WorkCalendar::default(), &FixedClock(now)).unwrap();

    let message = estimate.quote_message();
    assert_eq!(message, estimate.to_string());
    assert!(message.contains("Quantity: 195"));
    assert!(message.contains("Produced: 195 stickers over 0.670 m"));
    assert!(message.contains("Total: 420.00"));
    assert!(message.contains("Complete the meter for 500.00"));
    assert!(message.contains("Ready: Monday 2025-03-03 12:00"));
    assert!(message.ends_with('\n'));
}

#[test]
fn test_estimate_of_oversized_sticker() {
    let config = DesignConfig {
        width_cm: 60.0,
        height_cm: 60.0,
        ..Default::default()
    };
    let estimate = estimate(&config, &WorkCalendar::default(), &SystemClock).unwrap();
    assert!(!estimate.is_feasible());
    assert!(estimate.cost.is_zero());
    assert!(estimate.delivery.is_none());
    assert!(estimate.quote_message().contains("cannot be produced"));
}
