use std::time::Duration;

use assert_matches::assert_matches;
use ride_admission::{ConfigError, Ride, RideConfig};

#[test]
fn rejects_empty_ride() {
    let result = RideConfig::builder()
        .attractions(0)
        .dwell(Duration::from_millis(10))
        .build();
    assert_matches!(result, Err(ConfigError::NoAttractions));

    let result = RideConfig::builder()
        .capacity(0)
        .dwell(Duration::from_millis(10))
        .build();
    assert_matches!(result, Err(ConfigError::ZeroCapacity));

    let result = RideConfig::builder().dwell(Duration::ZERO).build();
    assert_matches!(result, Err(ConfigError::ZeroDwell));
}

#[test]
fn error_messages() {
    assert_eq!(
        ConfigError::ZeroCapacity.to_string(),
        "The ride capacity must be positive"
    );

    let e = ConfigError::InvalidParameter {
        name: "seed",
        reason: "must not be negative".to_string(),
    };
    assert_eq!(e.to_string(), "Invalid parameter 'seed': must not be negative");
}

#[test]
fn ride_keeps_its_name_and_config() {
    let config = RideConfig::builder()
        .attractions(3)
        .capacity(2)
        .dwell(Duration::from_millis(10))
        .build()
        .unwrap();

    let ride = Ride::builder()
        .name("ride_keeps_its_name_and_config")
        .config(config)
        .total_visitors(5)
        .build();

    assert_eq!(ride.name(), "ride_keeps_its_name_and_config");
    assert_eq!(ride.config(), config);
    assert_eq!(ride.clone().config().capacity(), 2);
    assert_eq!(ride.snapshot().total, 5);
}
