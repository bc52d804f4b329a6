use parcel_core::{Parcel, ParcelStatus};
use serde_json::json;

#[test]
fn parcel_serializes_with_snake_case_fields() {
    let parcel = Parcel {
        number: 3,
        client: 1000,
        status: ParcelStatus::SENT.to_string(),
        address: "test".to_string(),
        created_at: "2024-03-01T10:15:00Z".to_string(),
    };

    let value = serde_json::to_value(&parcel).unwrap();
    assert_eq!(
        value,
        json!({
            "number": 3,
            "client": 1000,
            "status": "sent",
            "address": "test",
            "created_at": "2024-03-01T10:15:00Z"
        })
    );

    let decoded: Parcel = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, parcel);
}

#[test]
fn new_parcel_timestamp_is_rfc3339() {
    let parcel = Parcel::new(5, "Lenina 1");
    assert!(is_utc_seconds_stamp(&parcel.created_at));
    assert!(parcel.validate().is_ok());
}

fn is_utc_seconds_stamp(value: &str) -> bool {
    // YYYY-MM-DDTHH:MM:SSZ
    value.len() == 20 && value.as_bytes()[10] == b'T' && value.ends_with('Z')
}
