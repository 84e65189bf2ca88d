use super::*;
use std::str::FromStr;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = AttacheeId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = DepartmentId::from(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = AttacheeId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(DepartmentId::from_str("invalid").is_err());
}

#[test]
fn test_typed_ids_order_by_uuid() {
    let low = DepartmentId::from_uuid(Uuid::from_u128(1));
    let high = DepartmentId::from_uuid(Uuid::from_u128(2));
    assert!(low < high);
}
