use parcel_core::db::open_db_in_memory;
use parcel_core::{
    GuardedAction, ParcelService, ParcelStatus, ParcelStore, RepoError, ServiceError,
    SqliteParcelStore,
};

#[test]
fn register_stores_a_registered_parcel() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    let parcel = service.register(7, "Pushkina st. 10").unwrap();
    assert_ne!(parcel.number, 0);
    assert_eq!(parcel.status, ParcelStatus::REGISTERED);

    let stored = service.get(parcel.number).unwrap();
    assert_eq!(stored, parcel);
}

#[test]
fn next_status_walks_to_delivered_and_stops() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());
    let number = service.register(7, "Pushkina st. 10").unwrap().number;

    assert_eq!(service.next_status(number).unwrap().status, ParcelStatus::SENT);
    assert_eq!(
        service.next_status(number).unwrap().status,
        ParcelStatus::DELIVERED
    );

    let err = service.next_status(number).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NoNextStatus { number: n, ref status } if n == number && status == "delivered"
    ));
    assert_eq!(service.get(number).unwrap().status, ParcelStatus::DELIVERED);
}

#[test]
fn address_can_change_only_while_registered() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());
    let number = service.register(7, "old address").unwrap().number;

    service.change_address(number, "new address").unwrap();
    assert_eq!(service.get(number).unwrap().address, "new address");

    service.next_status(number).unwrap();
    let err = service.change_address(number, "too late").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::StatusForbids {
            action: GuardedAction::ChangeAddress,
            ..
        }
    ));
    assert_eq!(service.get(number).unwrap().address, "new address");
}

#[test]
fn delete_only_while_registered() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteParcelStore::try_new(&conn).unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    let removable = service.register(7, "a").unwrap().number;
    let shipped = service.register(7, "b").unwrap().number;
    service.next_status(shipped).unwrap();

    service.delete(removable).unwrap();
    assert!(matches!(
        store.get(removable).unwrap_err(),
        RepoError::NotFound(_)
    ));

    let err = service.delete(shipped).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::StatusForbids {
            action: GuardedAction::Delete,
            ..
        }
    ));
    assert!(store.get(shipped).is_ok());
}

#[test]
fn operations_on_unknown_parcel_surface_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    assert!(matches!(
        service.delete(404).unwrap_err(),
        ServiceError::Repo(RepoError::NotFound(404))
    ));
    assert!(matches!(
        service.next_status(404).unwrap_err(),
        ServiceError::Repo(RepoError::NotFound(404))
    ));
}

#[test]
fn client_parcels_lists_only_that_client() {
    let conn = open_db_in_memory().unwrap();
    let service = ParcelService::new(SqliteParcelStore::try_new(&conn).unwrap());

    let first = service.register(1, "x").unwrap();
    let second = service.register(1, "y").unwrap();
    service.register(2, "z").unwrap();

    let listed = service.client_parcels(1).unwrap();
    assert_eq!(listed, vec![first, second]);
}
