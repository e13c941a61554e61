use crate::helpers::{MockBookingRepo, MockClassRepo, hour, test_booking, test_class, test_user};

use gymbros_bookings::domain::types::ClassPatch;
use gymbros_bookings::error::BookingsServiceError;
use gymbros_bookings::usecase::class::{
    CreateClassInput, CreateClassUseCase, DeleteClassUseCase, GetOccupancyUseCase,
    ListClassesUseCase, UpdateClassUseCase,
};
use gymbros_domain::booking::BookingStatus;
use gymbros_domain::id::ClassId;
use gymbros_domain::pagination::PageRequest;
use gymbros_domain::role::Role;
use uuid::Uuid;

fn create_input() -> CreateClassInput {
    CreateClassInput {
        name: "Evening Yoga".to_owned(),
        description: None,
        trainer_id: None,
        start_time: hour(18),
        end_time: hour(19),
        capacity: 15,
        image_slug: None,
    }
}

#[tokio::test]
async fn should_create_class_as_staff() {
    let classes = MockClassRepo::empty();
    let handle = classes.handle();
    let usecase = CreateClassUseCase { classes };

    let class = usecase.execute(Role::Staff, create_input()).await.unwrap();

    assert_eq!(class.name, "Evening Yoga");
    assert_eq!(class.capacity, 15);
    assert_eq!(class.image_slug, "default");
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_class_creation_by_member() {
    let usecase = CreateClassUseCase {
        classes: MockClassRepo::empty(),
    };

    let err = usecase
        .execute(Role::Member, create_input())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingsServiceError::Forbidden));
}

#[tokio::test]
async fn should_reject_class_creation_by_trainer() {
    let usecase = CreateClassUseCase {
        classes: MockClassRepo::empty(),
    };

    let err = usecase
        .execute(Role::Trainer, create_input())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingsServiceError::Forbidden));
}

#[tokio::test]
async fn should_reject_inverted_time_window() {
    let usecase = CreateClassUseCase {
        classes: MockClassRepo::empty(),
    };
    let input = CreateClassInput {
        start_time: hour(19),
        end_time: hour(18),
        ..create_input()
    };

    let err = usecase.execute(Role::Staff, input).await.unwrap_err();

    assert!(matches!(err, BookingsServiceError::InvalidTimeWindow));
}

#[tokio::test]
async fn should_reject_zero_capacity() {
    let usecase = CreateClassUseCase {
        classes: MockClassRepo::empty(),
    };
    let input = CreateClassInput {
        capacity: 0,
        ..create_input()
    };

    let err = usecase.execute(Role::Staff, input).await.unwrap_err();

    assert!(matches!(err, BookingsServiceError::MissingData));
}

#[tokio::test]
async fn should_reject_blank_name() {
    let usecase = CreateClassUseCase {
        classes: MockClassRepo::empty(),
    };
    let input = CreateClassInput {
        name: "   ".to_owned(),
        ..create_input()
    };

    let err = usecase.execute(Role::Staff, input).await.unwrap_err();

    assert!(matches!(err, BookingsServiceError::MissingData));
}

#[tokio::test]
async fn should_merge_patch_into_existing_class() {
    let class = test_class(9, 10, 20);
    let usecase = UpdateClassUseCase {
        classes: MockClassRepo::new(vec![class.clone()]),
    };
    let patch = ClassPatch {
        capacity: Some(25),
        ..Default::default()
    };

    let updated = usecase.execute(Role::Staff, class.id, patch).await.unwrap();

    assert_eq!(updated.capacity, 25);
    assert_eq!(updated.name, class.name);
    assert_eq!(updated.slot, class.slot);
}

#[tokio::test]
async fn should_revalidate_window_across_patch() {
    // Patch moves the start past the unpatched end.
    let class = test_class(9, 10, 20);
    let usecase = UpdateClassUseCase {
        classes: MockClassRepo::new(vec![class.clone()]),
    };
    let patch = ClassPatch {
        start_time: Some(hour(11)),
        ..Default::default()
    };

    let err = usecase
        .execute(Role::Staff, class.id, patch)
        .await
        .unwrap_err();

    assert!(matches!(err, BookingsServiceError::InvalidTimeWindow));
}

#[tokio::test]
async fn should_reject_patch_for_unknown_class() {
    let usecase = UpdateClassUseCase {
        classes: MockClassRepo::empty(),
    };

    let err = usecase
        .execute(Role::Staff, ClassId(Uuid::now_v7()), ClassPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, BookingsServiceError::ClassNotFound));
}

#[tokio::test]
async fn should_delete_class_as_staff() {
    let class = test_class(9, 10, 20);
    let classes = MockClassRepo::new(vec![class.clone()]);
    let handle = classes.handle();
    let usecase = DeleteClassUseCase { classes };

    usecase.execute(Role::Staff, class.id).await.unwrap();

    assert!(handle.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_deleting_unknown_class() {
    let usecase = DeleteClassUseCase {
        classes: MockClassRepo::empty(),
    };

    let err = usecase
        .execute(Role::Staff, ClassId(Uuid::now_v7()))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingsServiceError::ClassNotFound));
}

#[tokio::test]
async fn should_list_upcoming_classes_filtered_by_name() {
    let hiit = test_class(9, 10, 20);
    let mut yoga = test_class(11, 12, 20);
    yoga.name = "Evening Yoga".to_owned();
    let usecase = ListClassesUseCase {
        classes: MockClassRepo::new(vec![hiit, yoga.clone()]),
    };

    let found = usecase
        .execute(hour(0), Some("yoga"), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, yoga.id);
}

#[tokio::test]
async fn should_zero_fill_occupancy_for_empty_classes() {
    let busy = test_class(9, 10, 20);
    let empty = test_class(11, 12, 20);
    let bookings = MockBookingRepo::new(vec![
        test_booking(test_user(), busy.id, BookingStatus::Confirmed),
        test_booking(test_user(), busy.id, BookingStatus::Attended),
        test_booking(test_user(), busy.id, BookingStatus::Cancelled),
    ]);
    let usecase = GetOccupancyUseCase { bookings };

    let counts = usecase.execute(&[busy.id, empty.id]).await.unwrap();

    assert_eq!(counts, vec![(busy.id, 2), (empty.id, 0)]);
}
