use crate::helpers::{MockMembershipRepo, jan, test_membership, test_user};

use gymbros_domain::id::{MembershipId, PlanId};
use gymbros_domain::membership::MembershipStatus;
use gymbros_memberships::error::MembershipsServiceError;
use gymbros_memberships::usecase::membership::{
    CancelMembershipUseCase, CheckMembershipUseCase, GetEffectiveMembershipUseCase,
    GetMembershipHistoryUseCase,
};
use uuid::Uuid;

fn plan_id() -> PlanId {
    PlanId(Uuid::now_v7())
}

#[tokio::test]
async fn should_pick_row_with_latest_end_date_as_effective() {
    let user = test_user();
    let short = test_membership(user, plan_id(), jan(1), jan(10), MembershipStatus::Active);
    let long = test_membership(user, plan_id(), jan(1), jan(20), MembershipStatus::Active);
    let uc = GetEffectiveMembershipUseCase {
        memberships: MockMembershipRepo::new(vec![short, long.clone()]),
    };

    let effective = uc.execute(user, jan(5)).await.unwrap();

    assert_eq!(effective.id, long.id);
}

#[tokio::test]
async fn should_ignore_cancelled_rows_even_with_later_end_date() {
    let user = test_user();
    let active = test_membership(user, plan_id(), jan(1), jan(10), MembershipStatus::Active);
    let cancelled =
        test_membership(user, plan_id(), jan(1), jan(25), MembershipStatus::Cancelled);
    let uc = GetEffectiveMembershipUseCase {
        memberships: MockMembershipRepo::new(vec![active.clone(), cancelled]),
    };

    let effective = uc.execute(user, jan(5)).await.unwrap();

    assert_eq!(effective.id, active.id);
}

#[tokio::test]
async fn should_return_not_found_when_nothing_qualifies() {
    let user = test_user();
    let lapsed = test_membership(user, plan_id(), jan(1), jan(10), MembershipStatus::Active);
    let uc = GetEffectiveMembershipUseCase {
        memberships: MockMembershipRepo::new(vec![lapsed]),
    };

    let err = uc.execute(user, jan(15)).await.unwrap_err();

    assert!(matches!(err, MembershipsServiceError::MembershipNotFound));
}

#[tokio::test]
async fn should_gate_on_the_queried_instant_not_now() {
    // Usable at a class starting on the 10th, not at one starting on the
    // 11th, regardless of when the question is asked.
    let user = test_user();
    let row = test_membership(user, plan_id(), jan(1), jan(10), MembershipStatus::Active);
    let uc = CheckMembershipUseCase {
        memberships: MockMembershipRepo::new(vec![row]),
    };

    assert_eq!(uc.execute(user, jan(10)).await.unwrap(), Some(jan(10)));
    assert_eq!(uc.execute(user, jan(11)).await.unwrap(), None);
}

#[tokio::test]
async fn should_not_gate_in_a_user_with_no_rows() {
    let uc = CheckMembershipUseCase {
        memberships: MockMembershipRepo::empty(),
    };

    assert_eq!(uc.execute(test_user(), jan(5)).await.unwrap(), None);
}

#[tokio::test]
async fn should_list_history_latest_first() {
    let user = test_user();
    let old = test_membership(user, plan_id(), jan(1), jan(10), MembershipStatus::Expired);
    let new = test_membership(user, plan_id(), jan(10), jan(20), MembershipStatus::Active);
    let uc = GetMembershipHistoryUseCase {
        memberships: MockMembershipRepo::new(vec![old.clone(), new.clone()]),
    };

    let history = uc.execute(user).await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, new.id);
    assert_eq!(history[1].id, old.id);
}

#[tokio::test]
async fn should_cancel_owned_membership() {
    let user = test_user();
    let row = test_membership(user, plan_id(), jan(1), jan(31), MembershipStatus::Active);
    let memberships = MockMembershipRepo::new(vec![row.clone()]);
    let handle = memberships.handle();
    let uc = CancelMembershipUseCase { memberships };

    uc.execute(user, row.id).await.unwrap();

    assert_eq!(
        handle.lock().unwrap()[0].status,
        MembershipStatus::Cancelled
    );
}

#[tokio::test]
async fn should_answer_not_found_when_cancelling_someone_elses_membership() {
    let owner = test_user();
    let row = test_membership(owner, plan_id(), jan(1), jan(31), MembershipStatus::Active);
    let uc = CancelMembershipUseCase {
        memberships: MockMembershipRepo::new(vec![row.clone()]),
    };

    let err = uc.execute(test_user(), row.id).await.unwrap_err();

    assert!(matches!(err, MembershipsServiceError::MembershipNotFound));
}

#[tokio::test]
async fn should_answer_not_found_for_unknown_membership() {
    let uc = CancelMembershipUseCase {
        memberships: MockMembershipRepo::empty(),
    };

    let err = uc
        .execute(test_user(), MembershipId(Uuid::now_v7()))
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::MembershipNotFound));
}
