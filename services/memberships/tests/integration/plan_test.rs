use crate::helpers::{
    MockMembershipRepo, MockPlanRepo, MockTierRepo, jan, test_membership, test_plan, test_tier,
    test_user,
};

use gymbros_domain::id::{PlanId, TierId};
use gymbros_domain::membership::{MembershipStatus, PlanChange};
use gymbros_domain::role::Role;
use gymbros_memberships::domain::types::PlanPatch;
use gymbros_memberships::error::MembershipsServiceError;
use gymbros_memberships::usecase::plan::{
    ClassifyPlanChangeUseCase, ListPlansUseCase, ListTiersUseCase, UpdatePlanUseCase,
};
use uuid::Uuid;

#[tokio::test]
async fn should_list_tiers_by_level() {
    let gold = test_tier("Gold", 2);
    let silver = test_tier("Silver", 1);
    let uc = ListTiersUseCase {
        tiers: MockTierRepo {
            tiers: vec![gold.clone(), silver.clone()],
        },
    };

    let tiers = uc.execute().await.unwrap();

    assert_eq!(tiers[0].id, silver.id);
    assert_eq!(tiers[1].id, gold.id);
}

#[tokio::test]
async fn should_list_only_active_plans() {
    let tier = test_tier("Gold", 2);
    let active = test_plan(&tier, 1, 500_000);
    let mut retired = test_plan(&tier, 12, 4_000_000);
    retired.plan.is_active = false;
    let uc = ListPlansUseCase {
        plans: MockPlanRepo::new(vec![active.clone(), retired]),
    };

    let plans = uc.execute().await.unwrap();

    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].plan.id, active.plan.id);
}

#[tokio::test]
async fn should_update_plan_as_admin() {
    let tier = test_tier("Gold", 2);
    let plan = test_plan(&tier, 3, 1_500_000);
    let plans = MockPlanRepo::new(vec![plan.clone()]);
    let handle = plans.handle();
    let uc = UpdatePlanUseCase { plans };
    let patch = PlanPatch {
        price: Some(1_200_000),
        discount_label: Some(Some("20% off".to_owned())),
        ..Default::default()
    };

    let updated = uc.execute(Role::Admin, plan.plan.id, patch).await.unwrap();

    assert_eq!(updated.price, 1_200_000);
    assert_eq!(updated.discount_label.as_deref(), Some("20% off"));
    assert_eq!(updated.duration_months, 3);
    assert_eq!(handle.lock().unwrap()[0].plan.price, 1_200_000);
}

#[tokio::test]
async fn should_clear_discount_label_with_explicit_null() {
    let tier = test_tier("Gold", 2);
    let mut plan = test_plan(&tier, 3, 1_500_000);
    plan.plan.discount_label = Some("launch deal".to_owned());
    let uc = UpdatePlanUseCase {
        plans: MockPlanRepo::new(vec![plan.clone()]),
    };
    let patch = PlanPatch {
        discount_label: Some(None),
        ..Default::default()
    };

    let updated = uc.execute(Role::Admin, plan.plan.id, patch).await.unwrap();

    assert_eq!(updated.discount_label, None);
}

#[tokio::test]
async fn should_forbid_plan_update_by_staff() {
    let uc = UpdatePlanUseCase {
        plans: MockPlanRepo::empty(),
    };

    let err = uc
        .execute(Role::Staff, PlanId(Uuid::now_v7()), PlanPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::Forbidden));
}

#[tokio::test]
async fn should_reject_nonpositive_price() {
    let tier = test_tier("Gold", 2);
    let plan = test_plan(&tier, 3, 1_500_000);
    let uc = UpdatePlanUseCase {
        plans: MockPlanRepo::new(vec![plan.clone()]),
    };
    let patch = PlanPatch {
        price: Some(0),
        ..Default::default()
    };

    let err = uc
        .execute(Role::Admin, plan.plan.id, patch)
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::MissingData));
}

#[tokio::test]
async fn should_reject_update_for_unknown_plan() {
    let uc = UpdatePlanUseCase {
        plans: MockPlanRepo::empty(),
    };

    let err = uc
        .execute(Role::Admin, PlanId(Uuid::now_v7()), PlanPatch::default())
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::PlanNotFound));
}

#[tokio::test]
async fn should_classify_target_as_upgrade_for_user_without_membership() {
    let gold = test_tier("Gold", 2);
    let uc = ClassifyPlanChangeUseCase {
        tiers: MockTierRepo {
            tiers: vec![gold.clone()],
        },
        plans: MockPlanRepo::empty(),
        memberships: MockMembershipRepo::empty(),
    };

    let change = uc.execute(test_user(), gold.id).await.unwrap();

    assert_eq!(change, PlanChange::Upgrade);
}

#[tokio::test]
async fn should_classify_against_the_held_tier() {
    let silver = test_tier("Silver", 1);
    let gold = test_tier("Gold", 2);
    let gold_plan = test_plan(&gold, 3, 1_500_000);
    let user = test_user();
    // Classification evaluates at the wall clock, so the held membership
    // must outlive the test run.
    let far_future = chrono::Utc::now() + chrono::Duration::days(365);
    let held = test_membership(
        user,
        gold_plan.plan.id,
        jan(1),
        far_future,
        MembershipStatus::Active,
    );
    let uc = ClassifyPlanChangeUseCase {
        tiers: MockTierRepo {
            tiers: vec![silver.clone(), gold.clone()],
        },
        plans: MockPlanRepo::new(vec![gold_plan]),
        memberships: MockMembershipRepo::new(vec![held]),
    };

    assert_eq!(uc.execute(user, gold.id).await.unwrap(), PlanChange::Current);
    assert_eq!(
        uc.execute(user, silver.id).await.unwrap(),
        PlanChange::Downgrade
    );
}

#[tokio::test]
async fn should_reject_classification_for_unknown_tier() {
    let uc = ClassifyPlanChangeUseCase {
        tiers: MockTierRepo { tiers: vec![] },
        plans: MockPlanRepo::empty(),
        memberships: MockMembershipRepo::empty(),
    };

    let err = uc
        .execute(test_user(), TierId(Uuid::now_v7()))
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::TierNotFound));
}
