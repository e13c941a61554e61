use crate::helpers::{MockPlanRepo, MockProvider, test_plan, test_tier, test_user};

use gymbros_domain::id::PlanId;
use gymbros_memberships::error::MembershipsServiceError;
use gymbros_memberships::usecase::payment::CreatePaymentSheetUseCase;
use uuid::Uuid;

fn sheet_usecase(
    plans: MockPlanRepo,
    provider: MockProvider,
) -> CreatePaymentSheetUseCase<MockPlanRepo, MockProvider> {
    CreatePaymentSheetUseCase {
        plans,
        provider,
        currency: "vnd".to_owned(),
        publishable_key: "pk_test_123".to_owned(),
    }
}

#[tokio::test]
async fn should_assemble_payment_sheet_from_plan() {
    let tier = test_tier("Gold", 2);
    let plan = test_plan(&tier, 3, 1_500_000);
    let provider = MockProvider::new();
    let intents = provider.handle();
    let uc = sheet_usecase(MockPlanRepo::new(vec![plan.clone()]), provider);

    let sheet = uc.execute(test_user(), plan.plan.id).await.unwrap();

    assert_eq!(sheet.payment_intent, "pi_test_secret");
    assert_eq!(sheet.ephemeral_key, "ek_test_secret");
    assert_eq!(sheet.customer, "cus_test");
    assert_eq!(sheet.publishable_key, "pk_test_123");

    let recorded = intents.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].amount, 1_500_000);
    assert_eq!(recorded[0].currency, "vnd");
    assert_eq!(recorded[0].customer, "cus_test");
    assert_eq!(recorded[0].description, "Gymbros Membership: Gold");
}

#[tokio::test]
async fn should_reject_sheet_for_unknown_plan() {
    let uc = sheet_usecase(MockPlanRepo::empty(), MockProvider::new());

    let err = uc
        .execute(test_user(), PlanId(Uuid::now_v7()))
        .await
        .unwrap_err();

    assert!(matches!(err, MembershipsServiceError::PlanNotFound));
}

#[tokio::test]
async fn should_reject_sheet_for_retired_plan() {
    let tier = test_tier("Gold", 2);
    let mut plan = test_plan(&tier, 3, 1_500_000);
    plan.plan.is_active = false;
    let uc = sheet_usecase(MockPlanRepo::new(vec![plan.clone()]), MockProvider::new());

    let err = uc.execute(test_user(), plan.plan.id).await.unwrap_err();

    assert!(matches!(err, MembershipsServiceError::PlanNotFound));
}

#[tokio::test]
async fn should_surface_provider_failure_as_payment_provider_error() {
    let tier = test_tier("Gold", 2);
    let plan = test_plan(&tier, 3, 1_500_000);
    let mut provider = MockProvider::new();
    provider.fail = true;
    let uc = sheet_usecase(MockPlanRepo::new(vec![plan.clone()]), provider);

    let err = uc.execute(test_user(), plan.plan.id).await.unwrap_err();

    assert!(matches!(err, MembershipsServiceError::PaymentProvider(_)));
}
