mod helpers;

mod gating_test;
mod payment_test;
mod plan_test;
