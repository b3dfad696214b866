use cucumber::{given, then, when};
use speculoos::prelude::*;
use std::sync::atomic::Ordering;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use newsletter_admin::domain::{Attempt, Format, Refusal, SendStatus};

use crate::state::{TestWorld, SEND_PATH};

#[given(regex = r#"^the backend accepts newsletters with "(.*)"$"#)]
async fn backend_accepts(world: &mut TestWorld, text: String) {
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .and(header("Authorization", "Bearer testing-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(text))
        .named("Accepting backend")
        .mount(&world.backend)
        .await;
}

#[given(regex = r#"^the backend rejects newsletters with status (\d+) and "(.*)"$"#)]
async fn backend_rejects(world: &mut TestWorld, status: u16, text: String) {
    Mock::given(method("POST"))
        .and(path(SEND_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(text))
        .named("Rejecting backend")
        .mount(&world.backend)
        .await;
}

#[when(regex = r#"^the operator writes "(.*)" about "(.*)" as (html|plain)$"#)]
async fn compose(world: &mut TestWorld, subject: String, body: String, format: String) {
    let format: Format = format.parse().expect("format");
    let composer = world.session().composer_mut();
    composer.set_subject(subject);
    composer.set_body(body);
    composer.set_format(format);
}

#[when("the operator sends the newsletter")]
async fn send_confirmed(world: &mut TestWorld) {
    world.confirm.answer.store(true, Ordering::SeqCst);
    let attempt = world.session().send().await;
    world.attempt = Some(attempt);
}

#[when("the operator declines to send the newsletter")]
async fn send_declined(world: &mut TestWorld) {
    world.confirm.answer.store(false, Ordering::SeqCst);
    let attempt = world.session().send().await;
    world.attempt = Some(attempt);
}

#[then(regex = r#"^the backend received a newsletter for "(.*)"$"#)]
async fn backend_received(world: &mut TestWorld, list: String) {
    let expected: Vec<String> = crate::state::addresses(&list)
        .into_iter()
        .map(|subscriber| subscriber.as_ref().to_string())
        .collect();
    assert_that(&world.sent_newsletters().await).is_equal_to(vec![expected]);
}

#[then("the backend received no newsletter")]
async fn backend_received_nothing(world: &mut TestWorld) {
    assert_that(&world.sent_newsletters().await).is_empty();
}

#[then(regex = r#"^the operator was asked "(.*)"$"#)]
async fn asked(world: &mut TestWorld, prompt: String) {
    let last_prompt = world
        .confirm
        .last_prompt
        .lock()
        .expect("prompt lock")
        .clone();
    assert_that(&last_prompt).is_equal_to(Some(prompt));
}

#[then(regex = r#"^the status shows success "(.*)"$"#)]
async fn status_success(world: &mut TestWorld, text: String) {
    assert_that(world.session().status()).is_equal_to(&SendStatus::Success(text));
}

#[then(regex = r#"^the status shows error "(.*)"$"#)]
async fn status_error(world: &mut TestWorld, text: String) {
    assert_that(world.session().status()).is_equal_to(&SendStatus::Error(text));
}

#[then("the status is idle")]
async fn status_idle(world: &mut TestWorld) {
    assert_that(world.session().status()).is_equal_to(&SendStatus::Idle);
}

#[then("the send was declined")]
async fn declined(world: &mut TestWorld) {
    assert_that(&world.attempt).is_equal_to(Some(Attempt::Declined));
}

#[then(regex = r"^the send was refused because (nobody is selected|the message is incomplete)$")]
async fn refused(world: &mut TestWorld, reason: String) {
    let refusal = if reason == "nobody is selected" {
        Refusal::NoRecipients
    } else {
        Refusal::InvalidMessage
    };
    assert_that(&world.attempt).is_equal_to(Some(Attempt::Refused(refusal)));
}

#[then("the composer is empty")]
async fn composer_empty(world: &mut TestWorld) {
    let composer = world.session().composer();
    assert_that(&composer.subject()).is_equal_to("");
    assert_that(&composer.body()).is_equal_to("");
}

#[then(regex = r#"^the composer still holds "(.*)" about "(.*)"$"#)]
async fn composer_holds(world: &mut TestWorld, subject: String, body: String) {
    let composer = world.session().composer();
    assert_that(&composer.subject()).is_equal_to(subject.as_str());
    assert_that(&composer.body()).is_equal_to(body.as_str());
}
