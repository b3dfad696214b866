use cucumber::{given, then, when};
use speculoos::prelude::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::state::{addresses, TestWorld, SUBSCRIBERS_PATH};

#[given(regex = r#"^the directory contains "(.*)"$"#)]
async fn directory_contains(world: &mut TestWorld, list: String) {
    world.serve_directory(&addresses(&list)).await;
}

#[when(regex = r#"^the directory now contains "(.*)"$"#)]
async fn directory_now_contains(world: &mut TestWorld, list: String) {
    world.backend.reset().await;
    world.serve_directory(&addresses(&list)).await;
}

#[when("the directory becomes unavailable")]
async fn directory_unavailable(world: &mut TestWorld) {
    world.backend.reset().await;
    Mock::given(method("GET"))
        .and(path(SUBSCRIBERS_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .named("Unavailable directory")
        .mount(&world.backend)
        .await;
}

#[when("the operator opens the session")]
async fn open_session(world: &mut TestWorld) {
    let mut session = world.open_session();
    // A failed first load is a legitimate scenario, it leaves the session empty.
    let _ = session.refresh().await;
    world.session = Some(session);
}

#[when("the operator refreshes the directory")]
async fn refresh(world: &mut TestWorld) {
    let _ = world.session().refresh().await;
}

#[then(regex = r"^the directory lists (\d+) subscribers?$")]
async fn directory_lists(world: &mut TestWorld, count: usize) {
    assert_that(&world.session().directory().len()).is_equal_to(count);
}
