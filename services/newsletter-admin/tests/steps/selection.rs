use cucumber::{then, when};
use speculoos::prelude::*;

use newsletter_admin::domain::Subscriber;

use crate::state::{addresses, TestWorld};

#[when(regex = r#"^the operator toggles "(.*)"$"#)]
async fn toggle_one(world: &mut TestWorld, address: String) {
    world
        .session()
        .selection_mut()
        .toggle_one(&Subscriber::from(address));
}

#[when("the operator toggles all")]
async fn toggle_all(world: &mut TestWorld) {
    world.session().selection_mut().toggle_all();
}

#[when("the operator selects nobody")]
async fn deselect_all(world: &mut TestWorld) {
    world.session().selection_mut().deselect_all();
}

#[then(regex = r#"^the selection is "(.*)"$"#)]
async fn selection_is(world: &mut TestWorld, list: String) {
    assert_that(&world.session().selection().recipients()).is_equal_to(addresses(&list));
}

#[then("every subscriber is selected")]
async fn all_selected(world: &mut TestWorld) {
    assert_that(&world.session().selection().is_all_selected()).is_true();
}
