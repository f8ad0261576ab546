use std::net::TcpListener;

use booking_intake::{
    config::RelayConfig,
    domain::{Field, InquiryPayload},
    form::{
        Banner, FormState, HttpTransport, InquiryForm, MemoryStorage, SubmitOutcome,
        SubscribeForm, SubscribePrompt, PROMPT_DELAY,
    },
};
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{spawn_app, spawn_app_with, ManualClock, RelayBehaviour, LIST_PATH};

fn jordan() -> InquiryPayload {
    InquiryPayload {
        contact_name: "Jordan".into(),
        contact_email: "jordan@example.com".into(),
        category: "Photo session".into(),
        message: "moody, editorial".into(),
        ..Default::default()
    }
}

/// 三秒前就绪的预约表单
fn ready_form(address: &str) -> InquiryForm<HttpTransport, ManualClock> {
    let clock = ManualClock::starting_ago(3_000);
    let mut form = InquiryForm::new(HttpTransport::new(address).unwrap(), clock.clone());
    form.on_form_ready();
    clock.set_to_now();
    form
}

#[tokio::test]
async fn booking_form_reaches_success() {
    let app = spawn_app().await;
    let mut form = ready_form(&app.address);

    let outcome = form.on_submit(jordan()).await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.state(), FormState::Success);
    assert_eq!(form.fields(), &InquiryPayload::default());
    assert_eq!(app.relay.attempts().len(), 1);
}

#[tokio::test]
async fn invalid_email_never_reaches_the_server() {
    let app = spawn_app().await;
    let mut form = ready_form(&app.address);

    let outcome = form
        .on_submit(InquiryPayload {
            contact_email: "jordan-example.com".into(),
            ..jordan()
        })
        .await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(
        form.field_error(Field::ContactEmail),
        Some("Please enter a valid email address")
    );
    assert_eq!(form.state(), FormState::Idle);
    assert!(app.relay.attempts().is_empty());
}

#[tokio::test]
async fn honeypot_never_reaches_the_server() {
    let app = spawn_app().await;
    let mut form = ready_form(&app.address);

    form.on_submit(InquiryPayload {
        honeypot_field: "filled by a bot".into(),
        ..jordan()
    })
    .await;

    assert_eq!(form.state(), FormState::Idle);
    assert_eq!(form.banner(), None);
    assert!(app.relay.attempts().is_empty());
}

#[tokio::test]
async fn server_failure_is_shown_to_the_visitor() {
    let app = spawn_app_with(RelayBehaviour::Deliver, RelayConfig::default()).await;
    let mut form = ready_form(&app.address);

    let outcome = form.on_submit(jordan()).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.state(), FormState::Error);
    assert_eq!(
        form.banner(),
        Some(&Banner::Error(
            "Email configuration is missing. Please try again later.".into()
        ))
    );
    // 出错后保留用户输入
    assert_eq!(form.fields(), &jordan());
}

#[tokio::test]
async fn unreachable_server_shows_generic_error() {
    // 绑定后释放端口，保证该端口无监听
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let mut form = ready_form(&format!("http://127.0.0.1:{port}"));

    let outcome = form.on_submit(jordan()).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.state(), FormState::Error);
    assert!(matches!(form.banner(), Some(Banner::Error(_))));
}

#[tokio::test]
async fn newsletter_form_joins_the_list() {
    let app = spawn_app().await;
    Mock::given(path(LIST_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.list_server)
        .await;
    let mut form = SubscribeForm::new(HttpTransport::new(&app.address).unwrap());

    let outcome = form.on_submit("git@github.com").await;

    assert_eq!(outcome, SubmitOutcome::Sent);
    assert_eq!(form.state(), FormState::Success);
    assert_eq!(form.email(), "");
    assert_eq!(form.banner(), Some(&Banner::Success("Thanks for joining!".into())));
}

#[tokio::test]
async fn joining_the_list_closes_the_prompt_for_good() {
    let app = spawn_app().await;
    Mock::given(path(LIST_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.list_server)
        .await;
    let mut prompt = SubscribePrompt::new(MemoryStorage::default());
    let mut form = SubscribeForm::new(HttpTransport::new(&app.address).unwrap());
    assert!(prompt.open_after(PROMPT_DELAY));

    let outcome = form.on_submit("gitgithub.com").await;
    prompt.on_signup(&outcome);
    assert!(prompt.is_open());

    let outcome = form.on_submit("git@github.com").await;
    prompt.on_signup(&outcome);
    assert!(!prompt.is_open());

    let mut next_page = SubscribePrompt::new(prompt.into_storage());
    assert!(!next_page.open_after(PROMPT_DELAY));
}

#[tokio::test]
async fn newsletter_form_reports_provider_failure() {
    let app = spawn_app().await;
    Mock::given(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.list_server)
        .await;
    let mut form = SubscribeForm::new(HttpTransport::new(&app.address).unwrap());

    form.on_submit("git@github.com").await;

    assert_eq!(form.state(), FormState::Error);
    assert_eq!(
        form.banner(),
        Some(&Banner::Error("subscription failed".into()))
    );
    assert_eq!(form.email(), "git@github.com");
}

#[tokio::test]
async fn newsletter_form_blocks_address_without_at() {
    let app = spawn_app().await;
    Mock::given(path(LIST_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.list_server)
        .await;
    let mut form = SubscribeForm::new(HttpTransport::new(&app.address).unwrap());

    let outcome = form.on_submit("gitgithub.com").await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(form.email_error(), Some("Please enter a valid email address"));
    assert_eq!(form.state(), FormState::Idle);
}
