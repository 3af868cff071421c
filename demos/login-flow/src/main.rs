//! Login flow demo binary
//!
//! Mounts the login page against an in-memory auth context and walks through
//! a rejected sign-in, a mismatched sign-up, a successful sign-up and a
//! sign-out, printing the view after each step.

use anyhow::Context;
use portico_login::mocks::MockAuthProvider;
use portico_login::providers::{ChatBoot, IdentifyMetadata};
use portico_login::{
    AuthSnapshot, ChatConfig, Field, Identity, LoadingFlag, LoginConfig, LoginEnvironment,
    LoginPage, PageView, ProviderError, SharedAuthContext, Telemetry, TelemetryError,
};
use std::future::Future;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const WAIT: Duration = Duration::from_secs(2);

/// Telemetry sink that logs instead of calling analytics services.
#[derive(Debug, Clone, Copy)]
struct LoggingTelemetry;

impl Telemetry for LoggingTelemetry {
    fn identify(&self, email: &str, metadata: &IdentifyMetadata) {
        tracing::info!(email, id = %metadata.id, name = %metadata.name, "identify");
    }

    fn session_url(&self) -> impl Future<Output = Result<String, TelemetryError>> + Send {
        async { Ok("https://app.highlight.run/sessions/demo".to_string()) }
    }

    fn boot_chat(&self, boot: &ChatBoot) {
        tracing::info!(app_id = %boot.app_id, alignment = %boot.alignment, user_id = %boot.user_id, "boot chat");
    }

    fn shutdown(&self) {
        tracing::info!("telemetry shutdown");
    }
}

fn print_view(step: &str, view: &PageView) {
    println!("\n>>> {step}");
    match view {
        PageView::Blank => println!("(nothing rendered)"),
        PageView::App { identity } => {
            let name = identity.as_ref().map_or("<unknown>", |i| i.name.as_str());
            println!("Application router for {name}");
        },
        PageView::Form(form) => {
            println!("{}", form.title);
            println!("{} {}", form.prompt, form.toggle_label);
            for field in &form.fields {
                let error = field.error.as_deref().unwrap_or("");
                println!("  [{:<16}] {:<20} {error}", field.placeholder, field.value);
            }
            println!("  <{}>  {}  <{}>", form.submit_label, form.oauth_prompt, form.oauth_label);
            if let Some(error) = &form.oauth_error {
                println!("  {error}");
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_flow=info,portico_login=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Login Flow Demo ===");

    let context = SharedAuthContext::new(AuthSnapshot::loading());
    let ada = Identity {
        id: "1".to_string(),
        uid: "demo-uid-1".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada Lovelace".to_string(),
        photo_url: None,
    };

    let loading = LoadingFlag::new();
    let rejecting = MockAuthProvider::rejecting(ProviderError::new(
        "auth/wrong-password",
        "The password is invalid or the user does not have a password.",
    ));
    let env = LoginEnvironment::new(rejecting, loading.clone(), LoggingTelemetry, LoginConfig::default());

    let page = LoginPage::mount("/login", &context, env)
        .await
        .context("mounting login page")?;
    print_view("Auth context still loading", &page.view().await);
    tokio::time::sleep(Duration::from_millis(10)).await;
    println!("loading indicator: {}", loading.is_loading());

    context.publish(AuthSnapshot::signed_out());
    tokio::time::sleep(Duration::from_millis(10)).await;
    print_view("Signed out", &page.view().await);

    page.set_field(Field::Email, "ada@example.com").await?;
    page.set_field(Field::Password, "wrong").await?;
    page.submit().await?.wait_with_timeout(WAIT).await?;
    print_view("Rejected sign-in", &page.view().await);

    page.unmount().await?;

    // Second page: the provider accepts and signs the user in. This one is
    // configured for another product with the chat docked on the left.
    let config = LoginConfig::new("Portico Demo")
        .with_sign_up_param("register")
        .with_chat(ChatConfig {
            alignment: "left".to_string(),
            ..ChatConfig::default()
        });
    let accepting = MockAuthProvider::new().signing_in(context.clone(), ada);
    let env = LoginEnvironment::new(accepting, loading, LoggingTelemetry, config);
    let page = LoginPage::mount("/login?register=1", &context, env).await?;

    page.set_field(Field::Email, "ada@example.com").await?;
    page.set_field(Field::Password, "hunter22").await?;
    page.set_field(Field::ConfirmPassword, "hunter23").await?;
    page.submit().await?;
    print_view("Mismatched sign-up", &page.view().await);

    page.set_field(Field::ConfirmPassword, "hunter22").await?;
    page.submit().await?.wait_with_timeout(WAIT).await?;
    tokio::time::sleep(Duration::from_millis(20)).await;
    print_view("Signed up", &page.view().await);

    context.publish(AuthSnapshot::signed_out());
    tokio::time::sleep(Duration::from_millis(20)).await;
    print_view("Signed out again", &page.view().await);

    page.unmount().await?;

    println!("\n=== Demo Complete ===");
    Ok(())
}
