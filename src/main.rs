use std::{net::TcpListener, sync::Arc};

use actix_web::web;
use anyhow::Context;
use booking_intake::{
    clock::{Clock, SystemClock},
    config,
    mail_relay::{MailRelay, SmtpRelay},
    mailing_list_client::MailingListClient,
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::get_subscriber("booking_intake", "info", std::io::stdout);
    telemetry::init_subscriber(subscriber);

    let config = config::try_config().context("failed to read configuration.")?;
    // 邮件配置缺失时预约请求会被拒绝，启动时仅打印警告
    if let Err(e) = config.relay.credentials() {
        tracing::warn!("{e}, booking inquiries will be refused.");
    }

    let listener = TcpListener::bind(config.web.server_address())
        .with_context(|| format!("failed to bind {}.", config.web.server_address()))?;
    let list_client = MailingListClient::from_config(&config)?;
    let relay: Arc<dyn MailRelay> = Arc::new(SmtpRelay);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    booking_intake::run(
        listener,
        config,
        relay.into(),
        clock.into(),
        web::Data::new(list_client),
    )?
    .await?;

    Ok(())
}
