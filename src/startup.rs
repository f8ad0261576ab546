use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{
    clock::Clock,
    config::Config,
    mail_relay::MailRelay,
    mailing_list_client::MailingListClient,
    routes::{health_check, submit_booking, subscribe},
};

/// 在已绑定的端口上构建服务
pub fn run(
    listener: TcpListener,
    config: Config,
    relay: web::Data<dyn MailRelay>,
    clock: web::Data<dyn Clock>,
    list_client: web::Data<MailingListClient>,
) -> Result<Server, std::io::Error> {
    let relay_config = web::Data::new(config.relay);
    let intake_config = web::Data::new(config.intake);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/bookings", web::post().to(submit_booking))
            .route("/subscribe", web::post().to(subscribe))
            .app_data(relay_config.clone())
            .app_data(intake_config.clone())
            .app_data(relay.clone())
            .app_data(clock.clone())
            .app_data(list_client.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
