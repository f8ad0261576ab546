pub mod clock;
pub mod config;
pub mod domain;
pub mod form;
pub mod inquiry_email;
pub mod mail_relay;
pub mod mailing_list_client;
mod routes;
mod startup;
pub mod telemetry;
mod util;

pub use startup::run;
