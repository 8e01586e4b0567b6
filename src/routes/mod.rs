use actix_web::web;

pub mod attendance;
pub mod check_in;
pub mod teams;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(check_in::configure)
            .configure(teams::configure)
            .configure(attendance::configure),
    );
}
