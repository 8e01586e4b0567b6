use actix_web::web;

use crate::handlers::check_in;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/check-in")
            .route("", web::post().to(check_in::check_in))
            .route("/current", web::get().to(check_in::get_current))
            .route("/current", web::delete().to(check_in::reset_current)),
    );
}
