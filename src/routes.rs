use crate::{
    api::{clock, report, webhook},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Per-IP limiter shared by the record/report routes. Webhook routes are
    // exempt: platform verification and delivery must not be throttled.
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::resource("/timein")
            .wrap(build_limiter(config.rate_api_per_min))
            .route(web::post().to(clock::time_in)),
    )
    .service(
        web::resource("/timeout")
            .wrap(build_limiter(config.rate_api_per_min))
            .route(web::post().to(clock::time_out)),
    )
    .service(
        web::scope("/report")
            .wrap(build_limiter(config.rate_api_per_min))
            .service(web::resource("/today/{name}").route(web::get().to(report::today)))
            .service(web::resource("/week/{name}").route(web::get().to(report::week))),
    )
    .service(
        web::resource("/export")
            .wrap(build_limiter(config.rate_api_per_min))
            .route(web::get().to(report::export)),
    )
    .service(
        web::resource("/webhook")
            .route(web::get().to(webhook::verify))
            .route(web::post().to(webhook::receive)),
    );
}
