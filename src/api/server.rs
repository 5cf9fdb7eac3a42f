use crate::api::routes;
use crate::cache::DynRecordCache;
use crate::config::SharedConfig;
use crate::report_store::DynReportStore;
use std::future::Future;

#[derive(Clone)]
pub(super) struct AppState {
    pub config: SharedConfig,
    pub report_store: DynReportStore,
    pub record_cache: DynRecordCache,
}

pub fn new(
    config: SharedConfig,
    report_store: DynReportStore,
    record_cache: DynRecordCache,
) -> impl Future<Output = hyper::Result<()>> {
    let bind_addr = config.api_bind_addr;
    axum::Server::bind(&bind_addr).serve(
        routes::new(AppState {
            config,
            report_store,
            record_cache,
        })
        .into_make_service(),
    )
}
