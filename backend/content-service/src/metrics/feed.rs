use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

lazy_static! {
    /// Duration of feed requests segmented by sort mode.
    pub static ref FEED_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "feed_request_duration_seconds",
        "Feed request duration segmented by sort mode",
        &["sort"]
    )
    .expect("failed to register feed_request_duration_seconds");

    /// Total feed requests processed by sort mode.
    pub static ref FEED_REQUEST_TOTAL: IntCounterVec = register_int_counter_vec!(
        "feed_request_total",
        "Total feed requests segmented by sort mode",
        &["sort"]
    )
    .expect("failed to register feed_request_total");

    /// Rows returned per feed page, segmented by sort mode.
    pub static ref FEED_PAGE_SIZE: HistogramVec = register_histogram_vec!(
        "feed_page_size",
        "Number of posts returned per feed page segmented by sort mode",
        &["sort"]
    )
    .expect("failed to register feed_page_size");
}
