mod retry;

pub use retry::{RetryPolicy, build_http_client, send_with_retry};
