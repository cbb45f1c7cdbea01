//! Blocking entry points over the async primitives

use crate::{Result, RobotsError};
use once_cell::sync::OnceCell;
use std::future::Future;
use tokio::runtime::{Builder, Handle, Runtime, RuntimeFlavor};

static BLOCKING_RUNTIME: OnceCell<Runtime> = OnceCell::new();

fn blocking_runtime() -> std::io::Result<&'static Runtime> {
    BLOCKING_RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("robots-sitemap-blocking")
            .enable_all()
            .build()
    })
}

/// Runs `future` to completion on the calling thread
///
/// Outside tokio the future runs on a shared background runtime. Inside a
/// multi-thread runtime it runs on the caller's own runtime, so connections
/// pooled by earlier async calls keep being driven. A current-thread runtime
/// cannot be blocked without stalling those connections, so it is refused.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => return Ok(blocking_runtime()?.block_on(future)),
    };

    match handle.runtime_flavor() {
        RuntimeFlavor::CurrentThread => Err(RobotsError::Runtime(std::io::Error::new(
            std::io::ErrorKind::Other,
            "blocking call inside a current-thread tokio runtime; use the async method instead",
        ))),
        _ => Ok(tokio::task::block_in_place(|| handle.block_on(future))),
    }
}
