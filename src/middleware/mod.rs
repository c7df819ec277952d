//! Middleware pipeline
//!
//! Requests flow through an ordered list of stages before reaching the
//! endpoint. Each stage sees the request head, may inspect or rewrite the
//! response, and decides whether to call the rest of the chain:
//!
//! ```text
//! Pipeline::handle(req)
//!   -> stages[0].handle(req, next)      security headers
//!        -> stages[1].handle(req, next) compression
//!             -> endpoint.call(req)     SPA fallback policy
//! ```
//!
//! All work on the request path is synchronous: the asset tree lives in
//! memory, so there is nothing to await between stages.

pub mod compression;
pub mod security;

use crate::http::HttpResponse;
use hyper::http::request::Parts;
use std::sync::Arc;

pub use compression::CompressionLayer;
pub use security::SecurityHeaders;

/// A request-transforming stage wrapped around the rest of the chain
pub trait Middleware: Send + Sync {
    fn handle(&self, req: &Parts, next: Next<'_>) -> HttpResponse;
}

/// The innermost handler of a pipeline
pub trait Endpoint: Send + Sync {
    fn call(&self, req: &Parts) -> HttpResponse;
}

/// The remainder of the chain after the current stage
pub struct Next<'a> {
    stages: &'a [Arc<dyn Middleware>],
    endpoint: &'a dyn Endpoint,
}

impl Next<'_> {
    /// Hand the request to the next stage, or the endpoint if none remain
    pub fn run(self, req: &Parts) -> HttpResponse {
        match self.stages.split_first() {
            Some((stage, rest)) => stage.handle(
                req,
                Next {
                    stages: rest,
                    endpoint: self.endpoint,
                },
            ),
            None => self.endpoint.call(req),
        }
    }
}

/// Ordered stage list in front of an endpoint; the first stage is outermost
pub struct Pipeline {
    stages: Vec<Arc<dyn Middleware>>,
    endpoint: Arc<dyn Endpoint>,
}

impl Pipeline {
    pub fn new(endpoint: Arc<dyn Endpoint>) -> Self {
        Self {
            stages: Vec::new(),
            endpoint,
        }
    }

    /// Append a stage inside all previously added stages
    #[must_use]
    pub fn stage(mut self, stage: impl Middleware + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    pub fn handle(&self, req: &Parts) -> HttpResponse {
        Next {
            stages: &self.stages,
            endpoint: self.endpoint.as_ref(),
        }
        .run(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Bytes;
    use hyper::header::HeaderValue;
    use hyper::{Request, Response};
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for Recorder {
        fn handle(&self, req: &Parts, next: Next<'_>) -> HttpResponse {
            self.log.lock().unwrap().push(format!("enter {}", self.name));
            let mut resp = next.run(req);
            self.log.lock().unwrap().push(format!("leave {}", self.name));
            resp.headers_mut()
                .append("x-stage", HeaderValue::from_static(self.name));
            resp
        }
    }

    struct Hello;

    impl Endpoint for Hello {
        fn call(&self, req: &Parts) -> HttpResponse {
            Response::new(Bytes::from(format!("hello {}", req.uri.path())))
        }
    }

    fn parts(path: &str) -> Parts {
        Request::get(path).body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_empty_pipeline_calls_endpoint() {
        let pipeline = Pipeline::new(Arc::new(Hello));
        let resp = pipeline.handle(&parts("/x"));
        assert_eq!(resp.body().as_ref(), b"hello /x");
    }

    #[test]
    fn test_stages_wrap_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let pipeline = Pipeline::new(Arc::new(Hello))
            .stage(Recorder {
                name: "outer",
                log: Arc::clone(&log),
            })
            .stage(Recorder {
                name: "inner",
                log: Arc::clone(&log),
            });

        let resp = pipeline.handle(&parts("/"));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["enter outer", "enter inner", "leave inner", "leave outer"]
        );
        let stages: Vec<_> = resp.headers().get_all("x-stage").iter().collect();
        assert_eq!(stages, vec!["inner", "outer"]);
    }
}
