//! Ordered two-phase pipeline execution.

use std::sync::Arc;

use kite_core::{MiddlewareError, Request, Response};

use crate::middleware::Middleware;

/// A type-erased middleware stage stored in the pipeline.
pub type BoxedStage = Arc<dyn Middleware>;

/// The ordered middleware pipeline.
///
/// Stages are appended during application setup and the list is read-only
/// during dispatch; the pre-phase walks it forward, the post-phase walks it
/// backward.
///
/// # Example
///
/// ```rust
/// use kite_middleware::{Middleware, Pipeline};
///
/// struct Noop;
///
/// impl Middleware for Noop {
///     fn name(&self) -> &'static str {
///         "noop"
///     }
/// }
///
/// let mut pipeline = Pipeline::new();
/// pipeline.add_stage(Noop);
/// assert_eq!(pipeline.stage_names(), vec!["noop"]);
/// ```
#[derive(Clone, Default)]
pub struct Pipeline {
    stages: Vec<BoxedStage>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage. Pre-phase order is append order.
    pub fn add_stage<M: Middleware>(&mut self, stage: M) {
        self.stages.push(Arc::new(stage));
    }

    /// Runs every stage's `process_request` in registration order,
    /// threading the possibly updated request/response pair through each
    /// step.
    ///
    /// # Errors
    ///
    /// The first failing stage's error propagates immediately; later
    /// stages do not run and earlier stages are not rolled back.
    pub fn run_pre(
        &self,
        mut request: Request,
        mut response: Response,
    ) -> Result<(Request, Response), MiddlewareError> {
        for stage in &self.stages {
            (request, response) = stage.process_request(request, response)?;
        }
        Ok((request, response))
    }

    /// Runs every stage's `process_response` in reverse registration
    /// order.
    ///
    /// # Errors
    ///
    /// Same propagation policy as [`Pipeline::run_pre`].
    pub fn run_post(
        &self,
        request: &Request,
        mut response: Response,
    ) -> Result<Response, MiddlewareError> {
        for stage in self.stages.iter().rev() {
            response = stage.process_response(request, response)?;
        }
        Ok(response)
    }

    /// Returns the stage names in registration order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if no stages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use kite_core::RawRequest;
    use std::sync::Mutex;

    /// Records the order in which its phases run.
    struct OrderTracking {
        name: &'static str,
        order: Arc<Mutex<Vec<String>>>,
    }

    impl Middleware for OrderTracking {
        fn name(&self) -> &'static str {
            self.name
        }

        fn process_request(
            &self,
            request: Request,
            response: Response,
        ) -> Result<(Request, Response), MiddlewareError> {
            self.order.lock().unwrap().push(format!("pre:{}", self.name));
            Ok((request, response))
        }

        fn process_response(
            &self,
            _request: &Request,
            response: Response,
        ) -> Result<Response, MiddlewareError> {
            self.order.lock().unwrap().push(format!("post:{}", self.name));
            Ok(response)
        }
    }

    struct Failing;

    impl Middleware for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn process_request(
            &self,
            _request: Request,
            _response: Response,
        ) -> Result<(Request, Response), MiddlewareError> {
            Err(MiddlewareError::new(self.name(), "refused"))
        }
    }

    fn request() -> Request {
        let raw = RawRequest::builder().method("GET").target("/").build();
        Request::from_raw(raw).unwrap()
    }

    #[test]
    fn test_pre_forward_post_reverse() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(OrderTracking {
            name: "a",
            order: order.clone(),
        });
        pipeline.add_stage(OrderTracking {
            name: "b",
            order: order.clone(),
        });

        let (request, response) = pipeline.run_pre(request(), Response::new()).unwrap();
        let _ = pipeline.run_post(&request, response).unwrap();

        assert_eq!(
            *order.lock().unwrap(),
            vec!["pre:a", "pre:b", "post:b", "post:a"]
        );
    }

    #[test]
    fn test_empty_pipeline_passes_values_through() {
        let pipeline = Pipeline::new();
        let response = Response::with("ok", StatusCode::OK);

        let (request, response) = pipeline.run_pre(request(), response).unwrap();
        let response = pipeline.run_post(&request, response).unwrap();

        assert_eq!(response.status(), Some(StatusCode::OK));
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_stage_failure_propagates() {
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Failing);

        let err = pipeline.run_pre(request(), Response::new()).unwrap_err();
        assert_eq!(err.stage, "failing");
    }

    #[test]
    fn test_failure_stops_later_stages() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Failing);
        pipeline.add_stage(OrderTracking {
            name: "after",
            order: order.clone(),
        });

        assert!(pipeline.run_pre(request(), Response::new()).is_err());
        assert!(order.lock().unwrap().is_empty());
    }

    #[test]
    fn test_post_phase_may_replace_response() {
        struct Retrofit;

        impl Middleware for Retrofit {
            fn name(&self) -> &'static str {
                "retrofit"
            }

            fn process_response(
                &self,
                _request: &Request,
                _response: Response,
            ) -> Result<Response, MiddlewareError> {
                Ok(Response::with("replaced", StatusCode::OK))
            }
        }

        let mut pipeline = Pipeline::new();
        pipeline.add_stage(Retrofit);

        let req = request();
        let response = pipeline
            .run_post(&req, Response::with("original", StatusCode::IM_A_TEAPOT))
            .unwrap();

        assert_eq!(response.render().body().as_ref(), b"replaced");
    }

    #[test]
    fn test_stage_introspection() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = Pipeline::new();
        pipeline.add_stage(OrderTracking {
            name: "first",
            order: order.clone(),
        });
        pipeline.add_stage(OrderTracking {
            name: "second",
            order,
        });

        assert_eq!(pipeline.stage_count(), 2);
        assert_eq!(pipeline.stage_names(), vec!["first", "second"]);
    }
}
