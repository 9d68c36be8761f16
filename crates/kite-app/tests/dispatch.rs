//! End-to-end dispatch tests: routing, middleware phases, and response
//! rendering through the public `handle` surface.

use std::sync::{Arc, Mutex};

use http::StatusCode;
use kite_app::App;
use kite_core::{MiddlewareError, RawRequest, Request, Response};
use kite_middleware::Middleware;
use kite_router::Params;
use kite_test::{TestRequest, TestResponse};
use serde_json::json;

fn index(_request: &Request, mut response: Response, _params: &Params) -> Response {
    response.set(json!({"message": "Hello, World!"}), StatusCode::OK);
    response
}

fn hello(_request: &Request, mut response: Response, params: &Params) -> Response {
    let name = params.get("name").unwrap_or("world");
    response.set(json!({"message": format!("Hello, {name}")}), StatusCode::OK);
    response
}

fn handle(app: &App, raw: RawRequest) -> TestResponse {
    TestResponse::from(app.handle(raw).unwrap())
}

#[test]
fn root_route_renders_json() {
    let mut app = App::new();
    app.route("/", index);

    let response = handle(&app, TestRequest::get("/").build());

    response
        .assert_status(StatusCode::OK)
        .assert_content_type("application/json")
        .assert_json_eq(&json!({"message": "Hello, World!"}));
}

#[test]
fn placeholder_binds_path_segment() {
    let mut app = App::new();
    app.route("/hello/{name}", hello);

    let response = handle(&app, TestRequest::get("/hello/Ada").build());

    response
        .assert_status(StatusCode::OK)
        .assert_json_eq(&json!({"message": "Hello, Ada"}));
}

#[test]
fn unmatched_path_renders_fixed_not_found() {
    let app = App::new();

    let response = handle(&app, TestRequest::get("/missing").build());

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_content_type("text/plain")
        .assert_body_eq("Not found.");
}

#[test]
fn unpopulated_response_renders_fixed_internal_error() {
    fn forgetful(_request: &Request, response: Response, _params: &Params) -> Response {
        // Returns the response untouched: no status, no body.
        response
    }

    let mut app = App::new();
    app.route("/oops", forgetful);

    let response = handle(&app, TestRequest::get("/oops").build());

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_content_type("text/plain")
        .assert_body_eq("Internal Server Error");
}

#[test]
fn earliest_registration_wins_for_overlapping_patterns() {
    fn by_id(_request: &Request, mut response: Response, params: &Params) -> Response {
        response.set(format!("id:{}", params.get("id").unwrap()), StatusCode::OK);
        response
    }

    fn me(_request: &Request, mut response: Response, _params: &Params) -> Response {
        response.set("me", StatusCode::OK);
        response
    }

    let mut app = App::new();
    app.route("/users/{id}", by_id);
    app.route("/users/me", me);

    handle(&app, TestRequest::get("/users/me").build()).assert_body_eq("id:me");
}

#[test]
fn duplicate_pattern_silently_overwrites() {
    fn old(_request: &Request, mut response: Response, _params: &Params) -> Response {
        response.set("old", StatusCode::OK);
        response
    }

    fn new(_request: &Request, mut response: Response, _params: &Params) -> Response {
        response.set("new", StatusCode::OK);
        response
    }

    let mut app = App::new();
    app.route("/page", old);
    app.route("/page", new);

    handle(&app, TestRequest::get("/page").build()).assert_body_eq("new");
}

#[test]
fn handler_sees_query_cookies_and_body() {
    fn echo(request: &Request, mut response: Response, _params: &Params) -> Response {
        response.set(
            json!({
                "tags": request.query_values("tag").unwrap(),
                "session": request.cookie("session").unwrap(),
                "body": String::from_utf8_lossy(request.body()),
            }),
            StatusCode::OK,
        );
        response
    }

    let mut app = App::new();
    app.route("/echo", echo);

    let raw = TestRequest::post("/echo?tag=a&tag=b")
        .cookie("session", "abc123")
        .body(&b"payload"[..])
        .build();

    handle(&app, raw).assert_json_eq(&json!({
        "tags": ["a", "b"],
        "session": "abc123",
        "body": "payload",
    }));
}

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

#[test]
fn pipeline_runs_pre_forward_and_post_reverse() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let mut app = App::builder()
        .middleware(OrderTracking {
            name: "a",
            order: order.clone(),
        })
        .middleware(OrderTracking {
            name: "b",
            order: order.clone(),
        })
        .build();
    app.route("/", index);

    handle(&app, TestRequest::get("/").build()).assert_status(StatusCode::OK);

    assert_eq!(
        *order.lock().unwrap(),
        vec!["pre:a", "pre:b", "post:b", "post:a"]
    );
}

#[test]
fn pipeline_runs_for_not_found_requests_too() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let app = App::builder()
        .middleware(OrderTracking {
            name: "only",
            order: order.clone(),
        })
        .build();

    handle(&app, TestRequest::get("/nowhere").build()).assert_status(StatusCode::NOT_FOUND);

    assert_eq!(*order.lock().unwrap(), vec!["pre:only", "post:only"]);
}

#[test]
fn post_phase_middleware_may_retrofit_the_response() {
    struct Retrofit;

    impl Middleware for Retrofit {
        fn name(&self) -> &'static str {
            "retrofit"
        }

        fn process_response(
            &self,
            _request: &Request,
            mut response: Response,
        ) -> Result<Response, MiddlewareError> {
            response.set_body("Modified response");
            Ok(response)
        }
    }

    let mut app = App::builder().middleware(Retrofit).build();
    app.route("/", index);

    let response = handle(&app, TestRequest::get("/").build());

    response
        .assert_status(StatusCode::OK)
        .assert_content_type("text/plain")
        .assert_body_eq("Modified response");
}

#[test]
fn pre_phase_path_rewrite_steers_resolution() {
    struct Rewriter;

    impl Middleware for Rewriter {
        fn name(&self) -> &'static str {
            "rewriter"
        }

        fn process_request(
            &self,
            request: Request,
            response: Response,
        ) -> Result<(Request, Response), MiddlewareError> {
            let request = if request.path() == "/legacy" {
                request.with_path("/current")
            } else {
                request
            };
            Ok((request, response))
        }
    }

    fn current(_request: &Request, mut response: Response, _params: &Params) -> Response {
        response.set("current", StatusCode::OK);
        response
    }

    let mut app = App::builder().middleware(Rewriter).build();
    app.route("/current", current);

    handle(&app, TestRequest::get("/legacy").build()).assert_body_eq("current");
}

#[test]
fn middleware_failure_fails_the_call_without_a_response() {
    struct FailingPost;

    impl Middleware for FailingPost {
        fn name(&self) -> &'static str {
            "failing-post"
        }

        fn process_response(
            &self,
            _request: &Request,
            _response: Response,
        ) -> Result<Response, MiddlewareError> {
            Err(MiddlewareError::new(self.name(), "post phase refused"))
        }
    }

    let mut app = App::builder().middleware(FailingPost).build();
    app.route("/", index);

    let err = app.handle(TestRequest::get("/").build()).unwrap_err();
    assert!(err.to_string().contains("failing-post"));
}

#[test]
fn missing_method_or_path_fails_the_call() {
    let app = App::new();

    let no_method = RawRequest::builder().target("/").build();
    assert!(app.handle(no_method).is_err());

    let no_target = RawRequest::builder().method("GET").build();
    assert!(app.handle(no_target).is_err());
}

#[test]
fn debug_mode_does_not_change_behavior() {
    let mut quiet = App::new();
    quiet.route("/", index);

    let mut noisy = App::builder().debug(true).build();
    noisy.route("/", index);

    let a = quiet.handle(TestRequest::get("/").build()).unwrap();
    let b = noisy.handle(TestRequest::get("/").build()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn trailing_slash_is_not_forgiven() {
    let mut app = App::new();
    app.route("/exact", index);

    handle(&app, TestRequest::get("/exact/").build()).assert_status(StatusCode::NOT_FOUND);
}
