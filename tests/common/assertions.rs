//! Custom assertion macros
//!
//! Use as `crate::assert_ok!(...)` from any test module.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is an error, optionally of a given variant
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        assert!($result.is_err(), "Expected Err, got Ok");
    };
    ($result:expr, $pattern:pat) => {
        match $result {
            Err($pattern) => {}
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => panic!("Expected different error variant, got: {:?}", e),
        }
    };
}

/// Assert that a JSON error body carries the expected `kind`
#[macro_export]
macro_rules! assert_error_kind {
    ($response:expr, $status:expr, $kind:expr) => {{
        let response = $response;
        assert_eq!(response.status_code(), $status);
        let body: serde_json::Value = response.json();
        assert_eq!(body["kind"], $kind, "unexpected error body: {}", body);
        assert_eq!(body["status"], $status.as_u16());
    }};
}
