use super::*;

#[test]
fn can_expose_message_and_kind() {
    for (error, kind, message) in [
        (GatewayError::Input("bad body".to_string()), "input", "bad body"),
        (GatewayError::NotFound("no such algorithm".to_string()), "not-found", "no such algorithm"),
        (GatewayError::Unavailable("missing module".to_string()), "unavailable", "missing module"),
        (GatewayError::Interface("bad signature".to_string()), "interface", "bad signature"),
        (GatewayError::Solver("solver blew up".to_string()), "solver", "solver blew up"),
        (GatewayError::Resource("cannot write file".to_string()), "resource", "cannot write file"),
        (GatewayError::Internal("oops".to_string()), "internal", "oops"),
    ] {
        assert_eq!(error.kind(), kind);
        assert_eq!(error.message(), message);
        assert_eq!(error.to_string(), message);
    }
}

#[test]
fn can_convert_io_error_to_resource_kind() {
    let error: GatewayError = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();

    assert_eq!(error.kind(), "resource");
}
