use std::collections::HashMap;

use oauth1_signature::{
    build_base_string, escape, sign, verify, BodySource, Config, KeyMaterial, Request,
    SignatureMethod, StaticEnv, OAUTH1_CLIENT_SECRET, OAUTH1_SIGNATURE_METHOD,
    OAUTH1_TOKEN_SECRET,
};
use pretty_assertions::assert_eq;
use test_case::test_case;

const CLIENT_SECRET: &str = "kd94hf93k423kf44";
const TOKEN_SECRET: &str = "pfkkdhi9sl3r4s00";

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pairs(v: &[(&str, &str)]) -> Vec<(String, String)> {
    v.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn oauth_params(method: SignatureMethod) -> Vec<(String, String)> {
    pairs(&[
        ("oauth_consumer_key", "dpf43f3p2l4k3l03"),
        ("oauth_token", "nnch734d00sl2jdk"),
        ("oauth_signature_method", method.as_str()),
        ("oauth_timestamp", "137131202"),
        ("oauth_nonce", "chapoH"),
    ])
}

fn authorization_header(params: &[(String, String)], signature: &str) -> String {
    let mut items = vec!["realm=\"Photos\"".to_string()];
    items.extend(params.iter().map(|(k, v)| format!("{k}=\"{}\"", escape(v))));
    items.push(format!("oauth_signature=\"{}\"", escape(signature)));
    format!("OAuth {}", items.join(", "))
}

/// Sign like a client does, then build the request a server receives.
fn client_request(
    method: SignatureMethod,
    key: KeyMaterial<'_>,
    query: &str,
    body: &str,
) -> (http::request::Parts, BodySource) {
    let oauth = oauth_params(method);

    let mut params = form_pairs(query);
    params.extend(oauth.clone());
    params.extend(form_pairs(body));

    let uri = format!("http://photos.example.net/photos?{query}");
    let base_string = build_base_string("POST", &uri, &params, None).unwrap();
    let signature = sign(method, &base_string, key).unwrap();

    let req = http::Request::post(format!("/photos?{query}"))
        .header("host", "photos.example.net")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("authorization", authorization_header(&oauth, &signature))
        .body(())
        .unwrap();

    (req.into_parts().0, BodySource::from(body))
}

fn form_pairs(s: &str) -> Vec<(String, String)> {
    BodySource::from(s).to_pairs()
}

#[test_case(SignatureMethod::HmacSha1; "hmac-sha1")]
#[test_case(SignatureMethod::HmacSha256; "hmac-sha256")]
#[test_case(SignatureMethod::Plaintext; "plaintext")]
fn test_server_verifies_client_signature(method: SignatureMethod) {
    init();

    let key = KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET);
    let (parts, body) = client_request(method, key, "file=vacation.jpg&size=original", "a3=2+q&c2");

    let req = Request::from_parts(&parts, body).unwrap();
    assert_eq!(req.uri, "http://photos.example.net/photos");
    assert!(verify(method, &req, key).unwrap());
}

#[test_case(SignatureMethod::HmacSha1; "hmac-sha1")]
#[test_case(SignatureMethod::HmacSha256; "hmac-sha256")]
#[test_case(SignatureMethod::Plaintext; "plaintext")]
fn test_server_rejects_wrong_token_secret(method: SignatureMethod) {
    init();

    let (parts, body) = client_request(
        method,
        KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET),
        "file=vacation.jpg",
        "",
    );

    let req = Request::from_parts(&parts, body).unwrap();
    assert!(!verify(method, &req, KeyMaterial::client_only(CLIENT_SECRET)).unwrap());
}

#[test]
fn test_server_detects_tampered_query() {
    init();

    let key = KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET);
    let (mut parts, body) = client_request(
        SignatureMethod::HmacSha1,
        key,
        "file=vacation.jpg&size=original",
        "",
    );
    parts.uri = "/photos?file=vacation.jpg&size=large".parse().unwrap();

    let req = Request::from_parts(&parts, body).unwrap();
    assert!(!verify(SignatureMethod::HmacSha1, &req, key).unwrap());
}

#[test]
fn test_server_detects_tampered_body() {
    init();

    let key = KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET);
    let (parts, _) = client_request(SignatureMethod::HmacSha1, key, "file=a", "amount=10");

    let req = Request::from_parts(&parts, BodySource::from("amount=1000")).unwrap();
    assert!(!verify(SignatureMethod::HmacSha1, &req, key).unwrap());
}

#[test]
fn test_rfc5849_photos_example() {
    init();

    let req = http::Request::get("/photos?file=vacation.jpg&size=original")
        .header("host", "photos.example.net")
        .header(
            "authorization",
            "OAuth realm=\"Photos\", oauth_consumer_key=\"dpf43f3p2l4k3l03\", \
             oauth_token=\"nnch734d00sl2jdk\", oauth_signature_method=\"HMAC-SHA1\", \
             oauth_timestamp=\"137131202\", oauth_nonce=\"chapoH\", \
             oauth_signature=\"MdpQcU8iPSUjWoN%2FUDMsK2sui9I%3D\"",
        )
        .body(())
        .unwrap();
    let (parts, _) = req.into_parts();

    let req = Request::from_parts(&parts, BodySource::Empty).unwrap();
    assert_eq!(req.signature, "MdpQcU8iPSUjWoN/UDMsK2sui9I=");
    assert!(verify(
        SignatureMethod::HmacSha1,
        &req,
        KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET)
    )
    .unwrap());
}

#[test]
fn test_verify_with_config_from_env() {
    init();

    let env = StaticEnv {
        envs: HashMap::from_iter([
            (OAUTH1_SIGNATURE_METHOD.to_string(), "HMAC-SHA256".to_string()),
            (OAUTH1_CLIENT_SECRET.to_string(), CLIENT_SECRET.to_string()),
            (OAUTH1_TOKEN_SECRET.to_string(), TOKEN_SECRET.to_string()),
        ]),
    };
    let config = Config::from_env(&env);
    let method = config.signature_method().unwrap();
    assert_eq!(method, SignatureMethod::HmacSha256);

    let (parts, body) = client_request(method, config.key_material(), "file=vacation.jpg", "");
    let req = Request::from_parts(&parts, body).unwrap();
    assert!(verify(method, &req, config.key_material()).unwrap());
}

#[cfg(feature = "rsa")]
#[test]
fn test_rsa_module_is_exported() {
    use oauth1_signature::rsa::RsaSha1Signer;

    let err = RsaSha1Signer::from_pem("").unwrap_err();
    assert_eq!(err.kind(), oauth1_signature::ErrorKind::ConfigInvalid);
}

#[test]
fn test_https_server_verifies_origin_form_request() {
    init();

    let key = KeyMaterial::shared(CLIENT_SECRET, TOKEN_SECRET);
    let oauth = oauth_params(SignatureMethod::HmacSha1);
    let mut params = pairs(&[("file", "vacation.jpg")]);
    params.extend(oauth.clone());

    let base_string = build_base_string(
        "GET",
        "https://photos.example.net/photos?file=vacation.jpg",
        &params,
        None,
    )
    .unwrap();
    let signature = sign(SignatureMethod::HmacSha1, &base_string, key).unwrap();

    let (parts, _) = http::Request::get("/photos?file=vacation.jpg")
        .header("host", "photos.example.net")
        .header("authorization", authorization_header(&oauth, &signature))
        .body(())
        .unwrap()
        .into_parts();

    let req =
        Request::from_parts_with_scheme(&parts, http::uri::Scheme::HTTPS, BodySource::Empty)
            .unwrap();
    assert_eq!(req.uri, "https://photos.example.net/photos");
    assert!(verify(SignatureMethod::HmacSha1, &req, key).unwrap());

    let req = Request::from_parts(&parts, BodySource::Empty).unwrap();
    assert!(!verify(SignatureMethod::HmacSha1, &req, key).unwrap());
}
