//! Integration tests for service-account authentication and save links.

use httpmock::prelude::*;
use serde_json::json;

use wallet_pass_sdk::prelude::*;

const KEY_JSON: &str = include_str!("fixtures/service_account.json");
const PUBLIC_PEM: &str = include_str!("fixtures/service_account_public.pem");
const ISSUER_ID: &str = "3388000000022125581";

fn key_with_token_uri(token_uri: String) -> ServiceAccountKey {
    let mut key = ServiceAccountKey::from_json(KEY_JSON).unwrap();
    key.token_uri = token_uri;
    key
}

fn class_json(suffix: &str) -> serde_json::Value {
    json!({"id": format!("{ISSUER_ID}.{suffix}"), "issuerName": "Issuer name", "reviewStatus": "APPROVED"})
}

#[tokio::test]
async fn access_token_is_exchanged_once_and_reused() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200).json_body(json!({
                "access_token": "exchanged-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            }));
        })
        .await;
    for suffix in ["bus", "rail"] {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(format!("/walletobjects/v1/transitClass/{ISSUER_ID}.{suffix}"))
                    .header("authorization", "Bearer exchanged-token");
                then.status(200).json_body(class_json(suffix));
            })
            .await;
    }

    let client = WalletClient::builder()
        .api_url(&server.url("/walletobjects/v1"))
        .service_account(key_with_token_uri(server.url("/token")))
        .build()
        .unwrap();

    let bus = client.classes().get(&ResourceId::new(ISSUER_ID, "bus")).await.unwrap();
    let rail = client.classes().get(&ResourceId::new(ISSUER_ID, "rail")).await.unwrap();

    token.assert_async().await;
    assert_eq!(bus.id.suffix(), "bus");
    assert_eq!(rail.id.suffix(), "rail");
}

#[tokio::test]
async fn unauthorized_response_drops_cached_token() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(200).json_body(json!({
                "access_token": "revoked-token",
                "expires_in": 3599,
                "token_type": "Bearer"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(format!("/walletobjects/v1/transitClass/{ISSUER_ID}.bus"))
                .header("authorization", "Bearer revoked-token");
            then.status(401).json_body(json!({
                "error": {"code": 401, "message": "Invalid credentials", "status": "UNAUTHENTICATED"}
            }));
        })
        .await;

    let client = WalletClient::builder()
        .api_url(&server.url("/walletobjects/v1"))
        .service_account(key_with_token_uri(server.url("/token")))
        .build()
        .unwrap();

    let id = ResourceId::new(ISSUER_ID, "bus");
    for _ in 0..2 {
        let err = client.classes().get(&id).await.unwrap_err();
        assert!(matches!(err, SdkError::Http(HttpError::Unauthorized(_))), "got {err:?}");
    }

    token.assert_hits_async(2).await;
}

#[tokio::test]
async fn rejected_token_exchange_is_an_auth_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/token");
            then.status(400).json_body(json!({"error": "invalid_grant", "error_description": "Invalid JWT Signature."}));
        })
        .await;

    let client = WalletClient::builder()
        .api_url(&server.url("/walletobjects/v1"))
        .service_account(key_with_token_uri(server.url("/token")))
        .build()
        .unwrap();

    let err = client
        .classes()
        .get(&ResourceId::new(ISSUER_ID, "bus"))
        .await
        .unwrap_err();
    match err {
        SdkError::Auth(AuthError::TokenExchange(message)) => assert!(message.contains("invalid_grant")),
        other => panic!("expected token exchange error, got {other:?}"),
    }
}

#[test]
fn links_for_new_objects_verify_with_public_key() {
    let client = WalletClient::builder()
        .service_account(ServiceAccountKey::from_json(KEY_JSON).unwrap())
        .origins(vec!["www.example.com".to_string()])
        .build()
        .unwrap();

    let class = TransitClass::sample(ResourceId::new(ISSUER_ID, "bus"));
    let object = TransitObject::new(ResourceId::new(ISSUER_ID, "ticket"), class.id.clone());
    let url = client.links().new_objects(&class, &object).unwrap();

    let token = url.strip_prefix("https://pay.google.com/gp/v/save/").unwrap();
    let claims = verify_save_token(token, PUBLIC_PEM.as_bytes()).unwrap();

    assert_eq!(claims.iss, "wallet-issuer@wallet-demo.iam.gserviceaccount.com");
    assert_eq!(claims.aud, "google");
    assert_eq!(claims.typ, "savetowallet");
    assert_eq!(claims.origins, vec!["www.example.com"]);
    assert_eq!(claims.payload.entries("transitClasses")[0]["id"], "3388000000022125581.bus");
    assert_eq!(claims.payload.entries("transitObjects")[0]["classId"], "3388000000022125581.bus");
}

#[test]
fn links_for_existing_objects_cover_every_kind() {
    let client = WalletClient::builder()
        .service_account(ServiceAccountKey::from_json(KEY_JSON).unwrap())
        .build()
        .unwrap();

    let references = PassKind::ALL
        .iter()
        .map(|kind| {
            let suffix = format!("{}_OBJECT_SUFFIX", kind.as_str().to_uppercase());
            (*kind, ObjectReference::new(ResourceId::new(ISSUER_ID, &suffix)))
        })
        .collect();
    let url = client.links().existing_objects(references).unwrap();

    let token = url.rsplit('/').next().unwrap();
    let claims = verify_save_token(token, PUBLIC_PEM.as_bytes()).unwrap();
    for kind in PassKind::ALL {
        assert_eq!(claims.payload.entries(&kind.objects_key()).len(), 1, "{kind}");
    }
}

#[test]
fn links_need_a_service_account() {
    let client = WalletClient::builder().bearer_token("static").build().unwrap();
    let err = client
        .links()
        .existing_objects(vec![(
            PassKind::Transit,
            ObjectReference::new(ResourceId::new(ISSUER_ID, "ticket")),
        )])
        .unwrap_err();
    assert!(matches!(err, SdkError::Auth(AuthError::MissingCredentials)));
}
